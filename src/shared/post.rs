/**
 * Post Types
 *
 * Posts are the per-user resource gated by the ownership check. The author
 * is always the caller that created the post, never a client-supplied id.
 */

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// A stored post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
}

/// Editable post fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostChanges {
    pub title: String,
    pub slug: String,
    pub content: String,
}

impl PostChanges {
    /// Every field must be non-blank
    pub fn validate(&self) -> Result<(), SharedError> {
        for (field, value) in [
            ("title", &self.title),
            ("slug", &self.slug),
            ("content", &self.content),
        ] {
            if value.trim().is_empty() {
                return Err(SharedError::validation(field, format!("{} is required", field)));
            }
        }
        Ok(())
    }
}

/// A post to be created by `author_id`
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: i64,
    pub fields: PostChanges,
}
