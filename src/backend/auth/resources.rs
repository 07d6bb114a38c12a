/**
 * Resource Ownership Lookup
 *
 * Per-user resources expose who owns them so the ownership check can run
 * before a mutation. Posts are the resource kind served by this API.
 */

use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::backend::error::StoreError;
use crate::shared::{NewPost, Post, PostChanges};

/// Resolves the owning subject of a resource
#[async_trait]
pub trait ResourceOwnerLookup: Send + Sync {
    /// Human-readable resource kind, used in not-found messages
    fn resource_kind(&self) -> &'static str;

    /// Owning subject id, or `None` if the resource does not exist
    async fn owner_of(&self, resource_id: i64) -> Result<Option<i64>, StoreError>;
}

/// Post persistence needed by the post routes
#[async_trait]
pub trait PostStore: ResourceOwnerLookup {
    /// Persist a new post
    ///
    /// Returns `StoreError::Duplicate` if the slug is taken.
    async fn create(&self, post: NewPost) -> Result<Post, StoreError>;

    /// Replace a post's editable fields, or `None` if it does not exist
    ///
    /// Returns `StoreError::Duplicate` if another post has the slug.
    async fn update(&self, post_id: i64, changes: PostChanges) -> Result<Option<Post>, StoreError>;

    /// Delete a post, returning whether a row was removed
    async fn delete(&self, post_id: i64) -> Result<bool, StoreError>;
}

/// Database row for the `posts` table
#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: i64,
    author_id: i64,
    title: String,
    slug: String,
    content: String,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            author_id: row.author_id,
            title: row.title,
            slug: row.slug,
            content: row.content,
        }
    }
}

/// A unique violation on `posts.slug` becomes `Duplicate`
fn slug_conflict<T>(result: Result<T, sqlx::Error>, slug: &str) -> Result<T, StoreError> {
    match result {
        Ok(value) => Ok(value),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            Err(StoreError::Duplicate(slug.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// PostgreSQL-backed post store
#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResourceOwnerLookup for PgPostStore {
    fn resource_kind(&self) -> &'static str {
        "Post"
    }

    async fn owner_of(&self, resource_id: i64) -> Result<Option<i64>, StoreError> {
        let owner = sqlx::query_scalar::<_, i64>("SELECT author_id FROM posts WHERE id = $1")
            .bind(resource_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn create(&self, post: NewPost) -> Result<Post, StoreError> {
        let result = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (author_id, title, slug, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, author_id, title, slug, content
            "#,
        )
        .bind(post.author_id)
        .bind(&post.fields.title)
        .bind(&post.fields.slug)
        .bind(&post.fields.content)
        .fetch_one(&self.pool)
        .await;

        slug_conflict(result, &post.fields.slug).map(Post::from)
    }

    async fn update(&self, post_id: i64, changes: PostChanges) -> Result<Option<Post>, StoreError> {
        let result = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET title = $2, slug = $3, content = $4
            WHERE id = $1
            RETURNING id, author_id, title, slug, content
            "#,
        )
        .bind(post_id)
        .bind(&changes.title)
        .bind(&changes.slug)
        .bind(&changes.content)
        .fetch_optional(&self.pool)
        .await;

        slug_conflict(result, &changes.slug).map(|row| row.map(Post::from))
    }

    async fn delete(&self, post_id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// In-memory post store
#[derive(Default)]
pub struct InMemoryPostStore {
    posts: RwLock<HashMap<i64, Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn slug_taken(posts: &HashMap<i64, Post>, slug: &str, except: Option<i64>) -> bool {
    posts
        .values()
        .any(|post| post.slug == slug && Some(post.id) != except)
}

#[async_trait]
impl ResourceOwnerLookup for InMemoryPostStore {
    fn resource_kind(&self) -> &'static str {
        "Post"
    }

    async fn owner_of(&self, resource_id: i64) -> Result<Option<i64>, StoreError> {
        Ok(self.posts.read().await.get(&resource_id).map(|post| post.author_id))
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn create(&self, post: NewPost) -> Result<Post, StoreError> {
        let mut posts = self.posts.write().await;
        if slug_taken(&posts, &post.fields.slug, None) {
            return Err(StoreError::Duplicate(post.fields.slug));
        }

        let id = posts.keys().max().copied().unwrap_or(0) + 1;
        let stored = Post {
            id,
            author_id: post.author_id,
            title: post.fields.title,
            slug: post.fields.slug,
            content: post.fields.content,
        };
        posts.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, post_id: i64, changes: PostChanges) -> Result<Option<Post>, StoreError> {
        let mut posts = self.posts.write().await;
        if !posts.contains_key(&post_id) {
            return Ok(None);
        }
        if slug_taken(&posts, &changes.slug, Some(post_id)) {
            return Err(StoreError::Duplicate(changes.slug));
        }

        Ok(posts.get_mut(&post_id).map(|post| {
            post.title = changes.title;
            post.slug = changes.slug;
            post.content = changes.content;
            post.clone()
        }))
    }

    async fn delete(&self, post_id: i64) -> Result<bool, StoreError> {
        Ok(self.posts.write().await.remove(&post_id).is_some())
    }
}
