/**
 * Ownership Checks
 *
 * Decides whether a caller may mutate a resource. The rule is a single
 * comparison: the caller owns the resource, or the caller is an admin.
 *
 * Reads are not gated here; they only require authentication.
 */

use crate::backend::auth::resources::ResourceOwnerLookup;
use crate::backend::error::{AuthError, BackendError};
use crate::shared::CallerIdentity;

/// Outcome of an ownership check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationDecision {
    Allow,
    Deny,
}

impl AuthorizationDecision {
    /// `Deny` becomes `AuthError::PermissionDenied`
    pub fn into_result(self) -> Result<(), AuthError> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny => Err(AuthError::PermissionDenied),
        }
    }
}

/// Allow iff the caller owns the resource or is an admin
pub fn authorize(caller: &CallerIdentity, resource_owner_id: i64) -> AuthorizationDecision {
    if caller.subject_id == resource_owner_id || caller.is_admin {
        AuthorizationDecision::Allow
    } else {
        tracing::warn!(
            "Subject {} denied access to resource owned by {}",
            caller.subject_id,
            resource_owner_id
        );
        AuthorizationDecision::Deny
    }
}

/// Look up a resource's owner and check the caller against it
///
/// # Errors
///
/// * `NotFound` - the lookup has no such resource
/// * `Auth(PermissionDenied)` - the caller is neither owner nor admin
/// * `Store` - the lookup itself failed
pub async fn authorize_resource<L>(
    lookup: &L,
    caller: &CallerIdentity,
    resource_id: i64,
) -> Result<(), BackendError>
where
    L: ResourceOwnerLookup + ?Sized,
{
    let owner_id = lookup
        .owner_of(resource_id)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("{} not found", lookup.resource_kind())))?;

    authorize(caller, owner_id).into_result()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::resources::{InMemoryPostStore, PostStore};
    use crate::shared::{NewPost, PostChanges};
    use assert_matches::assert_matches;

    fn caller(subject_id: i64, is_admin: bool) -> CallerIdentity {
        CallerIdentity { subject_id, is_admin }
    }

    #[test]
    fn test_owner_allowed() {
        assert_eq!(authorize(&caller(5, false), 5), AuthorizationDecision::Allow);
    }

    #[test]
    fn test_non_owner_denied() {
        let decision = authorize(&caller(5, false), 9);
        assert_eq!(decision, AuthorizationDecision::Deny);
        assert_eq!(decision.into_result(), Err(AuthError::PermissionDenied));
    }

    #[test]
    fn test_admin_allowed_on_any_resource() {
        assert_eq!(authorize(&caller(5, true), 9), AuthorizationDecision::Allow);
        assert_eq!(authorize(&caller(5, true), 5), AuthorizationDecision::Allow);
    }

    #[tokio::test]
    async fn test_authorize_resource() {
        let posts = InMemoryPostStore::new();
        let post_id = posts
            .create(NewPost {
                author_id: 9,
                fields: PostChanges {
                    title: "Title".to_string(),
                    slug: "title".to_string(),
                    content: "Body".to_string(),
                },
            })
            .await
            .unwrap()
            .id;

        assert!(authorize_resource(&posts, &caller(9, false), post_id).await.is_ok());
        assert!(authorize_resource(&posts, &caller(1, true), post_id).await.is_ok());
        assert_matches!(
            authorize_resource(&posts, &caller(5, false), post_id).await,
            Err(BackendError::Auth(AuthError::PermissionDenied))
        );
        assert_matches!(
            authorize_resource(&posts, &caller(9, false), post_id + 100).await,
            Err(BackendError::NotFound { .. })
        );
    }
}
