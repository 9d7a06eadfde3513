use crate::model::auth::event::{CreateIdentity, SignIn};
use crate::model::auth::{AuthIdentity, IssuedToken};
use crate::model::id::UserId;
use async_trait::async_trait;
use shared::error::AppResult;

/// The external identity provider. `verify_token` and `sign_in` run with
/// caller-supplied credentials; `create_identity` and `delete_identity`
/// use the privileged service key.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves a bearer token to its identity. An invalid or expired
    /// token yields `UnauthenticatedError`, any other provider failure
    /// `ExternalServiceError`.
    async fn verify_token(&self, token: &str) -> AppResult<AuthIdentity>;
    async fn sign_in(&self, event: SignIn) -> AppResult<IssuedToken>;
    async fn create_identity(&self, event: CreateIdentity) -> AppResult<UserId>;
    async fn delete_identity(&self, user_id: UserId) -> AppResult<()>;
}
