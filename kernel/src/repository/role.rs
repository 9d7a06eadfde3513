use crate::model::{id::UserId, role::Role};
use async_trait::async_trait;
use shared::error::AppResult;

/// Access to the role records the identity provider seeds on signup.
/// Authorization reads go through here on every request, so a revoked
/// admin is locked out even while their session token is still valid.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Option<Role>>;
    async fn update(&self, user_id: UserId, role: Role) -> AppResult<()>;
}
