use crate::model::staff::{event::CreateStaffProfile, StaffMember};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait StaffRepository: Send + Sync {
    async fn create(&self, event: CreateStaffProfile) -> AppResult<()>;
    async fn find_all(&self) -> AppResult<Vec<StaffMember>>;
}
