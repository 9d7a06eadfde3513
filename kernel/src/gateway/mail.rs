use crate::model::mail::OutgoingEmail;
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> AppResult<()>;
}
