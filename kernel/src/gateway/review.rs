use crate::model::location::Location;
use crate::model::review::ReviewSummary;
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ReviewProvider: Send + Sync {
    async fn fetch(&self, location: Location) -> AppResult<ReviewSummary>;
}
