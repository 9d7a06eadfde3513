use crate::model::review::{ReviewListQuery, ReviewSummaryResponse, ReviewSummaryWithLocation};
use axum::extract::{Query, State};
use axum::Json;
use kernel::model::location::Location;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};
use std::str::FromStr;
use strum::VariantNames;

/// Public endpoint backing the reviews section of the website. Without a
/// location parameter the combined listing for both sites is returned.
pub async fn show_reviews(
    Query(query): Query<ReviewListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ReviewSummaryResponse>> {
    let location = match query.location.as_deref() {
        Some(raw) => Location::from_str(raw).map_err(|_| {
            AppError::ValidationError(format!(
                "location: must be one of {}",
                Location::VARIANTS.join(", ")
            ))
        })?,
        None => Location::Both,
    };

    registry
        .review_provider()
        .fetch(location)
        .await
        .map(|summary| {
            ReviewSummaryResponse::from(ReviewSummaryWithLocation::new(location, summary))
        })
        .map(Json)
}
