use crate::model::staff::LocationName;
use derive_new::new;
use kernel::model::location::Location;
use kernel::model::review::{Review, ReviewSummary};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct ReviewListQuery {
    pub location: Option<String>,
}

#[derive(new)]
pub struct ReviewSummaryWithLocation(Location, ReviewSummary);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummaryResponse {
    pub location: LocationName,
    pub rating: f64,
    pub total: i64,
    pub reviews: Vec<ReviewResponse>,
}

impl From<ReviewSummaryWithLocation> for ReviewSummaryResponse {
    fn from(value: ReviewSummaryWithLocation) -> Self {
        let ReviewSummaryWithLocation(location, ReviewSummary { rating, total, reviews }) = value;
        Self {
            location: LocationName::from(location),
            rating,
            total,
            reviews: reviews.into_iter().map(ReviewResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub author: String,
    pub rating: i32,
    pub text: String,
    pub posted: String,
}

impl From<Review> for ReviewResponse {
    fn from(value: Review) -> Self {
        let Review {
            author,
            rating,
            text,
            posted,
        } = value;
        Self {
            author,
            rating,
            text,
            posted,
        }
    }
}
