use serde::{Deserialize, Serialize};

/// Aggregate rating plus the most recent reviews for one place listing.
/// Serde derives are here because the adapter caches summaries as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSummary {
    pub rating: f64,
    pub total: i64,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub author: String,
    pub rating: i32,
    pub text: String,
    pub posted: String,
}
