use crate::redis::KeyValueStore;
use async_trait::async_trait;
use derive_new::new;
use kernel::gateway::review::ReviewProvider;
use kernel::model::location::Location;
use kernel::model::review::{Review, ReviewSummary};
use reqwest::Client;
use serde::Deserialize;
use shared::config::ReviewsConfig;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

/// Client for the place-reviews API. Hits the metered upstream on every
/// call; the registry wraps it in [`CachedReviewProvider`] so the public
/// site does not.
pub struct ReviewProviderImpl {
    client: Client,
    config: ReviewsConfig,
}

impl ReviewProviderImpl {
    pub fn new(config: ReviewsConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    async fn fetch_place(&self, place_id: &str) -> AppResult<ReviewSummary> {
        let res = self
            .client
            .get(&self.config.api_url)
            .query(&[
                ("place_id", place_id),
                ("fields", "rating,user_ratings_total,reviews"),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("reviews api unreachable: {e}")))?;

        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "reviews api returned {}",
                res.status()
            )));
        }

        let body: PlaceDetailsBody = res.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("reviews api sent an unexpected body: {e}"))
        })?;
        if body.status != "OK" {
            return Err(AppError::ExternalServiceError(format!(
                "reviews api status {}",
                body.status
            )));
        }
        let details = body
            .result
            .ok_or_else(|| AppError::ExternalServiceError("reviews api sent no result".into()))?;

        Ok(ReviewSummary::from(details))
    }
}

#[async_trait]
impl ReviewProvider for ReviewProviderImpl {
    async fn fetch(&self, location: Location) -> AppResult<ReviewSummary> {
        match location {
            Location::LocationA => self.fetch_place(&self.config.place_id_a).await,
            Location::LocationB => self.fetch_place(&self.config.place_id_b).await,
            Location::Both => {
                let a = self.fetch_place(&self.config.place_id_a).await?;
                let b = self.fetch_place(&self.config.place_id_b).await?;
                Ok(merge_summaries(a, b))
            }
        }
    }
}

/// Cache-aside layer over any review source. A broken cache degrades to
/// direct fetches instead of failing the request.
#[derive(new)]
pub struct CachedReviewProvider {
    kv: Arc<dyn KeyValueStore>,
    inner: Arc<dyn ReviewProvider>,
    ttl: u64,
}

#[async_trait]
impl ReviewProvider for CachedReviewProvider {
    async fn fetch(&self, location: Location) -> AppResult<ReviewSummary> {
        let cache_key = format!("reviews:{}", location.as_ref());

        match self.kv.get(&cache_key).await {
            Ok(Some(cached)) => {
                if let Ok(summary) = serde_json::from_str(&cached) {
                    return Ok(summary);
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error.message = %e, "review cache read failed"),
        }

        let summary = self.inner.fetch(location).await?;

        match serde_json::to_string(&summary) {
            Ok(encoded) => {
                if let Err(e) = self.kv.set_ex(&cache_key, &encoded, self.ttl).await {
                    tracing::warn!(error.message = %e, "review cache write failed");
                }
            }
            Err(e) => tracing::warn!(error.message = %e, "review summary not cacheable"),
        }

        Ok(summary)
    }
}

#[derive(Deserialize)]
struct PlaceDetailsBody {
    result: Option<PlaceDetails>,
    status: String,
}

#[derive(Deserialize)]
struct PlaceDetails {
    rating: Option<f64>,
    user_ratings_total: Option<i64>,
    reviews: Option<Vec<PlaceReview>>,
}

#[derive(Deserialize)]
struct PlaceReview {
    author_name: String,
    rating: Option<i32>,
    text: Option<String>,
    relative_time_description: Option<String>,
}

impl From<PlaceDetails> for ReviewSummary {
    fn from(value: PlaceDetails) -> Self {
        let PlaceDetails {
            rating,
            user_ratings_total,
            reviews,
        } = value;
        ReviewSummary {
            rating: rating.unwrap_or_default(),
            total: user_ratings_total.unwrap_or_default(),
            reviews: reviews
                .unwrap_or_default()
                .into_iter()
                .map(Review::from)
                .collect(),
        }
    }
}

impl From<PlaceReview> for Review {
    fn from(value: PlaceReview) -> Self {
        let PlaceReview {
            author_name,
            rating,
            text,
            relative_time_description,
        } = value;
        Review {
            author: author_name,
            rating: rating.unwrap_or_default(),
            text: text.unwrap_or_default(),
            posted: relative_time_description.unwrap_or_default(),
        }
    }
}

/// Combined view for the "both locations" query: review lists concatenate
/// and the rating is weighted by each listing's review count.
fn merge_summaries(a: ReviewSummary, b: ReviewSummary) -> ReviewSummary {
    let total = a.total + b.total;
    let rating = if total > 0 {
        (a.rating * a.total as f64 + b.rating * b.total as f64) / total as f64
    } else {
        0.0
    };
    let mut reviews = a.reviews;
    reviews.extend(b.reviews);
    ReviewSummary {
        rating,
        total,
        reviews,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn summary(rating: f64, total: i64, authors: &[&str]) -> ReviewSummary {
        ReviewSummary {
            rating,
            total,
            reviews: authors
                .iter()
                .map(|a| Review {
                    author: a.to_string(),
                    rating: 5,
                    text: "Great place".into(),
                    posted: "a week ago".into(),
                })
                .collect(),
        }
    }

    #[derive(Default)]
    struct StubKeyValueStore {
        entries: Mutex<HashMap<String, String>>,
        broken: bool,
    }

    impl StubKeyValueStore {
        fn broken() -> Self {
            Self {
                broken: true,
                ..Self::default()
            }
        }

        fn warmed_with(key: &str, summary: &ReviewSummary) -> Self {
            let stub = Self::default();
            stub.entries
                .lock()
                .unwrap()
                .insert(key.into(), serde_json::to_string(summary).unwrap());
            stub
        }

        fn unreachable() -> shared::error::AppError {
            redis::RedisError::from((redis::ErrorKind::IoError, "connection refused")).into()
        }
    }

    #[async_trait]
    impl KeyValueStore for StubKeyValueStore {
        async fn get(&self, key: &str) -> AppResult<Option<String>> {
            if self.broken {
                return Err(Self::unreachable());
            }
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        async fn set_ex(&self, key: &str, value: &str, _ttl: u64) -> AppResult<()> {
            if self.broken {
                return Err(Self::unreachable());
            }
            self.entries
                .lock()
                .unwrap()
                .insert(key.into(), value.into());
            Ok(())
        }
    }

    struct StubUpstream {
        fetches: AtomicUsize,
    }

    impl StubUpstream {
        fn new() -> Self {
            Self {
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ReviewProvider for StubUpstream {
        async fn fetch(&self, _location: Location) -> AppResult<ReviewSummary> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(summary(4.5, 20, &["Dana"]))
        }
    }

    fn cached(kv: Arc<StubKeyValueStore>, upstream: Arc<StubUpstream>) -> CachedReviewProvider {
        CachedReviewProvider::new(kv, upstream, 600)
    }

    #[tokio::test]
    async fn a_warm_cache_answers_without_an_upstream_call() {
        let warm = summary(4.8, 33, &["Maya"]);
        let kv = Arc::new(StubKeyValueStore::warmed_with("reviews:location_a", &warm));
        let upstream = Arc::new(StubUpstream::new());

        let got = cached(kv, upstream.clone())
            .fetch(Location::LocationA)
            .await
            .unwrap();

        assert_eq!(got.total, 33);
        assert_eq!(upstream.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn a_cache_miss_fetches_once_and_stores_the_summary() {
        let kv = Arc::new(StubKeyValueStore::default());
        let upstream = Arc::new(StubUpstream::new());

        let got = cached(kv.clone(), upstream.clone())
            .fetch(Location::LocationB)
            .await
            .unwrap();

        assert_eq!(got.total, 20);
        assert_eq!(upstream.fetches.load(Ordering::SeqCst), 1);
        let entries = kv.entries.lock().unwrap();
        let stored: ReviewSummary =
            serde_json::from_str(entries.get("reviews:location_b").unwrap()).unwrap();
        assert_eq!(stored.total, 20);
    }

    #[tokio::test]
    async fn a_broken_cache_still_serves_the_upstream_summary() {
        let kv = Arc::new(StubKeyValueStore::broken());
        let upstream = Arc::new(StubUpstream::new());

        let got = cached(kv, upstream.clone())
            .fetch(Location::Both)
            .await
            .unwrap();

        assert_eq!(got.total, 20);
        assert_eq!(upstream.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn an_unparsable_cache_entry_falls_through_to_the_upstream() {
        let kv = Arc::new(StubKeyValueStore::default());
        kv.entries
            .lock()
            .unwrap()
            .insert("reviews:location_a".into(), "not json".into());
        let upstream = Arc::new(StubUpstream::new());

        let got = cached(kv, upstream.clone())
            .fetch(Location::LocationA)
            .await
            .unwrap();

        assert_eq!(got.total, 20);
        assert_eq!(upstream.fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn merged_rating_is_weighted_by_review_count() {
        let merged = merge_summaries(summary(4.0, 10, &["a"]), summary(5.0, 30, &["b"]));
        assert_eq!(merged.total, 40);
        assert!((merged.rating - 4.75).abs() < f64::EPSILON);
        assert_eq!(merged.reviews.len(), 2);
    }

    #[test]
    fn merging_two_empty_listings_yields_a_zero_rating() {
        let merged = merge_summaries(summary(0.0, 0, &[]), summary(0.0, 0, &[]));
        assert_eq!(merged.total, 0);
        assert_eq!(merged.rating, 0.0);
    }

    #[test]
    fn a_sparse_provider_body_still_parses() {
        let details: PlaceDetailsBody =
            serde_json::from_str(r#"{ "status": "OK", "result": { "rating": 4.8 } }"#).unwrap();
        let summary = ReviewSummary::from(details.result.unwrap());
        assert_eq!(summary.rating, 4.8);
        assert_eq!(summary.total, 0);
        assert!(summary.reviews.is_empty());
    }
}
