use axum::routing::get;
use axum::Router;
use registry::AppRegistry;

use crate::handler::review::show_reviews;

pub fn build_review_routers() -> Router<AppRegistry> {
    let review_routers = Router::new().route("/", get(show_reviews));

    Router::new().nest("/reviews", review_routers)
}
