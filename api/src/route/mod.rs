pub mod auth;
pub mod booking;
pub mod health;
pub mod review;
pub mod staff;
pub mod v1;

use axum::Router;
use registry::AppRegistry;
use tower_http::cors::{Any, CorsLayer};

/// The full application router. The website is served from a different
/// origin, so CORS stays wide open and preflights are answered for every
/// route.
pub fn app_router(registry: AppRegistry) -> Router {
    Router::new()
        .merge(v1::routes())
        .layer(cors())
        .with_state(registry)
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
