use super::{
    auth, booking::build_booking_routers, health::build_health_check_routers,
    review::build_review_routers, staff::build_staff_routers,
};
use axum::Router;
use registry::AppRegistry;

pub fn routes() -> Router<AppRegistry> {
    let router = Router::new()
        .merge(build_health_check_routers())
        .merge(build_staff_routers())
        .merge(build_booking_routers())
        .merge(build_review_routers())
        .merge(auth::routes());
    Router::new().nest("/api/v1", router)
}
