use axum::routing::post;
use axum::Router;
use registry::AppRegistry;

use crate::handler::booking::submit_booking;

pub fn build_booking_routers() -> Router<AppRegistry> {
    let booking_routers = Router::new().route("/", post(submit_booking));

    Router::new().nest("/bookings", booking_routers)
}
