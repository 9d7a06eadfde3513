use axum::routing::{get, post};
use axum::Router;
use registry::AppRegistry;

use crate::handler::auth::{login, verify_session};

pub fn routes() -> Router<AppRegistry> {
    let auth_routers = Router::new()
        .route("/login", post(login))
        .route("/verify", get(verify_session));

    Router::new().nest("/auth", auth_routers)
}
