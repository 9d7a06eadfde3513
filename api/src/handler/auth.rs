use crate::extractor::{AppJson, AuthenticatedUser};
use crate::model::auth::{AccessTokenResponse, LoginRequest, VerifySessionResponse};
use axum::extract::State;
use axum::Json;
use garde::Validate;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn login(
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<Json<AccessTokenResponse>> {
    req.validate(&())?;

    registry
        .identity_provider()
        .sign_in(req.into())
        .await
        .map(AccessTokenResponse::from)
        .map(Json)
}

pub async fn verify_session(user: AuthenticatedUser) -> Json<VerifySessionResponse> {
    Json(VerifySessionResponse::from(user))
}
