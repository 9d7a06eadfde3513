use async_trait::async_trait;
use kernel::gateway::identity::IdentityProvider;
use kernel::model::auth::event::{CreateIdentity, SignIn};
use kernel::model::auth::{AuthIdentity, IssuedToken};
use kernel::model::id::UserId;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use shared::config::IdentityConfig;
use shared::error::{AppError, AppResult};

/// HTTP client for the identity provider. Caller tokens authenticate the
/// verification and sign-in calls; the admin endpoints carry the service
/// key and must never be reachable with a caller token.
pub struct IdentityProviderImpl {
    client: Client,
    config: IdentityConfig,
}

impl IdentityProviderImpl {
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[derive(Deserialize)]
struct ProviderUser {
    id: String,
    email: String,
}

#[derive(Deserialize)]
struct ProviderSession {
    access_token: String,
    token_type: String,
    expires_in: i64,
    refresh_token: Option<String>,
}

impl TryFrom<ProviderUser> for AuthIdentity {
    type Error = AppError;

    fn try_from(value: ProviderUser) -> Result<Self, Self::Error> {
        let user_id = value.id.parse::<UserId>().map_err(|_| {
            AppError::ExternalServiceError("identity provider returned a malformed user id".into())
        })?;
        Ok(AuthIdentity {
            user_id,
            email: value.email,
        })
    }
}

#[async_trait]
impl IdentityProvider for IdentityProviderImpl {
    async fn verify_token(&self, token: &str) -> AppResult<AuthIdentity> {
        let url = format!("{}/user", self.config.base_url);
        let res = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(unreachable_provider)?;

        match res.status() {
            s if s.is_success() => {
                let user: ProviderUser = res.json().await.map_err(malformed_provider_body)?;
                AuthIdentity::try_from(user)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::UnauthenticatedError(
                "session token is invalid or expired".into(),
            )),
            _ => Err(AppError::ExternalServiceError(error_message(res).await)),
        }
    }

    async fn sign_in(&self, event: SignIn) -> AppResult<IssuedToken> {
        let url = format!("{}/token?grant_type=password", self.config.base_url);
        let res = self
            .client
            .post(url)
            .json(&serde_json::json!({
                "email": event.email,
                "password": event.password,
            }))
            .send()
            .await
            .map_err(unreachable_provider)?;

        match res.status() {
            s if s.is_success() => {
                let session: ProviderSession = res.json().await.map_err(malformed_provider_body)?;
                Ok(IssuedToken {
                    access_token: session.access_token,
                    token_type: session.token_type,
                    expires_in: session.expires_in,
                    refresh_token: session.refresh_token,
                })
            }
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => Err(
                AppError::UnauthenticatedError("invalid email or password".into()),
            ),
            _ => Err(AppError::ExternalServiceError(error_message(res).await)),
        }
    }

    async fn create_identity(&self, event: CreateIdentity) -> AppResult<UserId> {
        let url = format!("{}/admin/users", self.config.base_url);
        let res = self
            .client
            .post(url)
            .bearer_auth(&self.config.service_key)
            .json(&serde_json::json!({
                "email": event.email,
                "password": event.password,
                "email_confirm": true,
            }))
            .send()
            .await
            .map_err(unreachable_provider)?;

        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(error_message(res).await));
        }

        let user: ProviderUser = res.json().await.map_err(malformed_provider_body)?;
        user.id.parse::<UserId>().map_err(|_| {
            AppError::ExternalServiceError("identity provider returned a malformed user id".into())
        })
    }

    async fn delete_identity(&self, user_id: UserId) -> AppResult<()> {
        let url = format!("{}/admin/users/{}", self.config.base_url, user_id);
        let res = self
            .client
            .delete(url)
            .bearer_auth(&self.config.service_key)
            .send()
            .await
            .map_err(unreachable_provider)?;

        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(error_message(res).await));
        }

        Ok(())
    }
}

fn unreachable_provider(e: reqwest::Error) -> AppError {
    AppError::ExternalServiceError(format!("identity provider unreachable: {e}"))
}

fn malformed_provider_body(e: reqwest::Error) -> AppError {
    AppError::ExternalServiceError(format!("identity provider sent an unexpected body: {e}"))
}

/// Pulls the human-readable message out of a provider error body. The
/// provider is inconsistent about the key it uses, so try them in order.
async fn error_message(res: Response) -> String {
    let status = res.status();
    let body = res.json::<serde_json::Value>().await.ok();
    provider_message(status, body)
}

fn provider_message(status: StatusCode, body: Option<serde_json::Value>) -> String {
    body.as_ref()
        .and_then(|body| {
            body.get("msg")
                .or_else(|| body.get("message"))
                .or_else(|| body.get("error_description"))
                .or_else(|| body.get("error"))
        })
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("identity provider returned {status}"))
}
