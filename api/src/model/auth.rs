use crate::extractor::AuthenticatedUser;
use crate::model::staff::RoleName;
use garde::Validate;
use kernel::model::auth::event::SignIn;
use kernel::model::auth::IssuedToken;
use kernel::model::id::UserId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[garde(length(min = 1))]
    pub email: String,
    #[garde(length(min = 1))]
    pub password: String,
}

impl From<LoginRequest> for SignIn {
    fn from(value: LoginRequest) -> Self {
        let LoginRequest { email, password } = value;
        Self { email, password }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: Option<String>,
}

impl From<IssuedToken> for AccessTokenResponse {
    fn from(value: IssuedToken) -> Self {
        let IssuedToken {
            access_token,
            token_type,
            expires_in,
            refresh_token,
        } = value;
        Self {
            access_token,
            token_type,
            expires_in,
            refresh_token,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifySessionResponse {
    pub success: bool,
    pub user: SessionUserResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUserResponse {
    pub id: UserId,
    pub email: String,
    pub role: RoleName,
}

impl From<AuthenticatedUser> for VerifySessionResponse {
    fn from(value: AuthenticatedUser) -> Self {
        let AuthenticatedUser { identity, role } = value;
        Self {
            success: true,
            user: SessionUserResponse {
                id: identity.user_id,
                email: identity.email,
                role: RoleName::from(role),
            },
        }
    }
}
