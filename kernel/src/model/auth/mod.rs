pub mod event;

use crate::model::id::UserId;

/// Identity resolved from a bearer token by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    pub user_id: UserId,
    pub email: String,
}

/// Session issued by the identity provider after a password grant.
#[derive(Debug)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: Option<String>,
}
