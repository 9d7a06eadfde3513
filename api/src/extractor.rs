use axum::extract::{FromRef, FromRequest, FromRequestParts};
use axum::http::request::Parts;
use axum::{async_trait, RequestPartsExt};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use kernel::model::auth::AuthIdentity;
use kernel::model::id::UserId;
use kernel::model::role::Role;
use registry::AppRegistry;
use shared::error::AppError;

/// Caller resolved from the bearer token, carrying the role read from the
/// role table. The role comes from the database on every request, not from
/// the token, so a revoked admin is rejected immediately.
pub struct AuthenticatedUser {
    pub identity: AuthIdentity,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn id(&self) -> UserId {
        self.identity.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    AppRegistry: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let registry = AppRegistry::from_ref(state);
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| {
                AppError::UnauthenticatedError("missing or malformed bearer token".into())
            })?;

        let identity = registry
            .identity_provider()
            .verify_token(bearer.token())
            .await?;
        let role = registry
            .role_repository()
            .find_by_user_id(identity.user_id)
            .await?
            .unwrap_or_default();

        Ok(Self { identity, role })
    }
}

/// An authenticated caller whose role record says `admin`. Used on the
/// staff management routes so the authorization decision happens before
/// the request body is even parsed.
pub struct AuthorizedAdmin(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for AuthorizedAdmin
where
    S: Send + Sync,
    AppRegistry: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;
        if !user.is_admin() {
            return Err(AppError::ForbiddenOperation(
                "administrator role is required".into(),
            ));
        }
        Ok(Self(user))
    }
}

/// `axum::Json` with the rejection remapped so malformed bodies come back
/// as the same `{"error": ...}` shape as every other failure.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
