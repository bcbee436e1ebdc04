//! Authentication extractors
//!
//! Bearer-token authentication and the superuser gate used by admin routes

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use shared::UserPublic;

use crate::error::AppError;
use crate::services::AuthService;
use crate::AppState;

/// Extractor for the authenticated user.
/// Rejects with 401 when the bearer token is missing, invalid or expired.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub UserPublic);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::MissingToken)?;

        let service = AuthService::new(state.ledger.clone(), &state.config);
        let user = service.current_user(bearer.token()).await?;
        Ok(CurrentUser(user))
    }
}

/// Extractor that only admits superusers (403 for everyone else)
#[derive(Clone, Debug)]
pub struct Superuser(pub UserPublic);

#[async_trait]
impl FromRequestParts<AppState> for Superuser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if !user.is_superuser {
            tracing::debug!(user_id = user.id, path = %parts.uri.path(), "Superuser required");
            return Err(AppError::forbidden(parts.uri.path()));
        }
        Ok(Superuser(user))
    }
}
