//! HTTP handlers for login and user accounts

use axum::{extract::State, Form, Json};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use shared::{Token, UserCreate, UserPublic};

use crate::error::{AppError, AppResult};
use crate::middleware::{CurrentUser, Superuser};
use crate::services::AuthService;
use crate::AppState;

/// OAuth2 password-flow login form
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Exchange email and password for an access token
pub async fn login_access_token(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<LoginForm>, AppError>,
) -> AppResult<Json<Token>> {
    let service = AuthService::new(state.ledger, &state.config);
    let token = service.login(&form.username, &form.password).await?;
    Ok(Json(token))
}

/// Get the authenticated user
pub async fn read_user_me(current_user: CurrentUser) -> Json<UserPublic> {
    Json(current_user.0)
}

/// Create a user account (superuser only)
pub async fn create_user(
    State(state): State<AppState>,
    _admin: Superuser,
    WithRejection(Json(input), _): WithRejection<Json<UserCreate>, AppError>,
) -> AppResult<Json<UserPublic>> {
    let service = AuthService::new(state.ledger, &state.config);
    let user = service.create_user(input).await?;
    Ok(Json(user))
}
