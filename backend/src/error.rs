//! Error handling for the Stockroom inventory server
//!
//! Every error renders as `{ "detail": ... }`: a list of
//! `{loc, msg, type}` issues for validation failures, a plain message
//! otherwise.

use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{ErrorBody, ValidationIssue};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication errors
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Inactive user")]
    InactiveUser,

    #[error("Token expired")]
    TokenExpired,

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Not authenticated")]
    MissingToken,

    #[error("Insufficient permissions to access {0}")]
    InsufficientPermissions(String),

    // Validation errors
    #[error("Validation error: {0:?}")]
    Validation(Vec<ValidationIssue>),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    // Business logic errors
    #[error("{0}")]
    InsufficientStock(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl AppError {
    /// Validation failure on a single body field
    pub fn invalid_field(field: &str, message: &str) -> Self {
        AppError::Validation(vec![ValidationIssue::body_field(field, message, "value_error")])
    }

    /// Not-found error with the resource name capitalized ("warehouse" -> "Warehouse")
    pub fn not_found(resource: &str) -> Self {
        let mut chars = resource.chars();
        let name = match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        };
        AppError::NotFound(name)
    }

    pub fn forbidden(resource: &str) -> Self {
        AppError::InsufficientPermissions(resource.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InactiveUser | AppError::DuplicateEntry(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials
            | AppError::TokenExpired
            | AppError::InvalidToken
            | AppError::MissingToken => StatusCode::UNAUTHORIZED,
            AppError::InsufficientPermissions(_) => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InsufficientStock(_) => StatusCode::CONFLICT,
            AppError::Internal(_) | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            AppError::Validation(issues) => ErrorBody::issues(issues.clone()),
            AppError::DuplicateEntry(field) => {
                ErrorBody::message(format!("A record with this {} already exists", field))
            }
            // Internal details stay in the logs
            AppError::Internal(_) | AppError::InternalError(_) => {
                ErrorBody::message("An internal server error occurred")
            }
            other => ErrorBody::message(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log the error for debugging
        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected ({}): {}", status, self);
        }

        (status, Json(self.body())).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match &rejection {
            JsonRejection::JsonDataError(_) => "type_error",
            JsonRejection::JsonSyntaxError(_) => "json_invalid",
            JsonRejection::MissingJsonContentType(_) => "content_type",
            _ => "body_error",
        };
        AppError::Validation(vec![ValidationIssue {
            loc: vec![shared::LocSegment::Field("body".to_string())],
            msg: rejection.body_text(),
            kind: kind.to_string(),
        }])
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Validation(vec![ValidationIssue {
            loc: vec![shared::LocSegment::Field("body".to_string())],
            msg: rejection.body_text(),
            kind: "form_error".to_string(),
        }])
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(vec![ValidationIssue {
            loc: vec![shared::LocSegment::Field("path".to_string())],
            msg: rejection.body_text(),
            kind: "path_error".to_string(),
        }])
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(vec![ValidationIssue {
            loc: vec![shared::LocSegment::Field("query".to_string())],
            msg: rejection.body_text(),
            kind: "query_error".to_string(),
        }])
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        }
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorDetail;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::not_found("warehouse").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::InsufficientStock("Not enough items in warehouse".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::invalid_field("quantity", "Quantity cannot be negative").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AppError::forbidden("warehouse").status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::MissingToken.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_not_found_capitalizes_resource() {
        assert_eq!(
            AppError::not_found("warehouse item").to_string(),
            "Warehouse item not found"
        );
    }

    #[test]
    fn test_validation_body_lists_issues() {
        let body = AppError::invalid_field("quantity", "Quantity cannot be negative").body();
        match body.detail {
            ErrorDetail::Issues(issues) => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].to_string(), "body.quantity: Quantity cannot be negative");
            }
            other => panic!("unexpected detail: {:?}", other),
        }
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let body = AppError::Internal("lock poisoned".into()).body();
        assert_eq!(body.to_message(), "An internal server error occurred");
    }
}
