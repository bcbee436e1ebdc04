//! Client error types
//!
//! Every non-2xx response is classified by status code. The server's
//! `detail` becomes the error's `Display`, so a caller can show it as is.

use reqwest::StatusCode;
use shared::{ErrorBody, ErrorDetail, ValidationIssue};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// 422: malformed or out-of-range input
    #[error("{message}")]
    Validation {
        message: String,
        issues: Vec<ValidationIssue>,
    },

    /// 404: unknown id, or a location that holds no link for the item
    #[error("{0}")]
    NotFound(String),

    /// 409: not enough stock at the source location
    #[error("{0}")]
    InsufficientStock(String),

    /// 401
    #[error("{0}")]
    Unauthorized(String),

    /// 403
    #[error("{0}")]
    Forbidden(String),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Classify an error response from its status and raw body
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(body).ok();
        let message = match &parsed {
            Some(body) => body.to_message(),
            None if body.trim().is_empty() => status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
            None => body.trim().to_string(),
        };

        match status {
            StatusCode::UNPROCESSABLE_ENTITY => {
                let issues = match parsed.map(|b| b.detail) {
                    Some(ErrorDetail::Issues(issues)) => issues,
                    _ => Vec::new(),
                };
                ClientError::Validation { message, issues }
            }
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::CONFLICT => ClientError::InsufficientStock(message),
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            other => ClientError::Rejected {
                status: other.as_u16(),
                message,
            },
        }
    }

    /// Bad input or an unknown id
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation { .. } | ClientError::NotFound(_))
    }

    /// Rejected because the source location does not hold enough units
    pub fn is_insufficient_stock(&self) -> bool {
        matches!(self, ClientError::InsufficientStock(_))
    }

    /// HTTP status of a server rejection, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Validation { .. } => Some(422),
            ClientError::NotFound(_) => Some(404),
            ClientError::InsufficientStock(_) => Some(409),
            ClientError::Unauthorized(_) => Some(401),
            ClientError::Forbidden(_) => Some(403),
            ClientError::Rejected { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status().map(|s| s.as_u16()),
            ClientError::Decode(_) => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
