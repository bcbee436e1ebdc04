//! Common types used across the API surface

use serde::{Deserialize, Serialize};

/// Pagination parameters for list endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

fn default_limit() -> usize {
    100
}

/// List response: one page of rows plus the total row count
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub count: usize,
}

/// Generic message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One segment of a validation error location, e.g. `["body", "quantity"]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LocSegment {
    Index(i64),
    Field(String),
}

impl std::fmt::Display for LocSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocSegment::Index(i) => write!(f, "{}", i),
            LocSegment::Field(s) => f.write_str(s),
        }
    }
}

/// A single validation failure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationIssue {
    pub loc: Vec<LocSegment>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ValidationIssue {
    /// Issue located at `body.<field>`
    pub fn body_field(field: &str, msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: vec![
                LocSegment::Field("body".to_string()),
                LocSegment::Field(field.to_string()),
            ],
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let loc: Vec<String> = self.loc.iter().map(|s| s.to_string()).collect();
        if loc.is_empty() {
            f.write_str(&self.msg)
        } else {
            write!(f, "{}: {}", loc.join("."), self.msg)
        }
    }
}

/// The `detail` of an error body: a list of issues for validation
/// failures, a plain message for everything else
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ErrorDetail {
    Issues(Vec<ValidationIssue>),
    Message(String),
}

/// Error response body: `{ "detail": ... }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub detail: ErrorDetail,
}

impl ErrorBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            detail: ErrorDetail::Message(message.into()),
        }
    }

    pub fn issues(issues: Vec<ValidationIssue>) -> Self {
        Self {
            detail: ErrorDetail::Issues(issues),
        }
    }

    /// Human-readable rendering of the detail
    pub fn to_message(&self) -> String {
        match &self.detail {
            ErrorDetail::Message(msg) => msg.clone(),
            ErrorDetail::Issues(issues) => issues
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}
