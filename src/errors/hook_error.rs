use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HookErrorKind {
    InvalidParams,
    MissingParameter,
    NotFound,
    Timeout,
    Transport,
    UnexpectedStatus,
    Internal,
}

#[derive(Debug, Clone, Serialize)]
pub struct HookError {
    pub kind: HookErrorKind,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl HookError {
    pub fn new(kind: HookErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(HookErrorKind::InvalidParams, "INVALID_PARAMS", message)
    }

    pub fn missing_positional(name: &str, position: usize) -> Self {
        Self::new(
            HookErrorKind::MissingParameter,
            "MISSING_PARAMETER",
            format!(
                "Missing required parameter: {} (position {})",
                name, position
            ),
        )
        .with_details(serde_json::json!({"name": name, "position": position}))
    }

    pub fn missing_option(name: &str, flag: &str) -> Self {
        Self::new(
            HookErrorKind::MissingParameter,
            "MISSING_PARAMETER",
            format!("Missing required option: {} (--{})", name, flag),
        )
        .with_details(serde_json::json!({"name": name, "flag": flag}))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(HookErrorKind::NotFound, "NOT_FOUND", message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(HookErrorKind::Timeout, "TIMEOUT", message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(HookErrorKind::Transport, "TRANSPORT", message)
    }

    pub fn unexpected_status(status: u16) -> Self {
        Self::new(
            HookErrorKind::UnexpectedStatus,
            "UNEXPECTED_STATUS",
            format!("Request failed with status {}", status),
        )
        .with_details(serde_json::json!({"status": status}))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(HookErrorKind::Internal, "INTERNAL", message)
    }
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for HookError {}

impl From<std::io::Error> for HookError {
    fn from(err: std::io::Error) -> Self {
        HookError::internal(err.to_string())
    }
}
