//! # Error Handling
//!
//! Error types shared by the call layer and the bootstrap flow.

use std::error::Error as StdError;

use thiserror::Error;

/// Faults raised by the call layer while talking to the account service.
#[derive(Debug, Clone, Error)]
pub enum CallError {
    /// Request never produced a response (connect failure, timeout, reset)
    #[error("{details}")]
    Network { details: String, retryable: bool },
    /// Non-success HTTP status from the account service endpoint
    #[error("HTTP error {status}: {}", .body.as_deref().unwrap_or("No body"))]
    Http { status: u16, body: Option<String> },
    /// The account service answered the call with an error message
    #[error("{message}")]
    Service { method: String, message: String },
    /// Response could not be decoded into the expected shape
    #[error("Malformed response: {details}")]
    MalformedResponse { details: String },
}

impl CallError {
    pub fn network<S: Into<String>>(details: S) -> Self {
        Self::Network {
            details: details.into(),
            retryable: true,
        }
    }

    pub fn service<M: Into<String>, S: Into<String>>(method: M, message: S) -> Self {
        Self::Service {
            method: method.into(),
            message: message.into(),
        }
    }

    pub fn malformed<S: Into<String>>(details: S) -> Self {
        Self::MalformedResponse {
            details: details.into(),
        }
    }

    /// Whether the same call could succeed if tried again.
    pub fn is_retryable(&self) -> bool {
        match self {
            CallError::Network { retryable, .. } => *retryable,
            CallError::Http { status, .. } => *status >= 500,
            CallError::Service { .. } | CallError::MalformedResponse { .. } => false,
        }
    }

    /// Message suitable for appending to a user-facing notice, if there is one.
    pub fn detail(&self) -> Option<String> {
        let message = self.to_string();
        let trimmed = message.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

impl From<reqwest::Error> for CallError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return CallError::malformed(error.to_string());
        }
        if let Some(status) = error.status() {
            return CallError::Http {
                status: status.as_u16(),
                body: None,
            };
        }
        let cause = if error.is_timeout() {
            "request timeout"
        } else if error.is_connect() {
            "connection refused or unreachable"
        } else {
            "network error"
        };
        CallError::Network {
            details: format!("{cause}: {}", error_chain(&error)),
            retryable: error.is_timeout() || error.is_connect(),
        }
    }
}

/// Display of an error followed by each of its sources, joined with `": "`.
fn error_chain(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

impl From<serde_json::Error> for CallError {
    fn from(error: serde_json::Error) -> Self {
        CallError::malformed(error.to_string())
    }
}

/// Reasons a submission is refused before any call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("submission already in progress")]
    Busy,
    #[error("url and macaroon are required")]
    Incomplete,
}
