//! Unified error model for the authorization core.
//! Only two things can go wrong here: an external record that cannot become a principal,
//! and a decision call made with a principal that has no usable site.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthzError {
    /// A required field is absent or a field carries the wrong JSON type.
    #[error("malformed_record: field '{field}': {message}")]
    MalformedRecord { field: String, message: String },
    /// A decision call received an argument it cannot decide on.
    #[error("invalid_argument: {message}")]
    InvalidArgument { message: String },
}

impl AuthzError {
    pub fn code_str(&self) -> &'static str {
        match self {
            AuthzError::MalformedRecord { .. } => "malformed_record",
            AuthzError::InvalidArgument { .. } => "invalid_argument",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AuthzError::MalformedRecord { message, .. } | AuthzError::InvalidArgument { message } => message.as_str(),
        }
    }

    pub fn malformed<F: Into<String>, M: Into<String>>(field: F, msg: M) -> Self {
        AuthzError::MalformedRecord { field: field.into(), message: msg.into() }
    }
    pub fn invalid<M: Into<String>>(msg: M) -> Self { AuthzError::InvalidArgument { message: msg.into() } }

    /// Field name for record errors; `None` for argument errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            AuthzError::MalformedRecord { field, .. } => Some(field.as_str()),
            AuthzError::InvalidArgument { .. } => None,
        }
    }
}

pub type AuthzResult<T> = Result<T, AuthzError>;
