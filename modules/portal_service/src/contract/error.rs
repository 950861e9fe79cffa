//! Contract error types for the portal service
//!
//! These errors are transport-agnostic and used for inter-module communication.

use thiserror::Error;

/// Portal service domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortalError {
    /// No valid session on a gated operation
    #[error("Unauthorized")]
    Unauthorized,

    /// Missing or malformed input
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Entity does not exist
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// Underlying store failure
    #[error("Store error: {message}")]
    Store { message: String },
}

impl PortalError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.to_string(),
        }
    }

    pub fn store(error: impl std::fmt::Display) -> Self {
        Self::Store {
            message: error.to_string(),
        }
    }
}

/// Session resolver errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Submitted access code matches no configured tenant
    #[error("Invalid access code")]
    InvalidCode,

    /// Credential could not be issued
    #[error("session token error: {0}")]
    Token(String),
}
