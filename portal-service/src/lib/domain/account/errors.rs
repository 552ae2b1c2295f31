use thiserror::Error;

use crate::domain::account::models::Role;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for account, authorization and dashboard operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Email already registered: {0}")]
    EmailAlreadyRegistered(String),

    /// Login failed: unknown email, wrong password or inactive account
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Bearer token invalid, expired, or its subject no longer resolves to a
    /// live account. The reason is only ever logged.
    #[error("Could not validate credentials")]
    Unauthorized,

    #[error("Role {actual} may not perform an operation requiring {required}")]
    Forbidden { required: Role, actual: Role },

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Password hashing failed: {0}")]
    PasswordHashing(String),

    #[error("Token generation failed: {0}")]
    TokenGeneration(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
