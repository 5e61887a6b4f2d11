//! Error types for dnsmgr.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DnsMgrError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    /// A uniqueness, referential or schema rule rejected a write.
    #[error("Constraint violation on {entity}: {reason}")]
    ConstraintViolation { entity: String, reason: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),
}

pub type DnsMgrResult<T> = Result<T, DnsMgrError>;
