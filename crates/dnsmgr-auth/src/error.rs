//! Authentication error types.

use dnsmgr_core::error::DnsMgrError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account is inactive")]
    AccountInactive,

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for DnsMgrError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::AccountInactive => {
                DnsMgrError::AuthenticationFailed {
                    reason: err.to_string(),
                }
            }
            AuthError::PasswordTooShort { .. } => DnsMgrError::Validation {
                message: err.to_string(),
            },
            AuthError::Crypto(msg) => DnsMgrError::Crypto(msg),
        }
    }
}
