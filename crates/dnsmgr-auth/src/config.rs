//! Authentication configuration.

/// Configuration for the account service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Optional pepper prepended to passwords before Argon2id verification.
    /// Must match the pepper the user repository hashes with.
    pub pepper: Option<String>,
    /// Minimum password length for policy enforcement.
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            pepper: None,
            min_password_length: 12,
        }
    }
}
