//! User domain model.
//!
//! Users are the root of the ownership chain. The stored password hash
//! never leaves the process: it is skipped by serde and redacted from
//! `Debug` output.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Login identity. Unique across all users.
    pub email: String,
    /// Argon2id PHC string.
    #[serde(skip)]
    pub password_hash: String,
    /// Inactive users cannot authenticate. New users start inactive.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("is_active", &self.is_active)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

#[derive(Clone, Deserialize)]
pub struct CreateUser {
    pub email: String,
    /// Raw password (will be hashed with Argon2id before storage).
    pub password: String,
    /// Defaults to `false` when omitted.
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl fmt::Debug for CreateUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUser")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("is_active", &self.is_active)
            .finish()
    }
}

#[derive(Clone, Deserialize, Default)]
pub struct UpdateUser {
    pub email: Option<String>,
    /// Raw replacement password, re-hashed before storage.
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

impl fmt::Debug for UpdateUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateUser")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("is_active", &self.is_active)
            .finish()
    }
}
