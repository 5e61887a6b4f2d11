//! Domain model.
//!
//! A domain name managed by the system. Names share one global
//! namespace: no two domains may have the same name, regardless of
//! owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// Fully qualified name (e.g., `example.com`).
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDomain {
    pub user_id: Uuid,
    pub name: String,
}

/// Fields that can be updated on an existing domain.
///
/// Setting `user_id` transfers ownership; the new owner must exist.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateDomain {
    pub user_id: Option<Uuid>,
    pub name: Option<String>,
}
