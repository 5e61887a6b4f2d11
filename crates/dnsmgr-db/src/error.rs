//! Database-specific error types and conversions.

use dnsmgr_core::error::DnsMgrError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    /// The schema rejected a write: unique index, parent assertion or
    /// field constraint.
    #[error("Constraint violated on {entity}: {reason}")]
    Constraint { entity: String, reason: String },

    #[error("Corrupt row in {entity}: {reason}")]
    Decode { entity: String, reason: String },

    #[error("Password hashing failed: {0}")]
    Hash(String),
}

impl DbError {
    /// Wraps a statement error raised by a write against `entity`.
    pub(crate) fn constraint(entity: &str, err: impl ToString) -> Self {
        DbError::Constraint {
            entity: entity.into(),
            reason: err.to_string(),
        }
    }

    pub(crate) fn decode(entity: &str, reason: impl ToString) -> Self {
        DbError::Decode {
            entity: entity.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<DbError> for DnsMgrError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => DnsMgrError::NotFound { entity, id },
            DbError::Constraint { entity, reason } => {
                DnsMgrError::ConstraintViolation { entity, reason }
            }
            DbError::Hash(msg) => DnsMgrError::Crypto(msg),
            other => DnsMgrError::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_keeps_its_identity() {
        let err: DnsMgrError = DbError::NotFound {
            entity: "domain".into(),
            id: "abc".into(),
        }
        .into();
        assert!(matches!(err, DnsMgrError::NotFound { ref entity, .. } if entity == "domain"));
    }

    #[test]
    fn constraint_maps_to_constraint_violation() {
        let err: DnsMgrError = DbError::Constraint {
            entity: "user".into(),
            reason: "index already contains".into(),
        }
        .into();
        assert!(matches!(err, DnsMgrError::ConstraintViolation { .. }));
    }

    #[test]
    fn decode_maps_to_database() {
        let err: DnsMgrError = DbError::decode("dns_record", "bad uuid").into();
        assert!(matches!(err, DnsMgrError::Database(ref m) if m.contains("bad uuid")));
    }
}
