//! SurrealDB repository implementations.

mod dns_record;
mod domain;
mod user;

use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

pub use dns_record::SurrealDnsRecordRepository;
pub use domain::SurrealDomainRepository;
pub use user::SurrealUserRepository;

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// Parses a UUID stored as a string column.
fn parse_uuid(entity: &str, column: &str, raw: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(raw).map_err(|e| DbError::decode(entity, format!("invalid {column} UUID: {e}")))
}
