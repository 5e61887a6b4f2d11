//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode. UUIDs are stored as
//! strings and record types as strings with an ASSERT constraint.
//!
//! Integrity rules live in the schema so that no write path can skip
//! them:
//! - `UNIQUE` indexes on `user.email` and `domain.name`
//! - parent references checked with `record::exists` on every write
//! - deletes cascade down the ownership chain through table events

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD email ON TABLE user TYPE string \
    ASSERT string::len($value) > 0;
DEFINE FIELD password_hash ON TABLE user TYPE string;
DEFINE FIELD is_active ON TABLE user TYPE bool DEFAULT false;
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_email ON TABLE user COLUMNS email UNIQUE;

-- =======================================================================
-- Domains (owned by a user, globally unique name)
-- =======================================================================
DEFINE TABLE domain SCHEMAFULL;
DEFINE FIELD user_id ON TABLE domain TYPE string \
    ASSERT record::exists(type::record('user', $value));
DEFINE FIELD name ON TABLE domain TYPE string \
    ASSERT string::len($value) > 0;
DEFINE FIELD created_at ON TABLE domain TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE domain TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_domain_name ON TABLE domain COLUMNS name UNIQUE;
DEFINE INDEX idx_domain_user ON TABLE domain COLUMNS user_id;

-- =======================================================================
-- DNS records (owned by a domain)
-- =======================================================================
DEFINE TABLE dns_record SCHEMAFULL;
DEFINE FIELD domain_id ON TABLE dns_record TYPE string \
    ASSERT record::exists(type::record('domain', $value));
DEFINE FIELD subdomain ON TABLE dns_record TYPE string \
    ASSERT string::len($value) > 0;
DEFINE FIELD record_type ON TABLE dns_record TYPE string \
    ASSERT $value IN ['A', 'AAAA', 'CNAME', 'MX', 'TXT', 'NS'];
DEFINE FIELD content ON TABLE dns_record TYPE string;
DEFINE FIELD ttl ON TABLE dns_record TYPE int DEFAULT 60 \
    ASSERT $value >= 0;
DEFINE FIELD created_at ON TABLE dns_record TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE dns_record TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_dns_record_domain ON TABLE dns_record \
    COLUMNS domain_id;

-- =======================================================================
-- Cascades (user -> domain -> dns_record)
-- =======================================================================
DEFINE EVENT cascade_user_domains ON TABLE user \
    WHEN $event = 'DELETE' \
    THEN (DELETE domain WHERE user_id = meta::id($before.id));
DEFINE EVENT cascade_domain_records ON TABLE domain \
    WHEN $event = 'DELETE' \
    THEN (DELETE dns_record WHERE domain_id = meta::id($before.id));
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        info!(
            version = migration.version,
            name = migration.name,
            "Applying migration"
        );
        db.query(migration.sql).await?.check().map_err(|e| {
            DbError::Migration(format!(
                "Migration v{} '{}' failed: {}",
                migration.version, migration.name, e,
            ))
        })?;

        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

        info!(version = migration.version, "Migration applied");
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for tests that load the schema without the migration
/// runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
