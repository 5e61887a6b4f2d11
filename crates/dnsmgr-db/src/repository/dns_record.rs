//! SurrealDB implementation of [`DnsRecordRepository`].
//!
//! The record type is stored as its mnemonic string and the record
//! value in the `content` column.

use chrono::{DateTime, Utc};
use dnsmgr_core::error::DnsMgrResult;
use dnsmgr_core::models::dns_record::{CreateDnsRecord, DnsRecord, RecordType, UpdateDnsRecord};
use dnsmgr_core::repository::{DnsRecordRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::{CountRow, parse_uuid};
use crate::error::DbError;

const ENTITY: &str = "dns_record";

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct DnsRecordRow {
    domain_id: String,
    subdomain: String,
    record_type: String,
    content: String,
    ttl: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct DnsRecordRowWithId {
    record_id: String,
    domain_id: String,
    subdomain: String,
    record_type: String,
    content: String,
    ttl: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_record_type(s: &str) -> Result<RecordType, DbError> {
    s.parse()
        .map_err(|_| DbError::decode(ENTITY, format!("unknown record type: {s}")))
}

impl DnsRecordRow {
    fn into_record(self, id: Uuid) -> Result<DnsRecord, DbError> {
        Ok(DnsRecord {
            id,
            domain_id: parse_uuid(ENTITY, "domain", &self.domain_id)?,
            subdomain: self.subdomain,
            record_type: parse_record_type(&self.record_type)?,
            value: self.content,
            ttl: self.ttl,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl DnsRecordRowWithId {
    fn try_into_record(self) -> Result<DnsRecord, DbError> {
        Ok(DnsRecord {
            id: parse_uuid(ENTITY, "record", &self.record_id)?,
            domain_id: parse_uuid(ENTITY, "domain", &self.domain_id)?,
            subdomain: self.subdomain,
            record_type: parse_record_type(&self.record_type)?,
            value: self.content,
            ttl: self.ttl,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the DNS record repository.
#[derive(Clone)]
pub struct SurrealDnsRecordRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealDnsRecordRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> DnsRecordRepository for SurrealDnsRecordRepository<C> {
    async fn create(&self, input: CreateDnsRecord) -> DnsMgrResult<DnsRecord> {
        let id = Uuid::now_v7();
        let id_str = id.to_string();

        // Without a ttl the schema default (60s) applies.
        let mut sets = vec![
            "domain_id = $domain_id",
            "subdomain = $subdomain",
            "record_type = $record_type",
            "content = $content",
        ];
        if input.ttl.is_some() {
            sets.push("ttl = $ttl");
        }

        let query = format!(
            "CREATE type::record('dns_record', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("id", id_str.clone()))
            .bind(("domain_id", input.domain_id.to_string()))
            .bind(("subdomain", input.subdomain))
            .bind(("record_type", input.record_type.as_str().to_string()))
            .bind(("content", input.value));

        if let Some(ttl) = input.ttl {
            builder = builder.bind(("ttl", ttl));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::constraint(ENTITY, e))?;

        let rows: Vec<DnsRecordRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_record(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> DnsMgrResult<DnsRecord> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('dns_record', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DnsRecordRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_record(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateDnsRecord) -> DnsMgrResult<DnsRecord> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.subdomain.is_some() {
            sets.push("subdomain = $subdomain");
        }
        if input.record_type.is_some() {
            sets.push("record_type = $record_type");
        }
        if input.value.is_some() {
            sets.push("content = $content");
        }
        if input.ttl.is_some() {
            sets.push("ttl = $ttl");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('dns_record', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(subdomain) = input.subdomain {
            builder = builder.bind(("subdomain", subdomain));
        }
        if let Some(record_type) = input.record_type {
            builder = builder.bind(("record_type", record_type.as_str().to_string()));
        }
        if let Some(value) = input.value {
            builder = builder.bind(("content", value));
        }
        if let Some(ttl) = input.ttl {
            builder = builder.bind(("ttl", ttl));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::constraint(ENTITY, e))?;

        let rows: Vec<DnsRecordRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_record(id)?)
    }

    async fn delete(&self, id: Uuid) -> DnsMgrResult<()> {
        let id_str = id.to_string();

        let result = self
            .db
            .query("DELETE type::record('dns_record', $id) RETURN BEFORE")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::constraint(ENTITY, e))?;

        let rows: Vec<DnsRecordRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: ENTITY.into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }

    async fn list_by_domain(
        &self,
        domain_id: Uuid,
        pagination: Pagination,
    ) -> DnsMgrResult<PaginatedResult<DnsRecord>> {
        let domain_id_str = domain_id.to_string();

        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM dns_record \
                 WHERE domain_id = $domain_id GROUP ALL",
            )
            .bind(("domain_id", domain_id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM dns_record \
                 WHERE domain_id = $domain_id \
                 ORDER BY id ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("domain_id", domain_id_str))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DnsRecordRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_record())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
