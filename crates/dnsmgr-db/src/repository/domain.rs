//! SurrealDB implementation of [`DomainRepository`].

use chrono::{DateTime, Utc};
use dnsmgr_core::error::DnsMgrResult;
use dnsmgr_core::models::domain::{CreateDomain, Domain, UpdateDomain};
use dnsmgr_core::repository::{DomainRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::debug;
use uuid::Uuid;

use super::{CountRow, parse_uuid};
use crate::error::DbError;

const ENTITY: &str = "domain";

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct DomainRow {
    user_id: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DomainRow {
    fn into_domain(self, id: Uuid) -> Result<Domain, DbError> {
        Ok(Domain {
            id,
            user_id: parse_uuid(ENTITY, "user", &self.user_id)?,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct DomainRowWithId {
    record_id: String,
    user_id: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DomainRowWithId {
    fn try_into_domain(self) -> Result<Domain, DbError> {
        Ok(Domain {
            id: parse_uuid(ENTITY, "record", &self.record_id)?,
            user_id: parse_uuid(ENTITY, "user", &self.user_id)?,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Domain repository.
#[derive(Clone)]
pub struct SurrealDomainRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealDomainRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> DomainRepository for SurrealDomainRepository<C> {
    async fn create(&self, input: CreateDomain) -> DnsMgrResult<Domain> {
        let id = Uuid::now_v7();
        let id_str = id.to_string();

        // The schema asserts that the owning user exists.
        let result = self
            .db
            .query(
                "CREATE type::record('domain', $id) SET \
                 user_id = $user_id, name = $name",
            )
            .bind(("id", id_str.clone()))
            .bind(("user_id", input.user_id.to_string()))
            .bind(("name", input.name))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::constraint(ENTITY, e))?;

        let rows: Vec<DomainRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_domain(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> DnsMgrResult<Domain> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('domain', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DomainRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_domain(id)?)
    }

    async fn get_by_name(&self, name: &str) -> DnsMgrResult<Domain> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM domain WHERE name = $name")
            .bind(("name", name.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DomainRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: format!("name={name}"),
        })?;

        Ok(row.try_into_domain()?)
    }

    async fn update(&self, id: Uuid, input: UpdateDomain) -> DnsMgrResult<Domain> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.user_id.is_some() {
            sets.push("user_id = $user_id");
        }
        if input.name.is_some() {
            sets.push("name = $name");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('domain', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(user_id) = input.user_id {
            builder = builder.bind(("user_id", user_id.to_string()));
        }
        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::constraint(ENTITY, e))?;

        let rows: Vec<DomainRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: ENTITY.into(),
            id: id_str,
        })?;

        Ok(row.into_domain(id)?)
    }

    async fn delete(&self, id: Uuid) -> DnsMgrResult<()> {
        let id_str = id.to_string();

        // cascade_domain_records removes the domain's records.
        let result = self
            .db
            .query("DELETE type::record('domain', $id) RETURN BEFORE")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::constraint(ENTITY, e))?;

        let rows: Vec<DomainRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: ENTITY.into(),
                id: id_str,
            }
            .into());
        }

        debug!(domain_id = %id, "Deleted domain");
        Ok(())
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> DnsMgrResult<PaginatedResult<Domain>> {
        let user_id_str = user_id.to_string();

        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM domain \
                 WHERE user_id = $user_id GROUP ALL",
            )
            .bind(("user_id", user_id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM domain \
                 WHERE user_id = $user_id \
                 ORDER BY id ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("user_id", user_id_str))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DomainRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_domain())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
