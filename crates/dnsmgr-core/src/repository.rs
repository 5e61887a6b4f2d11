//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Writes that would break a
//! uniqueness or parent-reference rule fail with
//! [`DnsMgrError::ConstraintViolation`](crate::error::DnsMgrError);
//! operations on an absent id fail with `NotFound`.
//!
//! List operations return items ordered by id ascending. Ids are
//! UUIDv7, so this is creation order.

use uuid::Uuid;

use crate::error::DnsMgrResult;
use crate::models::{
    dns_record::{CreateDnsRecord, DnsRecord, UpdateDnsRecord},
    domain::{CreateDomain, Domain, UpdateDomain},
    user::{CreateUser, UpdateUser, User},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

pub trait UserRepository: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = DnsMgrResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = DnsMgrResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = DnsMgrResult<User>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateUser,
    ) -> impl Future<Output = DnsMgrResult<User>> + Send;
    /// Hard delete. Owned domains and their records go with it.
    fn delete(&self, id: Uuid) -> impl Future<Output = DnsMgrResult<()>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = DnsMgrResult<PaginatedResult<User>>> + Send;
}

pub trait DomainRepository: Send + Sync {
    fn create(&self, input: CreateDomain) -> impl Future<Output = DnsMgrResult<Domain>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = DnsMgrResult<Domain>> + Send;
    fn get_by_name(&self, name: &str) -> impl Future<Output = DnsMgrResult<Domain>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateDomain,
    ) -> impl Future<Output = DnsMgrResult<Domain>> + Send;
    /// Hard delete. The domain's records go with it.
    fn delete(&self, id: Uuid) -> impl Future<Output = DnsMgrResult<()>> + Send;
    fn list_by_user(
        &self,
        user_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = DnsMgrResult<PaginatedResult<Domain>>> + Send;
}

pub trait DnsRecordRepository: Send + Sync {
    fn create(
        &self,
        input: CreateDnsRecord,
    ) -> impl Future<Output = DnsMgrResult<DnsRecord>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = DnsMgrResult<DnsRecord>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateDnsRecord,
    ) -> impl Future<Output = DnsMgrResult<DnsRecord>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = DnsMgrResult<()>> + Send;
    fn list_by_domain(
        &self,
        domain_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = DnsMgrResult<PaginatedResult<DnsRecord>>> + Send;
}
