//! Domain models for dnsmgr.
//!
//! Ownership runs one way: a [`user::User`] owns [`domain::Domain`]s,
//! and a domain owns [`dns_record::DnsRecord`]s.

pub mod dns_record;
pub mod domain;
pub mod user;
