//! dnsmgr core: domain models, repository traits and the shared error
//! type.
//!
//! This crate has no storage dependency. Persistence lives in
//! `dnsmgr-db`, which implements the traits in [`repository`].

pub mod error;
pub mod models;
pub mod repository;
