//! dnsmgr auth: password verification and account lifecycle gated on
//! `User::is_active`.

pub mod config;
pub mod error;
pub mod password;
pub mod service;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::AccountService;
