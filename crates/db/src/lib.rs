//! `infopan-db` — PostgreSQL access layer.
//!
//! Pool construction, embedded migrations and one repository per business
//! entity. Every query is parameterized; errors are normalized into
//! [`DbError`] so the HTTP layer can map them uniformly.

pub mod error;
pub mod models;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
