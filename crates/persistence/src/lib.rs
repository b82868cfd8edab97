//! Persistence layer for the RentMaster backend.
//!
//! This crate contains:
//! - Connection management with PostgreSQL as primary and SQLite as local fallback
//! - The SQL dialect descriptor and the logical schema rendered per dialect
//! - Statement builders and execution across both backends
//! - Entity definitions (database row mappings)
//! - Repository implementations

pub mod db;
pub mod dialect;
pub mod entities;
pub mod error;
pub mod metrics;
pub mod query;
pub mod repositories;
pub mod schema;

pub use db::{BackendKind, Connection, ConnectionManager, ConnectionState, DatabaseConfig};
pub use dialect::Dialect;
pub use error::PersistenceError;
pub use query::{Filters, Scope, SqlValue};
