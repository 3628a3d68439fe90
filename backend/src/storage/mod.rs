//! # Storage Layer
//!
//! Pooled SQLite connection, the store traits the domain layer depends on,
//! and their repository implementations.

pub mod db;
pub mod errors;
pub mod sqlite;
pub mod traits;

pub use db::DbConnection;
pub use errors::StoreError;
pub use traits::{DepartmentStore, EmployeeStore};
