//! # Domain Layer
//!
//! Entities, the error taxonomy, and the services that enforce the
//! cross-entity invariants before anything reaches the store.

pub mod department_service;
pub mod employee_service;
pub mod errors;
pub mod models;

pub use department_service::DepartmentService;
pub use employee_service::EmployeeService;
pub use errors::DomainError;
