//! # REST Layer
//!
//! Axum handlers translating HTTP requests into service calls and typed
//! service results into status codes and JSON bodies.

pub mod department_apis;
pub mod employee_apis;
pub mod error_body;
pub mod mappers;

pub use department_apis::{
    create_department, delete_department, get_department, list_departments, update_department,
};
pub use employee_apis::{
    create_employee, delete_employee, get_employee, list_employees, list_employees_by_department,
    update_employee,
};
