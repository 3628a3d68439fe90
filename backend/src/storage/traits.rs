//! # Storage Traits
//!
//! Contracts the domain layer depends on. Repositories translate these
//! operations into single SQL statements and carry no business rules;
//! invariant checks live in the services that call them.

use async_trait::async_trait;

use crate::domain::models::{Department, Employee, NewDepartment, NewEmployee};
use crate::storage::errors::StoreError;

/// Storage operations for the department aggregate.
#[async_trait]
pub trait DepartmentStore: Send + Sync {
    /// List all departments ordered by name (id as tiebreak), each with its
    /// active-employee count.
    async fn get_all(&self) -> Result<Vec<Department>, StoreError>;

    /// Fetch one department by id. Absence is normal control flow.
    async fn get_by_id(&self, id: i64) -> Result<Option<Department>, StoreError>;

    /// Insert a department; the store assigns `id` and `created_at`.
    async fn create(&self, department: NewDepartment) -> Result<Department, StoreError>;

    /// Persist the mutable fields of an existing department. Fails with
    /// `RowNotFound` when the id vanished under a concurrent delete.
    async fn update(&self, department: &Department) -> Result<Department, StoreError>;

    /// Remove a department row. Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    /// Whether a department with this id exists.
    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError>;

    /// Whether a department with this id exists and is active.
    async fn exists_active(&self, id: i64) -> Result<bool, StoreError>;

    /// Whether another department already uses this code, case-insensitively.
    /// `exclude_id` leaves out the entity being updated.
    async fn code_exists(&self, code: &str, exclude_id: Option<i64>) -> Result<bool, StoreError>;
}

/// Storage operations for the employee aggregate. Every read joins the
/// owning department's name and code into the result.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// List all employees ordered by first name, last name (id as tiebreak).
    async fn get_all(&self) -> Result<Vec<Employee>, StoreError>;

    /// Fetch one employee by id.
    async fn get_by_id(&self, id: i64) -> Result<Option<Employee>, StoreError>;

    /// List the active employees of one department.
    async fn get_by_department(&self, department_id: i64) -> Result<Vec<Employee>, StoreError>;

    /// Insert an employee; the store assigns `id` and `created_at`.
    async fn create(&self, employee: NewEmployee) -> Result<Employee, StoreError>;

    /// Persist the mutable fields of an existing employee.
    async fn update(&self, employee: &Employee) -> Result<Employee, StoreError>;

    /// Remove an employee row. Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    /// Whether an employee with this id exists.
    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError>;

    /// Whether another employee already uses this email, case-insensitively.
    async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> Result<bool, StoreError>;
}
