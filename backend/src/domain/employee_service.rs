use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};

use shared::{CreateEmployeeRequest, UpdateEmployeeRequest};

use crate::domain::errors::DomainError;
use crate::domain::models::{Employee, NewEmployee};
use crate::storage::{DepartmentStore, EmployeeStore, StoreError};

const EMAIL_EXISTS_MESSAGE: &str = "Email address already exists.";
const DEPARTMENT_MISSING_MESSAGE: &str = "Department does not exist.";
const DEPARTMENT_INACTIVE_MESSAGE: &str = "Department is not active.";

// Single @ with non-empty local and domain parts, no whitespace
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+$").expect("valid email regex"));

// Keeps every accepted salary representable as integer cents in the store
static MAX_SALARY: Lazy<Decimal> = Lazy::new(|| Decimal::new(99_999_999_999, 2));

/// Service enforcing the employee invariants: field limits, email syntax and
/// uniqueness, and the existing-active-department reference.
///
/// Deletion is unconditional; only the department aggregate carries a delete
/// guard.
#[derive(Clone)]
pub struct EmployeeService {
    employees: Arc<dyn EmployeeStore>,
    departments: Arc<dyn DepartmentStore>,
}

impl EmployeeService {
    pub fn new(employees: Arc<dyn EmployeeStore>, departments: Arc<dyn DepartmentStore>) -> Self {
        Self {
            employees,
            departments,
        }
    }

    /// List all employees.
    pub async fn list_all(&self) -> Result<Vec<Employee>, DomainError> {
        let employees = self.employees.get_all().await?;
        info!("Listed {} employees", employees.len());
        Ok(employees)
    }

    /// Get an employee by id. Absence is not an error.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Employee>, DomainError> {
        Ok(self.employees.get_by_id(id).await?)
    }

    /// List the active employees of one department.
    pub async fn list_by_department(
        &self,
        department_id: i64,
    ) -> Result<Vec<Employee>, DomainError> {
        let employees = self.employees.get_by_department(department_id).await?;
        info!(
            "Listed {} employees for department {}",
            employees.len(),
            department_id
        );
        Ok(employees)
    }

    /// Create a new employee in an existing, active department.
    pub async fn create(&self, request: CreateEmployeeRequest) -> Result<Employee, DomainError> {
        info!("Creating employee: email={}", request.email);

        let first_name = request.first_name.trim().to_string();
        let last_name = request.last_name.trim().to_string();
        let email = request.email.trim().to_string();
        validate_fields(&first_name, &last_name, &email, request.salary, &request.phone_number)?;

        if self.employees.email_exists(&email, None).await? {
            warn!("Rejected employee create, email already in use: {}", email);
            return Err(DomainError::Validation(EMAIL_EXISTS_MESSAGE.to_string()));
        }
        self.check_department(request.department_id).await?;

        let new_employee = NewEmployee {
            first_name,
            last_name,
            email,
            date_of_birth: request.date_of_birth,
            salary: request.salary.round_dp(2),
            phone_number: request.phone_number,
            department_id: request.department_id,
        };

        // Unique index and foreign key are the enforcement of record for
        // races past the pre-checks
        match self.employees.create(new_employee).await {
            Ok(employee) => {
                info!("Created employee {} with id {}", employee.email, employee.id);
                Ok(employee)
            }
            Err(StoreError::UniqueViolation { .. }) => {
                Err(DomainError::Conflict(EMAIL_EXISTS_MESSAGE.to_string()))
            }
            Err(StoreError::ForeignKeyViolation) => {
                Err(DomainError::Validation(DEPARTMENT_MISSING_MESSAGE.to_string()))
            }
            Err(e) => Err(DomainError::Persistence(e)),
        }
    }

    /// Update an existing employee. Returns `Ok(None)` when the id does not
    /// exist.
    pub async fn update(
        &self,
        id: i64,
        request: UpdateEmployeeRequest,
    ) -> Result<Option<Employee>, DomainError> {
        info!("Updating employee {}", id);

        let mut employee = match self.employees.get_by_id(id).await? {
            Some(employee) => employee,
            None => {
                warn!("Employee not found for update: {}", id);
                return Ok(None);
            }
        };

        let first_name = request.first_name.trim().to_string();
        let last_name = request.last_name.trim().to_string();
        let email = request.email.trim().to_string();
        validate_fields(&first_name, &last_name, &email, request.salary, &request.phone_number)?;

        if self.employees.email_exists(&email, Some(id)).await? {
            warn!("Rejected employee update, email already in use: {}", email);
            return Err(DomainError::Validation(EMAIL_EXISTS_MESSAGE.to_string()));
        }
        self.check_department(request.department_id).await?;

        employee.first_name = first_name;
        employee.last_name = last_name;
        employee.email = email;
        employee.date_of_birth = request.date_of_birth;
        employee.salary = request.salary.round_dp(2);
        employee.phone_number = request.phone_number;
        employee.department_id = request.department_id;
        employee.is_active = request.is_active;
        employee.modified_at = Some(Utc::now());

        match self.employees.update(&employee).await {
            Ok(employee) => {
                info!("Updated employee {}", employee.id);
                Ok(Some(employee))
            }
            Err(StoreError::RowNotFound) => Ok(None),
            Err(StoreError::UniqueViolation { .. }) => {
                Err(DomainError::Conflict(EMAIL_EXISTS_MESSAGE.to_string()))
            }
            Err(StoreError::ForeignKeyViolation) => {
                Err(DomainError::Validation(DEPARTMENT_MISSING_MESSAGE.to_string()))
            }
            Err(e) => Err(DomainError::Persistence(e)),
        }
    }

    /// Delete an employee. Returns `Ok(false)` when the id does not exist.
    pub async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        info!("Deleting employee {}", id);

        let removed = self.employees.delete(id).await?;
        if removed {
            info!("Deleted employee {}", id);
        } else {
            warn!("Employee not found for delete: {}", id);
        }
        Ok(removed)
    }

    async fn check_department(&self, department_id: i64) -> Result<(), DomainError> {
        if !self.departments.exists_by_id(department_id).await? {
            warn!("Rejected employee write, unknown department {}", department_id);
            return Err(DomainError::Validation(DEPARTMENT_MISSING_MESSAGE.to_string()));
        }
        if !self.departments.exists_active(department_id).await? {
            warn!("Rejected employee write, inactive department {}", department_id);
            return Err(DomainError::Validation(DEPARTMENT_INACTIVE_MESSAGE.to_string()));
        }
        Ok(())
    }
}

fn validate_fields(
    first_name: &str,
    last_name: &str,
    email: &str,
    salary: Decimal,
    phone_number: &Option<String>,
) -> Result<(), DomainError> {
    if first_name.is_empty() {
        return Err(DomainError::Validation("First name is required.".to_string()));
    }
    if first_name.chars().count() > 50 {
        return Err(DomainError::Validation(
            "First name cannot exceed 50 characters.".to_string(),
        ));
    }
    if last_name.is_empty() {
        return Err(DomainError::Validation("Last name is required.".to_string()));
    }
    if last_name.chars().count() > 50 {
        return Err(DomainError::Validation(
            "Last name cannot exceed 50 characters.".to_string(),
        ));
    }
    if email.is_empty() {
        return Err(DomainError::Validation("Email address is required.".to_string()));
    }
    if email.chars().count() > 100 {
        return Err(DomainError::Validation(
            "Email address cannot exceed 100 characters.".to_string(),
        ));
    }
    if !EMAIL_RE.is_match(email) {
        return Err(DomainError::Validation(
            "Email address is not valid.".to_string(),
        ));
    }
    if salary.is_sign_negative() {
        return Err(DomainError::Validation(
            "Salary must be a non-negative amount.".to_string(),
        ));
    }
    if salary > *MAX_SALARY {
        return Err(DomainError::Validation(
            "Salary cannot exceed 999999999.99.".to_string(),
        ));
    }
    if let Some(phone_number) = phone_number {
        if phone_number.chars().count() > 15 {
            return Err(DomainError::Validation(
                "Phone number cannot exceed 15 characters.".to_string(),
            ));
        }
    }
    Ok(())
}
