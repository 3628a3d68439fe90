use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use shared::{CreateDepartmentRequest, UpdateDepartmentRequest};

use crate::domain::errors::DomainError;
use crate::domain::models::{Department, NewDepartment};
use crate::storage::{DepartmentStore, StoreError};

const CODE_EXISTS_MESSAGE: &str = "Department code already exists.";
const DELETE_BLOCKED_MESSAGE: &str = "Cannot delete department with active employees.";

/// Service enforcing the department invariants: field limits, unique code,
/// and the active-employee delete guard.
#[derive(Clone)]
pub struct DepartmentService {
    departments: Arc<dyn DepartmentStore>,
}

impl DepartmentService {
    pub fn new(departments: Arc<dyn DepartmentStore>) -> Self {
        Self { departments }
    }

    /// List all departments.
    pub async fn list_all(&self) -> Result<Vec<Department>, DomainError> {
        let departments = self.departments.get_all().await?;
        info!("Listed {} departments", departments.len());
        Ok(departments)
    }

    /// Get a department by id. Absence is not an error.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Department>, DomainError> {
        Ok(self.departments.get_by_id(id).await?)
    }

    /// Create a new department with a unique code.
    pub async fn create(
        &self,
        request: CreateDepartmentRequest,
    ) -> Result<Department, DomainError> {
        info!("Creating department: code={}", request.code);

        let code = request.code.trim().to_string();
        let name = request.name.trim().to_string();
        let description = normalize_description(request.description);
        validate_fields(&code, &name, &description)?;

        if self.departments.code_exists(&code, None).await? {
            warn!("Rejected department create, code already in use: {}", code);
            return Err(DomainError::Validation(CODE_EXISTS_MESSAGE.to_string()));
        }

        let new_department = NewDepartment {
            code,
            name,
            description,
        };

        // The unique index is the enforcement of record; a lost race between
        // the pre-check and the insert surfaces as a conflict
        match self.departments.create(new_department).await {
            Ok(department) => {
                info!("Created department {} with id {}", department.code, department.id);
                Ok(department)
            }
            Err(StoreError::UniqueViolation { .. }) => {
                Err(DomainError::Conflict(CODE_EXISTS_MESSAGE.to_string()))
            }
            Err(e) => Err(DomainError::Persistence(e)),
        }
    }

    /// Update an existing department. Returns `Ok(None)` when the id does
    /// not exist.
    pub async fn update(
        &self,
        id: i64,
        request: UpdateDepartmentRequest,
    ) -> Result<Option<Department>, DomainError> {
        info!("Updating department {}", id);

        let mut department = match self.departments.get_by_id(id).await? {
            Some(department) => department,
            None => {
                warn!("Department not found for update: {}", id);
                return Ok(None);
            }
        };

        let code = request.code.trim().to_string();
        let name = request.name.trim().to_string();
        let description = normalize_description(request.description);
        validate_fields(&code, &name, &description)?;

        if self.departments.code_exists(&code, Some(id)).await? {
            warn!("Rejected department update, code already in use: {}", code);
            return Err(DomainError::Validation(CODE_EXISTS_MESSAGE.to_string()));
        }

        department.code = code;
        department.name = name;
        department.description = description;
        department.is_active = request.is_active;
        department.modified_at = Some(Utc::now());

        match self.departments.update(&department).await {
            Ok(department) => {
                info!("Updated department {}", department.id);
                Ok(Some(department))
            }
            Err(StoreError::RowNotFound) => Ok(None),
            Err(StoreError::UniqueViolation { .. }) => {
                Err(DomainError::Conflict(CODE_EXISTS_MESSAGE.to_string()))
            }
            Err(e) => Err(DomainError::Persistence(e)),
        }
    }

    /// Delete a department with no active employees. Returns `Ok(false)`
    /// when the id does not exist.
    pub async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        info!("Deleting department {}", id);

        let department = match self.departments.get_by_id(id).await? {
            Some(department) => department,
            None => return Ok(false),
        };

        if department.employee_count > 0 {
            warn!(
                "Rejected department delete, {} active employees in {}",
                department.employee_count, department.code
            );
            return Err(DomainError::Conflict(DELETE_BLOCKED_MESSAGE.to_string()));
        }

        // The foreign key restricts deletes that raced past the count check
        match self.departments.delete(id).await {
            Ok(removed) => {
                if removed {
                    info!("Deleted department {}", id);
                }
                Ok(removed)
            }
            Err(StoreError::ForeignKeyViolation) => {
                Err(DomainError::Conflict(DELETE_BLOCKED_MESSAGE.to_string()))
            }
            Err(e) => Err(DomainError::Persistence(e)),
        }
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

fn validate_fields(
    code: &str,
    name: &str,
    description: &Option<String>,
) -> Result<(), DomainError> {
    if code.is_empty() {
        return Err(DomainError::Validation("Department code is required.".to_string()));
    }
    if code.chars().count() > 10 {
        return Err(DomainError::Validation(
            "Department code cannot exceed 10 characters.".to_string(),
        ));
    }
    if name.is_empty() {
        return Err(DomainError::Validation("Department name is required.".to_string()));
    }
    if name.chars().count() > 100 {
        return Err(DomainError::Validation(
            "Department name cannot exceed 100 characters.".to_string(),
        ));
    }
    if let Some(description) = description {
        if description.chars().count() > 500 {
            return Err(DomainError::Validation(
                "Description cannot exceed 500 characters.".to_string(),
            ));
        }
    }
    Ok(())
}
