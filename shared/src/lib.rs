//! # Shared DTOs
//!
//! Request and response shapes exchanged between the REST layer and its
//! clients. Create requests carry only the user-supplied fields; response
//! DTOs add the server-computed fields (`employee_count`, `age`, `full_name`,
//! joined department name/code).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request body for creating a department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDepartmentRequest {
    /// Unique department code (max 10 characters)
    pub code: String,
    /// Department name (max 100 characters)
    pub name: String,
    /// Optional description (max 500 characters)
    pub description: Option<String>,
}

/// Request body for updating a department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateDepartmentRequest {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

/// Department as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentDto {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    /// Creation timestamp (RFC 3339)
    pub created_at: DateTime<Utc>,
    /// Set on every successful update, absent until then
    pub modified_at: Option<DateTime<Utc>>,
    /// Number of active employees in this department
    pub employee_count: i64,
}

/// Request body for creating an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    /// First name (max 50 characters)
    pub first_name: String,
    /// Last name (max 50 characters)
    pub last_name: String,
    /// Unique email address (max 100 characters)
    pub email: String,
    /// Date of birth (YYYY-MM-DD)
    pub date_of_birth: NaiveDate,
    /// Non-negative salary with at most two fractional digits
    pub salary: Decimal,
    /// Optional phone number (max 15 characters)
    pub phone_number: Option<String>,
    /// Department the employee belongs to
    pub department_id: i64,
}

/// Request body for updating an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub salary: Decimal,
    pub phone_number: Option<String>,
    pub department_id: i64,
    pub is_active: bool,
}

/// Employee as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// "{first_name} {last_name}", computed per response
    pub full_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    /// Whole years at the time of the response
    pub age: i32,
    pub salary: Decimal,
    pub phone_number: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub department_id: i64,
    /// Name of the employee's department (joined)
    pub department_name: String,
    /// Code of the employee's department (joined)
    pub department_code: String,
}

/// JSON body returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}
