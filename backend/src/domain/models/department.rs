use chrono::{DateTime, Utc};

/// A department as stored, plus the `employee_count` projection the
/// repository computes on every read. The count is never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Department {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    /// Count of active employees in this department
    pub employee_count: i64,
}

/// Fields for a department that has not been persisted yet. The store
/// assigns `id` and `created_at`; new departments start active.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDepartment {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}
