use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::{Department, NewDepartment};
use crate::storage::db::DbConnection;
use crate::storage::errors::StoreError;
use crate::storage::traits::DepartmentStore;

/// Repository for department rows. Every read projects the count of active
/// employees alongside the stored columns.
#[derive(Clone)]
pub struct SqliteDepartmentRepository {
    db: DbConnection,
}

impl SqliteDepartmentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_department(row: &SqliteRow) -> Department {
        Department {
            id: row.get("id"),
            code: row.get("code"),
            name: row.get("name"),
            description: row.get("description"),
            is_active: row.get("is_active"),
            created_at: row.get("created_at"),
            modified_at: row.get("modified_at"),
            employee_count: row.get("employee_count"),
        }
    }
}

#[async_trait]
impl DepartmentStore for SqliteDepartmentRepository {
    async fn get_all(&self) -> Result<Vec<Department>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT d.id, d.code, d.name, d.description, d.is_active,
                   d.created_at, d.modified_at,
                   (SELECT COUNT(*) FROM employees e
                    WHERE e.department_id = d.id AND e.is_active = 1) AS employee_count
            FROM departments d
            ORDER BY d.name ASC, d.id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_department).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Department>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT d.id, d.code, d.name, d.description, d.is_active,
                   d.created_at, d.modified_at,
                   (SELECT COUNT(*) FROM employees e
                    WHERE e.department_id = d.id AND e.is_active = 1) AS employee_count
            FROM departments d
            WHERE d.id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_department))
    }

    async fn create(&self, department: NewDepartment) -> Result<Department, StoreError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO departments (code, name, description, is_active, created_at)
            VALUES (?, ?, ?, 1, ?)
            "#,
        )
        .bind(&department.code)
        .bind(&department.name)
        .bind(&department.description)
        .bind(created_at)
        .execute(self.db.pool())
        .await?;

        self.get_by_id(result.last_insert_rowid())
            .await?
            .ok_or(StoreError::RowNotFound)
    }

    async fn update(&self, department: &Department) -> Result<Department, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE departments
            SET code = ?, name = ?, description = ?, is_active = ?, modified_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&department.code)
        .bind(&department.name)
        .bind(&department.description)
        .bind(department.is_active)
        .bind(department.modified_at)
        .bind(department.id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::RowNotFound);
        }

        self.get_by_id(department.id)
            .await?
            .ok_or(StoreError::RowNotFound)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM departments WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT 1 FROM departments WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.is_some())
    }

    async fn exists_active(&self, id: i64) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT 1 FROM departments WHERE id = ? AND is_active = 1")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.is_some())
    }

    async fn code_exists(&self, code: &str, exclude_id: Option<i64>) -> Result<bool, StoreError> {
        let row = if let Some(exclude_id) = exclude_id {
            sqlx::query(
                r#"
                SELECT 1 FROM departments
                WHERE code = ? COLLATE NOCASE AND id <> ?
                "#,
            )
            .bind(code)
            .bind(exclude_id)
            .fetch_optional(self.db.pool())
            .await?
        } else {
            sqlx::query("SELECT 1 FROM departments WHERE code = ? COLLATE NOCASE")
                .bind(code)
                .fetch_optional(self.db.pool())
                .await?
        };

        Ok(row.is_some())
    }
}
