use anyhow::Result;
use chrono::{TimeZone, Utc};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;

/// DbConnection manages the pooled SQLite database
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection and apply the schema
    pub async fn new(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(options).await?;

        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize a test database with a unique name, schema applied, no seed
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Unique shared-cache in-memory database per test
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Access the underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS departments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                code TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                modified_at TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Case-insensitive uniqueness of department codes
        sqlx::query(
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_departments_code
            ON departments(code COLLATE NOCASE);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS employees (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL,
                date_of_birth TEXT NOT NULL,
                salary_cents INTEGER NOT NULL,
                phone_number TEXT,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                modified_at TEXT,
                department_id INTEGER NOT NULL
                    REFERENCES departments(id) ON DELETE RESTRICT
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Case-insensitive uniqueness of employee emails
        sqlx::query(
            r#"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_employees_email
            ON employees(email COLLATE NOCASE);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_employees_department
            ON employees(department_id);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Seed the store with the starter departments and employees when the
    /// departments table is empty; a no-op otherwise
    pub async fn seed_if_empty(&self) -> Result<()> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM departments")
            .fetch_one(&*self.pool)
            .await?;
        let count: i64 = row.get("count");
        if count > 0 {
            return Ok(());
        }

        // Fixed timestamp so a fresh store is reproducible
        let seeded_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let departments = [
            ("IT", "Information Technology", "Technology and software development"),
            ("HR", "Human Resources", "Personnel and employee relations"),
            ("FIN", "Finance", "Financial operations and accounting"),
        ];

        let mut department_ids = Vec::new();
        for (code, name, description) in departments {
            let result = sqlx::query(
                r#"
                INSERT INTO departments (code, name, description, is_active, created_at)
                VALUES (?, ?, ?, 1, ?)
                "#,
            )
            .bind(code)
            .bind(name)
            .bind(description)
            .bind(seeded_at)
            .execute(&*self.pool)
            .await?;
            department_ids.push(result.last_insert_rowid());
        }

        let employees = [
            (
                "John",
                "Doe",
                "john.doe@company.com",
                "1990-01-15",
                7_500_000_i64,
                "1234567890",
                department_ids[0],
            ),
            (
                "Jane",
                "Smith",
                "jane.smith@company.com",
                "1985-05-22",
                6_500_000_i64,
                "0987654321",
                department_ids[1],
            ),
        ];

        for (first, last, email, date_of_birth, salary_cents, phone, department_id) in employees {
            sqlx::query(
                r#"
                INSERT INTO employees
                    (first_name, last_name, email, date_of_birth, salary_cents,
                     phone_number, is_active, created_at, department_id)
                VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)
                "#,
            )
            .bind(first)
            .bind(last)
            .bind(email)
            .bind(date_of_birth)
            .bind(salary_cents)
            .bind(phone)
            .bind(seeded_at)
            .bind(department_id)
            .execute(&*self.pool)
            .await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");

        // Re-applying the schema on an existing database must not fail
        DbConnection::setup_schema(db.pool())
            .await
            .expect("Schema should be idempotent");
    }

    #[tokio::test]
    async fn test_seed_if_empty_populates_once() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");

        db.seed_if_empty().await.expect("First seed should succeed");

        let departments: i64 = sqlx::query("SELECT COUNT(*) AS count FROM departments")
            .fetch_one(db.pool())
            .await
            .expect("Failed to count departments")
            .get("count");
        let employees: i64 = sqlx::query("SELECT COUNT(*) AS count FROM employees")
            .fetch_one(db.pool())
            .await
            .expect("Failed to count employees")
            .get("count");
        assert_eq!(departments, 3);
        assert_eq!(employees, 2);

        // Second run is a no-op
        db.seed_if_empty().await.expect("Second seed should succeed");

        let departments_after: i64 = sqlx::query("SELECT COUNT(*) AS count FROM departments")
            .fetch_one(db.pool())
            .await
            .expect("Failed to count departments")
            .get("count");
        assert_eq!(departments_after, 3);
    }
}
