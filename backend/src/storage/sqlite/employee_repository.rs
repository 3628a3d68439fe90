use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::{Employee, NewEmployee};
use crate::storage::db::DbConnection;
use crate::storage::errors::StoreError;
use crate::storage::traits::EmployeeStore;

/// Repository for employee rows. Every read joins the owning department's
/// name and code; salaries are stored as integer cents so they round-trip
/// exactly.
#[derive(Clone)]
pub struct SqliteEmployeeRepository {
    db: DbConnection,
}

impl SqliteEmployeeRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn salary_to_cents(salary: Decimal) -> Result<i64, StoreError> {
        salary
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.round().to_i64())
            .ok_or(StoreError::OutOfRange {
                column: "salary_cents",
            })
    }

    fn cents_to_salary(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    fn row_to_employee(row: &SqliteRow) -> Employee {
        Employee {
            id: row.get("id"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            email: row.get("email"),
            date_of_birth: row.get("date_of_birth"),
            salary: Self::cents_to_salary(row.get("salary_cents")),
            phone_number: row.get("phone_number"),
            is_active: row.get("is_active"),
            created_at: row.get("created_at"),
            modified_at: row.get("modified_at"),
            department_id: row.get("department_id"),
            department_name: row.get("department_name"),
            department_code: row.get("department_code"),
        }
    }
}

#[async_trait]
impl EmployeeStore for SqliteEmployeeRepository {
    async fn get_all(&self) -> Result<Vec<Employee>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT e.id, e.first_name, e.last_name, e.email, e.date_of_birth,
                   e.salary_cents, e.phone_number, e.is_active, e.created_at,
                   e.modified_at, e.department_id,
                   d.name AS department_name, d.code AS department_code
            FROM employees e
            INNER JOIN departments d ON d.id = e.department_id
            ORDER BY e.first_name ASC, e.last_name ASC, e.id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_employee).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Employee>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT e.id, e.first_name, e.last_name, e.email, e.date_of_birth,
                   e.salary_cents, e.phone_number, e.is_active, e.created_at,
                   e.modified_at, e.department_id,
                   d.name AS department_name, d.code AS department_code
            FROM employees e
            INNER JOIN departments d ON d.id = e.department_id
            WHERE e.id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_employee))
    }

    async fn get_by_department(&self, department_id: i64) -> Result<Vec<Employee>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT e.id, e.first_name, e.last_name, e.email, e.date_of_birth,
                   e.salary_cents, e.phone_number, e.is_active, e.created_at,
                   e.modified_at, e.department_id,
                   d.name AS department_name, d.code AS department_code
            FROM employees e
            INNER JOIN departments d ON d.id = e.department_id
            WHERE e.department_id = ? AND e.is_active = 1
            ORDER BY e.first_name ASC, e.last_name ASC, e.id ASC
            "#,
        )
        .bind(department_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_employee).collect())
    }

    async fn create(&self, employee: NewEmployee) -> Result<Employee, StoreError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO employees
                (first_name, last_name, email, date_of_birth, salary_cents,
                 phone_number, is_active, created_at, department_id)
            VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)
            "#,
        )
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(employee.date_of_birth)
        .bind(Self::salary_to_cents(employee.salary)?)
        .bind(&employee.phone_number)
        .bind(created_at)
        .bind(employee.department_id)
        .execute(self.db.pool())
        .await?;

        self.get_by_id(result.last_insert_rowid())
            .await?
            .ok_or(StoreError::RowNotFound)
    }

    async fn update(&self, employee: &Employee) -> Result<Employee, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET first_name = ?, last_name = ?, email = ?, date_of_birth = ?,
                salary_cents = ?, phone_number = ?, is_active = ?,
                modified_at = ?, department_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(employee.date_of_birth)
        .bind(Self::salary_to_cents(employee.salary)?)
        .bind(&employee.phone_number)
        .bind(employee.is_active)
        .bind(employee.modified_at)
        .bind(employee.department_id)
        .bind(employee.id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::RowNotFound);
        }

        self.get_by_id(employee.id)
            .await?
            .ok_or(StoreError::RowNotFound)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT 1 FROM employees WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.is_some())
    }

    async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> Result<bool, StoreError> {
        let row = if let Some(exclude_id) = exclude_id {
            sqlx::query(
                r#"
                SELECT 1 FROM employees
                WHERE email = ? COLLATE NOCASE AND id <> ?
                "#,
            )
            .bind(email)
            .bind(exclude_id)
            .fetch_optional(self.db.pool())
            .await?
        } else {
            sqlx::query("SELECT 1 FROM employees WHERE email = ? COLLATE NOCASE")
                .bind(email)
                .fetch_optional(self.db.pool())
                .await?
        };

        Ok(row.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::NewDepartment;
    use crate::storage::sqlite::SqliteDepartmentRepository;
    use crate::storage::traits::DepartmentStore;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    async fn setup_test() -> (SqliteDepartmentRepository, SqliteEmployeeRepository) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        (
            SqliteDepartmentRepository::new(db.clone()),
            SqliteEmployeeRepository::new(db),
        )
    }

    async fn create_department(departments: &SqliteDepartmentRepository, code: &str) -> i64 {
        departments
            .create(NewDepartment {
                code: code.to_string(),
                name: format!("{} department", code),
                description: None,
            })
            .await
            .expect("Failed to create department")
            .id
    }

    fn new_employee(first: &str, last: &str, email: &str, department_id: i64) -> NewEmployee {
        NewEmployee {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 15).unwrap(),
            salary: dec!(75000.50),
            phone_number: Some("555-0101".to_string()),
            department_id,
        }
    }

    #[tokio::test]
    async fn test_create_round_trips_all_fields() {
        let (departments, employees) = setup_test().await;
        let department_id = create_department(&departments, "IT").await;

        let created = employees
            .create(new_employee("John", "Doe", "john.doe@example.com", department_id))
            .await
            .expect("Failed to create employee");

        assert!(created.id > 0);
        assert!(created.is_active);
        assert!(created.modified_at.is_none());

        let loaded = employees
            .get_by_id(created.id)
            .await
            .expect("Failed to load employee")
            .expect("Employee should exist");
        assert_eq!(loaded, created);
        assert_eq!(loaded.first_name, "John");
        assert_eq!(loaded.email, "john.doe@example.com");
        assert_eq!(loaded.date_of_birth, NaiveDate::from_ymd_opt(1990, 5, 15).unwrap());
        assert_eq!(loaded.salary, dec!(75000.50));
        assert_eq!(loaded.phone_number.as_deref(), Some("555-0101"));
        assert_eq!(loaded.department_id, department_id);
        assert_eq!(loaded.department_code, "IT");
        assert_eq!(loaded.department_name, "IT department");
    }

    #[tokio::test]
    async fn test_salary_round_trips_exactly() {
        let (departments, employees) = setup_test().await;
        let department_id = create_department(&departments, "IT").await;

        let mut employee = new_employee("John", "Doe", "john.doe@example.com", department_id);
        employee.salary = dec!(0.01);
        let created = employees.create(employee).await.unwrap();
        assert_eq!(created.salary, dec!(0.01));

        let mut employee = new_employee("Jane", "Smith", "jane.smith@example.com", department_id);
        employee.salary = dec!(123456.78);
        let created = employees.create(employee).await.unwrap();
        assert_eq!(created.salary, dec!(123456.78));
    }

    #[tokio::test]
    async fn test_salary_beyond_cents_range_is_out_of_range() {
        let (departments, employees) = setup_test().await;
        let department_id = create_department(&departments, "IT").await;

        let mut employee = new_employee("John", "Doe", "john.doe@example.com", department_id);
        employee.salary = Decimal::MAX;

        let result = employees.create(employee).await;
        assert!(matches!(result, Err(StoreError::OutOfRange { .. })));
    }

    #[tokio::test]
    async fn test_get_all_ordered_by_first_then_last_name() {
        let (departments, employees) = setup_test().await;
        let department_id = create_department(&departments, "IT").await;

        employees.create(new_employee("Jane", "Smith", "a@x.com", department_id)).await.unwrap();
        employees.create(new_employee("Adam", "Young", "b@x.com", department_id)).await.unwrap();
        employees.create(new_employee("Adam", "Baker", "c@x.com", department_id)).await.unwrap();

        let all = employees.get_all().await.expect("Failed to list employees");
        let names: Vec<String> = all.iter().map(Employee::full_name).collect();
        assert_eq!(names, vec!["Adam Baker", "Adam Young", "Jane Smith"]);
    }

    #[tokio::test]
    async fn test_get_by_department_returns_only_active_members() {
        let (departments, employees) = setup_test().await;
        let it = create_department(&departments, "IT").await;
        let hr = create_department(&departments, "HR").await;

        employees.create(new_employee("John", "Doe", "a@x.com", it)).await.unwrap();
        let mut inactive = employees.create(new_employee("Jane", "Smith", "b@x.com", it)).await.unwrap();
        employees.create(new_employee("Ann", "Lee", "c@x.com", hr)).await.unwrap();

        inactive.is_active = false;
        inactive.modified_at = Some(Utc::now());
        employees.update(&inactive).await.unwrap();

        let members = employees.get_by_department(it).await.expect("Failed to list by department");
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].email, "a@x.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation_case_insensitive() {
        let (departments, employees) = setup_test().await;
        let department_id = create_department(&departments, "IT").await;

        employees.create(new_employee("John", "Doe", "a@x.com", department_id)).await.unwrap();
        let result = employees
            .create(new_employee("Jane", "Smith", "A@X.COM", department_id))
            .await;

        assert!(matches!(result, Err(StoreError::UniqueViolation { .. })));
    }

    #[tokio::test]
    async fn test_create_with_unknown_department_is_foreign_key_violation() {
        let (_departments, employees) = setup_test().await;

        let result = employees.create(new_employee("John", "Doe", "a@x.com", 999)).await;
        assert!(matches!(result, Err(StoreError::ForeignKeyViolation)));
    }

    #[tokio::test]
    async fn test_email_exists_is_case_insensitive_and_honors_exclude() {
        let (departments, employees) = setup_test().await;
        let department_id = create_department(&departments, "IT").await;

        let employee = employees
            .create(new_employee("John", "Doe", "john.doe@example.com", department_id))
            .await
            .unwrap();

        assert!(employees.email_exists("JOHN.DOE@EXAMPLE.COM", None).await.unwrap());
        assert!(!employees.email_exists("other@example.com", None).await.unwrap());
        assert!(!employees.email_exists("john.doe@example.com", Some(employee.id)).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_persists_fields_and_keeps_created_at() {
        let (departments, employees) = setup_test().await;
        let it = create_department(&departments, "IT").await;
        let hr = create_department(&departments, "HR").await;

        let mut employee = employees
            .create(new_employee("John", "Doe", "john.doe@example.com", it))
            .await
            .unwrap();
        let created_at = employee.created_at;

        employee.last_name = "Dean".to_string();
        employee.salary = dec!(80000.00);
        employee.department_id = hr;
        employee.modified_at = Some(Utc::now());

        let updated = employees.update(&employee).await.expect("Failed to update");
        assert_eq!(updated.last_name, "Dean");
        assert_eq!(updated.salary, dec!(80000.00));
        assert_eq!(updated.department_code, "HR");
        assert!(updated.modified_at.is_some());
        assert_eq!(updated.created_at, created_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_row_not_found() {
        let (departments, employees) = setup_test().await;
        let department_id = create_department(&departments, "IT").await;

        let mut employee = employees
            .create(new_employee("John", "Doe", "john.doe@example.com", department_id))
            .await
            .unwrap();
        employee.id = 999;

        let result = employees.update(&employee).await;
        assert!(matches!(result, Err(StoreError::RowNotFound)));
    }

    #[tokio::test]
    async fn test_delete_and_exists() {
        let (departments, employees) = setup_test().await;
        let department_id = create_department(&departments, "IT").await;

        let employee = employees
            .create(new_employee("John", "Doe", "john.doe@example.com", department_id))
            .await
            .unwrap();

        assert!(employees.exists_by_id(employee.id).await.unwrap());
        assert!(employees.delete(employee.id).await.unwrap());
        assert!(!employees.delete(employee.id).await.unwrap());
        assert!(!employees.exists_by_id(employee.id).await.unwrap());
        assert!(employees.get_by_id(employee.id).await.unwrap().is_none());
    }
}
