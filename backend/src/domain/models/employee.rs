use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;

/// An employee as stored, plus the department name/code the repository
/// joins in on every read.
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub salary: Decimal,
    pub phone_number: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: Option<DateTime<Utc>>,
    pub department_id: i64,
    /// Name of the employee's department (joined, never stored here)
    pub department_name: String,
    /// Code of the employee's department (joined, never stored here)
    pub department_code: String,
}

impl Employee {
    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whole years of age on `reference`, one less if the birthday has not
    /// yet occurred that year.
    pub fn age_on(&self, reference: NaiveDate) -> i32 {
        let mut age = reference.year() - self.date_of_birth.year();
        if reference.ordinal() < self.date_of_birth.ordinal() {
            age -= 1;
        }
        age
    }
}

/// Fields for an employee that has not been persisted yet. The store
/// assigns `id` and `created_at`; new employees start active.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub salary: Decimal,
    pub phone_number: Option<String>,
    pub department_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn employee_born(date_of_birth: NaiveDate) -> Employee {
        Employee {
            id: 1,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            date_of_birth,
            salary: dec!(50000.00),
            phone_number: None,
            is_active: true,
            created_at: Utc::now(),
            modified_at: None,
            department_id: 1,
            department_name: "Information Technology".to_string(),
            department_code: "IT".to_string(),
        }
    }

    #[test]
    fn age_after_birthday_this_year() {
        let employee = employee_born(NaiveDate::from_ymd_opt(1990, 1, 15).unwrap());
        let reference = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(employee.age_on(reference), 34);
    }

    #[test]
    fn age_before_birthday_this_year() {
        let employee = employee_born(NaiveDate::from_ymd_opt(1990, 1, 15).unwrap());
        let reference = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(employee.age_on(reference), 33);
    }

    #[test]
    fn age_on_the_birthday_itself() {
        let employee = employee_born(NaiveDate::from_ymd_opt(1990, 1, 15).unwrap());
        let reference = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(employee.age_on(reference), 34);
    }

    #[test]
    fn full_name_joins_first_and_last() {
        let employee = employee_born(NaiveDate::from_ymd_opt(1990, 1, 15).unwrap());
        assert_eq!(employee.full_name(), "John Doe");
    }
}
