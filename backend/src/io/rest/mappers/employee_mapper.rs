use chrono::Utc;
use shared::EmployeeDto;

use crate::domain::models::Employee;

/// Mapper from domain employees to response DTOs. `full_name` and `age` are
/// computed here, at the output boundary, never persisted.
pub struct EmployeeMapper;

impl EmployeeMapper {
    pub fn to_dto(employee: Employee) -> EmployeeDto {
        let full_name = employee.full_name();
        let age = employee.age_on(Utc::now().date_naive());
        EmployeeDto {
            id: employee.id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            full_name,
            email: employee.email,
            date_of_birth: employee.date_of_birth,
            age,
            salary: employee.salary,
            phone_number: employee.phone_number,
            is_active: employee.is_active,
            created_at: employee.created_at,
            modified_at: employee.modified_at,
            department_id: employee.department_id,
            department_name: employee.department_name,
            department_code: employee.department_code,
        }
    }

    pub fn to_dto_list(employees: Vec<Employee>) -> Vec<EmployeeDto> {
        employees.into_iter().map(Self::to_dto).collect()
    }
}
