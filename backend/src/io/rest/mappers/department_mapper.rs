use shared::DepartmentDto;

use crate::domain::models::Department;

/// Mapper from domain departments to response DTOs.
pub struct DepartmentMapper;

impl DepartmentMapper {
    pub fn to_dto(department: Department) -> DepartmentDto {
        DepartmentDto {
            id: department.id,
            code: department.code,
            name: department.name,
            description: department.description,
            is_active: department.is_active,
            created_at: department.created_at,
            modified_at: department.modified_at,
            employee_count: department.employee_count,
        }
    }

    pub fn to_dto_list(departments: Vec<Department>) -> Vec<DepartmentDto> {
        departments.into_iter().map(Self::to_dto).collect()
    }
}
