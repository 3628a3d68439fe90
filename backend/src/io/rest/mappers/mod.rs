pub mod department_mapper;
pub mod employee_mapper;

pub use department_mapper::DepartmentMapper;
pub use employee_mapper::EmployeeMapper;
