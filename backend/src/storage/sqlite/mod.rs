pub mod department_repository;
pub mod employee_repository;

pub use department_repository::SqliteDepartmentRepository;
pub use employee_repository::SqliteEmployeeRepository;
