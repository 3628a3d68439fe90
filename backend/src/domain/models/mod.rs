pub mod department;
pub mod employee;

pub use department::{Department, NewDepartment};
pub use employee::{Employee, NewEmployee};
