// handlers/mod.rs - HTTP handlers
//
// employees: the four CRUD endpoints over the employee table
// system:    service info and health probe
pub mod employees;
pub mod system;

pub use employees::{create_employee, delete_employee, list_employees, update_employee};
pub use system::{health, not_found, root};
