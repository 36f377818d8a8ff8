pub mod config_entries;
pub mod departments;
pub mod employee_department;
pub mod employee_employee;
pub mod employee_position;
pub mod employee_project;
pub mod employees;
pub mod node_node;
pub mod node_types;
pub mod nodes;
pub mod positions;
pub mod projects;
pub mod section_node;
pub mod sections;
pub mod users;
