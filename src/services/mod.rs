pub mod auth_service;
pub mod config_service;
pub mod employee_service;
pub mod graph_service;
pub mod lookup_service;
pub mod node_service;
pub mod node_type_service;
pub mod repository;
pub mod section_service;

pub use auth_service::AuthService;
pub use config_service::ConfigService;
pub use employee_service::EmployeeService;
pub use graph_service::GraphService;
pub use node_service::NodeService;
pub use node_type_service::NodeTypeService;
pub use repository::{Patch, Repository, DEFAULT_LIST_LIMIT};
pub use section_service::SectionService;
