use anyhow::Result;
use axum::{
    http::HeaderValue,
    routing::{delete, get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use super::handlers::{
    auth, config, departments, employees, graph, health, node_types, nodes, positions, projects,
    relations, sections,
};
use crate::config::AuthConfig;
use crate::services::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub auth: AuthService,
}

pub async fn create_app(
    db: DatabaseConnection,
    cors_origin: Option<&str>,
    auth_config: AuthConfig,
) -> Result<Router> {
    let state = AppState {
        auth: AuthService::new(db.clone(), auth_config),
        db,
    };

    let cors = match cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(health::health_check))
        .merge(auth_routes())
        .merge(org_routes())
        .merge(relation_routes())
        .merge(graph_routes())
        .merge(config_routes())
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(app)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/token", post(auth::token))
        .route("/me", get(auth::me))
}

fn org_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/departments/",
            get(departments::list_departments).post(departments::create_department),
        )
        .route("/departments/count", get(departments::count_departments))
        .route(
            "/departments/:id",
            get(departments::get_department)
                .put(departments::update_department)
                .delete(departments::delete_department),
        )
        .route(
            "/positions/",
            get(positions::list_positions).post(positions::create_position),
        )
        .route("/positions/count", get(positions::count_positions))
        .route(
            "/positions/:id",
            get(positions::get_position)
                .put(positions::update_position)
                .delete(positions::delete_position),
        )
        .route(
            "/projects/",
            get(projects::list_projects).post(projects::create_project),
        )
        .route("/projects/count", get(projects::count_projects))
        .route(
            "/projects/:id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route(
            "/employee/",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route(
            "/employee/:uuid",
            get(employees::get_employee)
                .put(employees::update_employee)
                .delete(employees::delete_employee),
        )
        .route("/employees/count", get(employees::count_employees))
}

fn relation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/employee_department/",
            get(relations::list_departments)
                .post(relations::bind_department)
                .delete(relations::unbind_department),
        )
        .route(
            "/employee_department/:uuid",
            get(relations::employee_departments),
        )
        .route(
            "/employee_position/",
            get(relations::list_positions)
                .post(relations::bind_position)
                .delete(relations::unbind_position),
        )
        .route(
            "/employee_position/:uuid",
            get(relations::employee_positions),
        )
        .route(
            "/employee_project/",
            get(relations::list_projects)
                .post(relations::bind_project)
                .delete(relations::unbind_project),
        )
        .route("/employee_project/:uuid", get(relations::employee_projects))
        .route(
            "/employee_employee/",
            get(relations::list_employees)
                .post(relations::bind_employee)
                .delete(relations::unbind_employee),
        )
        .route(
            "/employee_employee/:uuid",
            get(relations::employee_employees),
        )
}

fn graph_routes() -> Router<AppState> {
    Router::new()
        // Sections
        .route(
            "/sections/",
            get(sections::list_sections).post(sections::create_section),
        )
        .route(
            "/sections/:id",
            get(sections::get_section)
                .put(sections::update_section)
                .delete(sections::delete_section),
        )
        .route("/sections/by-name/:name", get(sections::get_section_by_name))
        .route("/sections/by-user/:id", get(sections::get_sections_by_user))
        .route("/sections/:id/nodes", get(sections::list_section_nodes))
        .route(
            "/sections/:id/nodes/:node_id",
            post(sections::attach_node).delete(sections::detach_node),
        )
        // Node types
        .route(
            "/node-types/",
            get(node_types::list_node_types).post(node_types::create_node_type),
        )
        .route(
            "/node-types/:id",
            get(node_types::get_node_type)
                .put(node_types::update_node_type)
                .delete(node_types::delete_node_type),
        )
        .route(
            "/node-types/by-section/:id",
            get(node_types::get_node_types_by_section),
        )
        .route(
            "/node-types/by-name/:name",
            get(node_types::get_node_type_by_name),
        )
        .route(
            "/node-types/by-user/:id",
            get(node_types::get_node_types_by_user),
        )
        // Nodes and links
        .route("/nodes/", get(nodes::list_nodes).post(nodes::create_node))
        .route(
            "/nodes/:id",
            get(nodes::get_node)
                .put(nodes::update_node)
                .delete(nodes::delete_node),
        )
        .route("/nodes/:id/links", get(nodes::node_links))
        .route("/nodes/by-id/:id", get(nodes::get_node_by_id))
        .route("/nodes/by-name/:name", get(nodes::get_node_by_name))
        .route("/nodes/by-user/:id", get(nodes::get_nodes_by_user))
        .route("/nodes/by-section/:id", get(nodes::get_nodes_by_section))
        .route("/nodes/link", post(nodes::link_nodes))
        .route(
            "/nodes/link/:node1_id/:node2_id",
            delete(nodes::unlink_nodes),
        )
        // Materialized views
        .route("/graph", get(graph::org_graph))
        .route("/public/graph", get(graph::public_graph))
        .route("/graph/section/:id", get(graph::section_graph))
}

fn config_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/config/nodes",
            get(config::get_node_config).post(config::update_node_config),
        )
        .route(
            "/config/nodes/section/:id",
            get(config::get_section_node_config),
        )
}
