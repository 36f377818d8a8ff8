use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter};

use crate::database::entities::{
    departments, employee_department, employee_employee, employee_position, employee_project,
    employees, node_node, node_types, nodes, positions, projects,
};
use crate::errors::ApiResult;
use crate::graph::{materialize_org, materialize_section, GraphData, OrgRows};
use crate::services::node_service::NodeService;

/// Loads rows from the store and hands them to the graph materializer
pub struct GraphService {
    db: DatabaseConnection,
}

impl GraphService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn org_graph(&self) -> ApiResult<GraphData> {
        let rows = OrgRows {
            employees: employees::Entity::find().all(&self.db).await?,
            departments: departments::Entity::find().all(&self.db).await?,
            positions: positions::Entity::find().all(&self.db).await?,
            projects: projects::Entity::find().all(&self.db).await?,
            employee_departments: employee_department::Entity::find().all(&self.db).await?,
            employee_projects: employee_project::Entity::find().all(&self.db).await?,
            employee_positions: employee_position::Entity::find().all(&self.db).await?,
            employee_employees: employee_employee::Entity::find().all(&self.db).await?,
        };

        tracing::debug!(
            "Materializing org graph from {} employees",
            rows.employees.len()
        );
        Ok(materialize_org(&rows))
    }

    /// Nodes whose type belongs to the section, plus every edge with at least
    /// one endpoint among them. The far endpoint of an edge leaving the
    /// section is appended to the nodes so every link resolves.
    pub async fn section_graph(&self, section_id: i32) -> ApiResult<GraphData> {
        let mut section_nodes = NodeService::new(self.db.clone())
            .get_by_section_id_with_type(section_id)
            .await?;

        let ids: Vec<i32> = section_nodes.iter().map(|(node, _)| node.id).collect();
        let edges = if ids.is_empty() {
            Vec::new()
        } else {
            node_node::Entity::find()
                .filter(
                    Condition::any()
                        .add(node_node::Column::Node1Id.is_in(ids.clone()))
                        .add(node_node::Column::Node2Id.is_in(ids.clone())),
                )
                .all(&self.db)
                .await?
        };

        let mut foreign: Vec<i32> = edges
            .iter()
            .flat_map(|edge| [edge.node1_id, edge.node2_id])
            .filter(|id| !ids.contains(id))
            .collect();
        foreign.sort_unstable();
        foreign.dedup();
        if !foreign.is_empty() {
            let outside = nodes::Entity::find()
                .filter(nodes::Column::Id.is_in(foreign))
                .find_also_related(node_types::Entity)
                .all(&self.db)
                .await?;
            section_nodes.extend(outside);
        }

        Ok(materialize_section(&section_nodes, &edges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;
    use crate::services::employee_service::{EmployeeInput, EmployeeService};
    use crate::services::lookup_service::{department_service, DepartmentInput};
    use crate::services::node_service::{NodeInput, NodeLinkInput};
    use crate::services::node_type_service::{NodeTypeInput, NodeTypeService};
    use crate::services::section_service::{SectionInput, SectionService};

    #[tokio::test]
    async fn test_org_graph_from_store() {
        let db = setup_test_db().await;
        let employees = EmployeeService::new(db.clone());
        employees
            .create(EmployeeInput {
                uuid: Some("u1".to_string()),
                fio: "Ivanov".to_string(),
            })
            .await
            .unwrap();
        let dept = department_service(db.clone())
            .create(
                DepartmentInput {
                    name: Some("Ops".to_string()),
                    description: None,
                }
                .into_active_model(),
            )
            .await
            .unwrap();
        employees.bind_department("u1", dept.id).await.unwrap();

        let graph = GraphService::new(db).org_graph().await.unwrap();
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.links.len(), 1);
        assert_eq!(graph.links[0].id, format!("ed-u1-{}", dept.id));
        assert_eq!(graph.links[0].target, format!("department-{}", dept.id));
    }

    #[tokio::test]
    async fn test_section_graph_includes_edges_from_either_endpoint() {
        let db = setup_test_db().await;
        let sections = SectionService::new(db.clone());
        let node_types = NodeTypeService::new(db.clone());
        let nodes = NodeService::new(db.clone());

        let mut node_ids = Vec::new();
        let mut section_ids = Vec::new();
        for name in ["Left", "Right"] {
            let section = sections
                .create(SectionInput {
                    name: name.to_string(),
                    description: None,
                    user_id: None,
                })
                .await
                .unwrap();
            let node_type = node_types
                .create(NodeTypeInput {
                    name: "Host".to_string(),
                    description: None,
                    section_id: section.id,
                    user_id: None,
                })
                .await
                .unwrap();
            let node = nodes
                .create(NodeInput {
                    name: format!("{}-host", name),
                    description: None,
                    type_id: node_type.id,
                    user_id: None,
                    section_id: Some(section.id),
                })
                .await
                .unwrap();
            section_ids.push(section.id);
            node_ids.push(node.id);
        }

        // Stored from the Right node to the Left node
        nodes
            .link(NodeLinkInput {
                node1_id: node_ids[1],
                node2_id: node_ids[0],
                user_id: None,
            })
            .await
            .unwrap();

        let service = GraphService::new(db);
        let left = service.section_graph(section_ids[0]).await.unwrap();
        assert_eq!(left.nodes.len(), 2);
        assert_eq!(left.nodes[0].id, format!("node-{}", node_ids[0]));
        assert_eq!(left.nodes[0].kind, "Host");
        assert_eq!(left.links.len(), 1);
        assert_eq!(left.links[0].source, format!("node-{}", node_ids[1]));

        // The endpoint from the other section is listed after the section's own
        assert_eq!(left.nodes[1].name, "Right-host");
        for link in &left.links {
            assert!(left.get_node_by_id(&link.source).is_some());
            assert!(left.get_node_by_id(&link.target).is_some());
        }

        let empty = service.section_graph(999).await.unwrap();
        assert!(empty.nodes.is_empty());
        assert!(empty.links.is_empty());
    }
}
