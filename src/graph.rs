use serde::{Deserialize, Serialize};

use crate::database::entities::{
    departments, employee_department, employee_employee, employee_position, employee_project,
    employees, node_node, node_types, nodes, positions, projects,
};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GraphLink {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// View model consumed by the force-directed graph renderer
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl GraphData {
    fn push_node(&mut self, id: String, name: String, kind: &str) {
        self.nodes.push(GraphNode {
            id,
            name,
            kind: kind.to_string(),
        });
    }

    fn push_link(&mut self, id: String, source: String, target: String) {
        self.links.push(GraphLink { id, source, target });
    }

    pub fn get_node_by_id(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Everything the organisation graph is built from
#[derive(Debug, Clone, Default)]
pub struct OrgRows {
    pub employees: Vec<employees::Model>,
    pub departments: Vec<departments::Model>,
    pub positions: Vec<positions::Model>,
    pub projects: Vec<projects::Model>,
    pub employee_departments: Vec<employee_department::Model>,
    pub employee_projects: Vec<employee_project::Model>,
    pub employee_positions: Vec<employee_position::Model>,
    pub employee_employees: Vec<employee_employee::Model>,
}

pub fn department_node_id(id: i32) -> String {
    format!("department-{}", id)
}

pub fn position_node_id(id: i32) -> String {
    format!("position-{}", id)
}

pub fn project_node_id(id: i32) -> String {
    format!("project-{}", id)
}

pub fn section_node_id(id: i32) -> String {
    format!("node-{}", id)
}

/// Builds the global graph: employees keep their UUID as node id, the other
/// kinds get a `{kind}-{id}` id, and every join row becomes one link.
pub fn materialize_org(rows: &OrgRows) -> GraphData {
    let mut graph = GraphData::default();

    for e in &rows.employees {
        graph.push_node(e.uuid.clone(), e.fio.clone(), "employee");
    }
    for d in &rows.departments {
        graph.push_node(department_node_id(d.id), d.display_name(), "department");
    }
    for p in &rows.positions {
        graph.push_node(position_node_id(p.id), p.value.clone(), "position");
    }
    for p in &rows.projects {
        graph.push_node(project_node_id(p.id), p.value.clone(), "project");
    }

    for ed in &rows.employee_departments {
        graph.push_link(
            format!("ed-{}-{}", ed.employee_uuid, ed.departments_id),
            ed.employee_uuid.clone(),
            department_node_id(ed.departments_id),
        );
    }
    for ep in &rows.employee_projects {
        graph.push_link(
            format!("ep-{}-{}", ep.employee_uuid, ep.project_id),
            ep.employee_uuid.clone(),
            project_node_id(ep.project_id),
        );
    }
    for ep in &rows.employee_positions {
        graph.push_link(
            format!("epos-{}-{}", ep.employee_uuid, ep.position_id),
            ep.employee_uuid.clone(),
            position_node_id(ep.position_id),
        );
    }
    for ee in &rows.employee_employees {
        graph.push_link(
            format!("ee-{}-{}", ee.employee1_uuid, ee.employee2_uuid),
            ee.employee1_uuid.clone(),
            ee.employee2_uuid.clone(),
        );
    }

    graph
}

/// Builds a section graph from the section's nodes (with their types) and
/// the edges touching them.
pub fn materialize_section(
    section_nodes: &[(nodes::Model, Option<node_types::Model>)],
    edges: &[node_node::Model],
) -> GraphData {
    let mut graph = GraphData::default();

    for (node, node_type) in section_nodes {
        let kind = node_type.as_ref().map(|t| t.name.as_str()).unwrap_or("node");
        graph.push_node(section_node_id(node.id), node.name.clone(), kind);
    }

    for edge in edges {
        graph.push_link(
            format!("nn-{}-{}", edge.node1_id, edge.node2_id),
            section_node_id(edge.node1_id),
            section_node_id(edge.node2_id),
        );
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn employee(uuid: &str, fio: &str) -> employees::Model {
        employees::Model {
            uuid: uuid.to_string(),
            fio: fio.to_string(),
        }
    }

    fn node(id: i32, name: &str, type_id: i32) -> nodes::Model {
        nodes::Model {
            id,
            name: name.to_string(),
            description: None,
            type_id,
            user_id: None,
            created_at: Utc::now(),
        }
    }

    fn node_type(id: i32, name: &str) -> node_types::Model {
        node_types::Model {
            id,
            name: name.to_string(),
            description: None,
            section_id: 1,
            user_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_org_graph_ids_and_order() {
        let rows = OrgRows {
            employees: vec![employee("u1", "Ivanov"), employee("u2", "Petrov")],
            departments: vec![
                departments::Model {
                    id: 7,
                    name: None,
                    description: None,
                },
                departments::Model {
                    id: 8,
                    name: Some("Sales".to_string()),
                    description: None,
                },
            ],
            positions: vec![positions::Model {
                id: 2,
                value: "Lead".to_string(),
                description: None,
            }],
            projects: vec![projects::Model {
                id: 3,
                value: "Apollo".to_string(),
                description: None,
            }],
            ..Default::default()
        };

        let graph = materialize_org(&rows);
        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["u1", "u2", "department-7", "department-8", "position-2", "project-3"]
        );
        assert_eq!(graph.get_node_by_id("department-7").unwrap().name, "Dept 7");
        assert_eq!(graph.get_node_by_id("department-8").unwrap().name, "Sales");
        assert_eq!(graph.get_node_by_id("u1").unwrap().kind, "employee");
        assert!(graph.links.is_empty());
    }

    #[test]
    fn test_org_graph_links_per_join_row() {
        let rows = OrgRows {
            employee_departments: vec![employee_department::Model {
                employee_uuid: "u1".to_string(),
                departments_id: 7,
            }],
            employee_projects: vec![employee_project::Model {
                employee_uuid: "u1".to_string(),
                project_id: 3,
            }],
            employee_positions: vec![employee_position::Model {
                employee_uuid: "u2".to_string(),
                position_id: 2,
            }],
            employee_employees: vec![employee_employee::Model {
                employee1_uuid: "u1".to_string(),
                employee2_uuid: "u2".to_string(),
            }],
            ..Default::default()
        };

        let graph = materialize_org(&rows);
        assert_eq!(
            graph.links,
            vec![
                GraphLink {
                    id: "ed-u1-7".to_string(),
                    source: "u1".to_string(),
                    target: "department-7".to_string(),
                },
                GraphLink {
                    id: "ep-u1-3".to_string(),
                    source: "u1".to_string(),
                    target: "project-3".to_string(),
                },
                GraphLink {
                    id: "epos-u2-2".to_string(),
                    source: "u2".to_string(),
                    target: "position-2".to_string(),
                },
                GraphLink {
                    id: "ee-u1-u2".to_string(),
                    source: "u1".to_string(),
                    target: "u2".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_section_graph() {
        let section_nodes = vec![
            (node(1, "db-1", 10), Some(node_type(10, "Server"))),
            (node(2, "web-1", 10), Some(node_type(10, "Server"))),
        ];
        let edges = vec![node_node::Model {
            node1_id: 1,
            node2_id: 2,
            user_id: Some(1),
        }];

        let graph = materialize_section(&section_nodes, &edges);
        assert_eq!(graph.nodes[0].id, "node-1");
        assert_eq!(graph.nodes[0].kind, "Server");
        assert_eq!(
            graph.links,
            vec![GraphLink {
                id: "nn-1-2".to_string(),
                source: "node-1".to_string(),
                target: "node-2".to_string(),
            }]
        );
    }

    #[test]
    fn test_serialized_shape_uses_type_key() {
        let graph = materialize_section(&[(node(4, "x", 1), None)], &[]);
        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["nodes"][0]["type"], "node");
        assert_eq!(json["links"], serde_json::json!([]));
    }
}
