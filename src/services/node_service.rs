use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType,
    QueryFilter, QuerySelect, RelationTrait, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::database::entities::{node_node, node_types, nodes, sections};
use crate::errors::{ApiError, ApiResult};
use crate::services::repository::{Patch, Repository};

#[derive(Debug, Clone, Deserialize)]
pub struct NodeInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub type_id: i32,
    #[serde(default)]
    pub user_id: Option<i32>,
    /// Checked for existence only; the node reaches its section through its type
    #[serde(default)]
    pub section_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub type_id: Option<i32>,
}

impl Patch<nodes::ActiveModel> for NodePatch {
    fn apply(self, active: &mut nodes::ActiveModel) {
        if let Some(name) = self.name {
            active.name = Set(name);
        }
        if let Some(description) = self.description {
            active.description = Set(Some(description));
        }
        if let Some(type_id) = self.type_id {
            active.type_id = Set(type_id);
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeLinkInput {
    pub node1_id: i32,
    pub node2_id: i32,
    #[serde(default)]
    pub user_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NodeTypeRef {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NodeRef {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: Option<NodeTypeRef>,
}

impl From<(nodes::Model, Option<node_types::Model>)> for NodeRef {
    fn from((node, node_type): (nodes::Model, Option<node_types::Model>)) -> Self {
        Self {
            id: node.id,
            name: node.name,
            node_type: node_type.map(|t| NodeTypeRef {
                id: t.id,
                name: t.name,
                description: t.description,
            }),
        }
    }
}

/// Neighbourhood of one node: edges stored from it and edges stored to it.
#[derive(Debug, Clone, Serialize)]
pub struct NodeLinks {
    pub nodes: Vec<NodeRef>,
    pub nodes_to_this: Vec<NodeRef>,
}

/// Matches the edge between `a` and `b` in either stored order.
fn either_order(a: i32, b: i32) -> Condition {
    Condition::any()
        .add(
            Condition::all()
                .add(node_node::Column::Node1Id.eq(a))
                .add(node_node::Column::Node2Id.eq(b)),
        )
        .add(
            Condition::all()
                .add(node_node::Column::Node1Id.eq(b))
                .add(node_node::Column::Node2Id.eq(a)),
        )
}

pub struct NodeService {
    db: DatabaseConnection,
    repo: Repository<nodes::Entity>,
}

impl NodeService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            repo: Repository::new(db.clone(), "Node"),
            db,
        }
    }

    /// Creates a node after checking the section, the node type and the
    /// (name, type) uniqueness rule, in that order.
    pub async fn create(&self, input: NodeInput) -> ApiResult<nodes::Model> {
        if let Some(section_id) = input.section_id {
            sections::Entity::find_by_id(section_id)
                .one(&self.db)
                .await?
                .ok_or_else(|| ApiError::not_found("Section", section_id))?;
        }

        let node_type = node_types::Entity::find_by_id(input.type_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ApiError::not_found("Node type", input.type_id))?;

        self.ensure_name_free(
            &input.name,
            &node_type,
            input.section_id.unwrap_or(node_type.section_id),
            None,
        )
        .await?;

        let node = self
            .repo
            .create(nodes::ActiveModel {
                name: Set(input.name),
                description: Set(input.description),
                type_id: Set(input.type_id),
                user_id: Set(input.user_id),
                created_at: Set(Utc::now()),
                ..Default::default()
            })
            .await?;

        info!("Created node {} ({})", node.name, node.id);
        Ok(node)
    }

    pub async fn get(&self, id: i32) -> ApiResult<nodes::Model> {
        self.repo.get(id).await
    }

    pub async fn list(&self, offset: u64, limit: Option<u64>) -> ApiResult<Vec<nodes::Model>> {
        self.repo.list(offset, limit).await
    }

    /// A rename or type change must keep (name, type) unique.
    pub async fn update(&self, id: i32, patch: NodePatch) -> ApiResult<nodes::Model> {
        let current = self.repo.get(id).await?;
        let type_id = patch.type_id.unwrap_or(current.type_id);
        let node_type = node_types::Entity::find_by_id(type_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ApiError::not_found("Node type", type_id))?;

        if patch.name.is_some() || patch.type_id.is_some() {
            let name = patch.name.as_deref().unwrap_or(&current.name);
            self.ensure_name_free(name, &node_type, node_type.section_id, Some(id))
                .await?;
        }
        self.repo.update(id, patch).await
    }

    async fn ensure_name_free(
        &self,
        name: &str,
        node_type: &node_types::Model,
        section_id: i32,
        except: Option<i32>,
    ) -> ApiResult<()> {
        let mut query = nodes::Entity::find()
            .filter(nodes::Column::Name.eq(name))
            .filter(nodes::Column::TypeId.eq(node_type.id));
        if let Some(id) = except {
            query = query.filter(nodes::Column::Id.ne(id));
        }

        if query.one(&self.db).await?.is_some() {
            return Err(ApiError::duplicate(format!(
                "Node with name '{}' already exists in section {}.",
                name, section_id
            )));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> ApiResult<()> {
        self.repo.delete(id).await
    }

    pub async fn get_by_id(&self, id: i32) -> ApiResult<Option<nodes::Model>> {
        self.repo.find(id).await
    }

    pub async fn get_by_name(&self, name: &str) -> ApiResult<Option<nodes::Model>> {
        Ok(nodes::Entity::find()
            .filter(nodes::Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    pub async fn get_by_user_id(&self, user_id: i32) -> ApiResult<Vec<nodes::Model>> {
        Ok(nodes::Entity::find()
            .filter(nodes::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?)
    }

    /// Nodes whose type belongs to the section
    pub async fn get_by_section_id(&self, section_id: i32) -> ApiResult<Vec<nodes::Model>> {
        Ok(nodes::Entity::find()
            .inner_join(node_types::Entity)
            .filter(node_types::Column::SectionId.eq(section_id))
            .all(&self.db)
            .await?)
    }

    /// Like [`Self::get_by_section_id`], paired with each node's type
    pub async fn get_by_section_id_with_type(
        &self,
        section_id: i32,
    ) -> ApiResult<Vec<(nodes::Model, Option<node_types::Model>)>> {
        Ok(nodes::Entity::find()
            .find_also_related(node_types::Entity)
            .filter(node_types::Column::SectionId.eq(section_id))
            .all(&self.db)
            .await?)
    }

    /// Links two nodes. An existing edge in either order is a duplicate.
    pub async fn link(&self, input: NodeLinkInput) -> ApiResult<node_node::Model> {
        let (a, b) = (input.node1_id, input.node2_id);
        self.get(a).await?;
        self.get(b).await?;

        let existing = node_node::Entity::find()
            .filter(either_order(a, b))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(ApiError::duplicate(format!(
                "Link between nodes {} and {} already exists.",
                a, b
            )));
        }

        let link = node_node::ActiveModel {
            node1_id: Set(a),
            node2_id: Set(b),
            user_id: Set(input.user_id),
        }
        .insert(&self.db)
        .await?;

        debug!("Linked node {} to node {}", a, b);
        Ok(link)
    }

    /// Removes the edge in whichever order it was stored. Nothing to delete
    /// is a bad request.
    pub async fn delete_link(&self, a: i32, b: i32) -> ApiResult<u64> {
        let result = node_node::Entity::delete_many()
            .filter(either_order(a, b))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ApiError::bad_request("No rows to delete."));
        }

        debug!("Unlinked nodes {} and {}", a, b);
        Ok(result.rows_affected)
    }

    pub async fn linked_nodes(&self, id: i32) -> ApiResult<NodeLinks> {
        self.get(id).await?;

        let outgoing = nodes::Entity::find()
            .join(JoinType::InnerJoin, node_node::Relation::Target.def().rev())
            .filter(node_node::Column::Node1Id.eq(id))
            .find_also_related(node_types::Entity)
            .all(&self.db)
            .await?;

        let incoming = nodes::Entity::find()
            .join(JoinType::InnerJoin, node_node::Relation::Source.def().rev())
            .filter(node_node::Column::Node2Id.eq(id))
            .find_also_related(node_types::Entity)
            .all(&self.db)
            .await?;

        Ok(NodeLinks {
            nodes: outgoing.into_iter().map(NodeRef::from).collect(),
            nodes_to_this: incoming.into_iter().map(NodeRef::from).collect(),
        })
    }
}
