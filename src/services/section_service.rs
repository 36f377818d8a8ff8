use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use tracing::{debug, info};

use crate::database::entities::{nodes, section_node, sections};
use crate::errors::{ApiError, ApiResult};
use crate::services::repository::{Patch, Repository};

#[derive(Debug, Clone, Deserialize)]
pub struct SectionInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Overwritten with the authenticated user by the HTTP layer
    #[serde(default)]
    pub user_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Patch<sections::ActiveModel> for SectionPatch {
    fn apply(self, active: &mut sections::ActiveModel) {
        if let Some(name) = self.name {
            active.name = Set(name);
        }
        if let Some(description) = self.description {
            active.description = Set(Some(description));
        }
    }
}

/// Sections and their `section_node` attachments
pub struct SectionService {
    db: DatabaseConnection,
    repo: Repository<sections::Entity>,
}

impl SectionService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            repo: Repository::new(db.clone(), "Section"),
            db,
        }
    }

    /// Fails with `Duplicate` when the owner already has a section called
    /// `name`, other than `except`.
    async fn ensure_name_free(
        &self,
        name: &str,
        user_id: Option<i32>,
        except: Option<i32>,
    ) -> ApiResult<()> {
        let owner = match user_id {
            Some(user_id) => sections::Column::UserId.eq(user_id),
            None => sections::Column::UserId.is_null(),
        };
        let mut query = sections::Entity::find()
            .filter(sections::Column::Name.eq(name))
            .filter(owner);
        if let Some(id) = except {
            query = query.filter(sections::Column::Id.ne(id));
        }

        if query.one(&self.db).await?.is_some() {
            return Err(ApiError::duplicate(format!(
                "Section with name '{}' already exists.",
                name
            )));
        }
        Ok(())
    }

    /// Section names are unique per owner.
    pub async fn create(&self, input: SectionInput) -> ApiResult<sections::Model> {
        self.ensure_name_free(&input.name, input.user_id, None)
            .await?;

        let section = self
            .repo
            .create(sections::ActiveModel {
                name: Set(input.name),
                description: Set(input.description),
                user_id: Set(input.user_id),
                created_at: Set(Utc::now()),
                ..Default::default()
            })
            .await?;

        info!("Created section {} ({})", section.name, section.id);
        Ok(section)
    }

    pub async fn get(&self, id: i32) -> ApiResult<sections::Model> {
        self.repo.get(id).await
    }

    pub async fn list(&self, offset: u64, limit: Option<u64>) -> ApiResult<Vec<sections::Model>> {
        self.repo.list(offset, limit).await
    }

    pub async fn update(&self, id: i32, patch: SectionPatch) -> ApiResult<sections::Model> {
        if let Some(name) = patch.name.as_deref() {
            let current = self.repo.get(id).await?;
            self.ensure_name_free(name, current.user_id, Some(id))
                .await?;
        }
        self.repo.update(id, patch).await
    }

    /// Node types of the section, and their nodes, go with it.
    pub async fn delete(&self, id: i32) -> ApiResult<()> {
        self.repo.delete(id).await
    }

    pub async fn count(&self) -> ApiResult<u64> {
        self.repo.count().await
    }

    pub async fn get_by_name(&self, name: &str) -> ApiResult<Option<sections::Model>> {
        Ok(sections::Entity::find()
            .filter(sections::Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    pub async fn get_by_user_id(&self, user_id: i32) -> ApiResult<Vec<sections::Model>> {
        Ok(sections::Entity::find()
            .filter(sections::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?)
    }

    pub async fn add_node(&self, section_id: i32, node_id: i32) -> ApiResult<Vec<nodes::Model>> {
        self.get(section_id).await?;
        nodes::Entity::find_by_id(node_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ApiError::not_found("Node", node_id))?;

        let existing = section_node::Entity::find_by_id((section_id, node_id))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(ApiError::duplicate(format!(
                "Node {} is already attached to section {}.",
                node_id, section_id
            )));
        }

        section_node::ActiveModel {
            section_id: Set(section_id),
            node_id: Set(node_id),
        }
        .insert(&self.db)
        .await?;

        debug!("Attached node {} to section {}", node_id, section_id);
        self.list_nodes(section_id).await
    }

    pub async fn remove_node(&self, section_id: i32, node_id: i32) -> ApiResult<u64> {
        let result = section_node::Entity::delete_many()
            .filter(section_node::Column::SectionId.eq(section_id))
            .filter(section_node::Column::NodeId.eq(node_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Nodes attached through `section_node`
    pub async fn list_nodes(&self, section_id: i32) -> ApiResult<Vec<nodes::Model>> {
        self.get(section_id).await?;
        Ok(nodes::Entity::find()
            .inner_join(section_node::Entity)
            .filter(section_node::Column::SectionId.eq(section_id))
            .all(&self.db)
            .await?)
    }
}
