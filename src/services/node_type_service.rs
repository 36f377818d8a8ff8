use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use tracing::info;

use crate::database::entities::{node_types, sections};
use crate::errors::{ApiError, ApiResult};
use crate::services::repository::{Patch, Repository};

#[derive(Debug, Clone, Deserialize)]
pub struct NodeTypeInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub section_id: i32,
    #[serde(default)]
    pub user_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeTypePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Patch<node_types::ActiveModel> for NodeTypePatch {
    fn apply(self, active: &mut node_types::ActiveModel) {
        if let Some(name) = self.name {
            active.name = Set(name);
        }
        if let Some(description) = self.description {
            active.description = Set(Some(description));
        }
    }
}

pub struct NodeTypeService {
    db: DatabaseConnection,
    repo: Repository<node_types::Entity>,
}

impl NodeTypeService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            repo: Repository::new(db.clone(), "Node type"),
            db,
        }
    }

    pub async fn create(&self, input: NodeTypeInput) -> ApiResult<node_types::Model> {
        sections::Entity::find_by_id(input.section_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ApiError::not_found("Section", input.section_id))?;

        self.ensure_name_free(&input.name, input.section_id, None)
            .await?;

        let node_type = self
            .repo
            .create(node_types::ActiveModel {
                name: Set(input.name),
                description: Set(input.description),
                section_id: Set(input.section_id),
                user_id: Set(input.user_id),
                created_at: Set(Utc::now()),
                ..Default::default()
            })
            .await?;

        info!(
            "Created node type {} in section {}",
            node_type.name, node_type.section_id
        );
        Ok(node_type)
    }

    pub async fn get(&self, id: i32) -> ApiResult<node_types::Model> {
        self.repo.get(id).await
    }

    pub async fn list(&self, offset: u64, limit: Option<u64>) -> ApiResult<Vec<node_types::Model>> {
        self.repo.list(offset, limit).await
    }

    pub async fn update(&self, id: i32, patch: NodeTypePatch) -> ApiResult<node_types::Model> {
        if let Some(name) = patch.name.as_deref() {
            let current = self.repo.get(id).await?;
            self.ensure_name_free(name, current.section_id, Some(id))
                .await?;
        }
        self.repo.update(id, patch).await
    }

    async fn ensure_name_free(
        &self,
        name: &str,
        section_id: i32,
        except: Option<i32>,
    ) -> ApiResult<()> {
        let mut query = node_types::Entity::find()
            .filter(node_types::Column::Name.eq(name))
            .filter(node_types::Column::SectionId.eq(section_id));
        if let Some(id) = except {
            query = query.filter(node_types::Column::Id.ne(id));
        }

        if query.one(&self.db).await?.is_some() {
            return Err(ApiError::duplicate(format!(
                "Node type with name '{}' already exists in section {}.",
                name, section_id
            )));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> ApiResult<()> {
        self.repo.delete(id).await
    }

    pub async fn get_by_name(&self, name: &str) -> ApiResult<Option<node_types::Model>> {
        Ok(node_types::Entity::find()
            .filter(node_types::Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    pub async fn get_by_user_id(&self, user_id: i32) -> ApiResult<Vec<node_types::Model>> {
        Ok(node_types::Entity::find()
            .filter(node_types::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?)
    }

    pub async fn get_by_section_id(&self, section_id: i32) -> ApiResult<Vec<node_types::Model>> {
        Ok(node_types::Entity::find()
            .filter(node_types::Column::SectionId.eq(section_id))
            .all(&self.db)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;
    use crate::services::section_service::{SectionInput, SectionService};

    async fn section(db: &DatabaseConnection, name: &str) -> sections::Model {
        SectionService::new(db.clone())
            .create(SectionInput {
                name: name.to_string(),
                description: None,
                user_id: None,
            })
            .await
            .unwrap()
    }

    fn input(name: &str, section_id: i32) -> NodeTypeInput {
        NodeTypeInput {
            name: name.to_string(),
            description: Some("kind".to_string()),
            section_id,
            user_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_requires_existing_section() {
        let db = setup_test_db().await;
        let service = NodeTypeService::new(db);

        let err = service.create(input("Server", 12)).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Section with id 12 not found.");
    }

    #[tokio::test]
    async fn test_name_is_unique_within_section() {
        let db = setup_test_db().await;
        let infra = section(&db, "Infra").await;
        let org = section(&db, "Org").await;
        let service = NodeTypeService::new(db);

        service.create(input("Server", infra.id)).await.unwrap();
        service.create(input("Server", org.id)).await.unwrap();

        let err = service.create(input("Server", infra.id)).await.unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(
            err.to_string(),
            format!(
                "Node type with name 'Server' already exists in section {}.",
                infra.id
            )
        );
    }

    #[tokio::test]
    async fn test_rename_within_section_is_checked() {
        let db = setup_test_db().await;
        let infra = section(&db, "Infra").await;
        let service = NodeTypeService::new(db);

        let server = service.create(input("Server", infra.id)).await.unwrap();
        service.create(input("Switch", infra.id)).await.unwrap();

        let rename = |name: &str| NodeTypePatch {
            name: Some(name.to_string()),
            description: None,
        };
        let err = service.update(server.id, rename("Switch")).await.unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(
            service.update(server.id, rename("Server")).await.unwrap().name,
            "Server"
        );
        assert_eq!(
            service.update(server.id, rename("Host")).await.unwrap().name,
            "Host"
        );
    }

    #[tokio::test]
    async fn test_filtered_lookups() {
        let db = setup_test_db().await;
        let infra = section(&db, "Infra").await;
        let service = NodeTypeService::new(db);

        service.create(input("Server", infra.id)).await.unwrap();
        service.create(input("Switch", infra.id)).await.unwrap();

        assert_eq!(service.get_by_section_id(infra.id).await.unwrap().len(), 2);
        assert_eq!(
            service.get_by_name("Switch").await.unwrap().unwrap().section_id,
            infra.id
        );
        assert!(service.get_by_name("Router").await.unwrap().is_none());
        assert!(service.get_by_user_id(1).await.unwrap().is_empty());
    }
}
