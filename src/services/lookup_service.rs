//! Input payloads and repositories for the department, position and project
//! lookup tables.

use sea_orm::{DatabaseConnection, Set};
use serde::Deserialize;

use crate::database::entities::{departments, positions, projects};
use crate::services::repository::{Patch, Repository};

pub type DepartmentService = Repository<departments::Entity>;
pub type PositionService = Repository<positions::Entity>;
pub type ProjectService = Repository<projects::Entity>;

pub fn department_service(db: DatabaseConnection) -> DepartmentService {
    Repository::new(db, "Department")
}

pub fn position_service(db: DatabaseConnection) -> PositionService {
    Repository::new(db, "Position")
}

pub fn project_service(db: DatabaseConnection) -> ProjectService {
    Repository::new(db, "Project")
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartmentInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl DepartmentInput {
    pub fn into_active_model(self) -> departments::ActiveModel {
        departments::ActiveModel {
            name: Set(self.name),
            description: Set(self.description),
            ..Default::default()
        }
    }
}

impl Patch<departments::ActiveModel> for DepartmentInput {
    fn apply(self, active: &mut departments::ActiveModel) {
        if let Some(name) = self.name {
            active.name = Set(Some(name));
        }
        if let Some(description) = self.description {
            active.description = Set(Some(description));
        }
    }
}

/// Payload shared by positions and projects: both carry a display value.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueInput {
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial form of [`ValueInput`] accepted by updates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValuePatch {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ValueInput {
    pub fn into_position(self) -> positions::ActiveModel {
        positions::ActiveModel {
            value: Set(self.value),
            description: Set(self.description),
            ..Default::default()
        }
    }

    pub fn into_project(self) -> projects::ActiveModel {
        projects::ActiveModel {
            value: Set(self.value),
            description: Set(self.description),
            ..Default::default()
        }
    }
}

impl Patch<positions::ActiveModel> for ValuePatch {
    fn apply(self, active: &mut positions::ActiveModel) {
        if let Some(value) = self.value {
            active.value = Set(value);
        }
        if let Some(description) = self.description {
            active.description = Set(Some(description));
        }
    }
}

impl Patch<projects::ActiveModel> for ValuePatch {
    fn apply(self, active: &mut projects::ActiveModel) {
        if let Some(value) = self.value {
            active.value = Set(value);
        }
        if let Some(description) = self.description {
            active.description = Set(Some(description));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_position_update_keeps_missing_fields() {
        let db = setup_test_db().await;
        let service = position_service(db);

        let created = service
            .create(
                ValueInput {
                    value: "Engineer".to_string(),
                    description: Some("Builds things".to_string()),
                }
                .into_position(),
            )
            .await
            .unwrap();

        let updated = service
            .update(
                created.id,
                ValuePatch {
                    value: Some("Senior Engineer".to_string()),
                    description: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.value, "Senior Engineer");
        assert_eq!(updated.description.as_deref(), Some("Builds things"));
    }

    #[tokio::test]
    async fn test_department_without_name_is_allowed() {
        let db = setup_test_db().await;
        let service = department_service(db);

        let created = service
            .create(DepartmentInput::default().into_active_model())
            .await
            .unwrap();

        assert!(created.name.is_none());
        assert_eq!(created.display_name(), format!("Dept {}", created.id));
    }

    #[tokio::test]
    async fn test_project_not_found_names_entity() {
        let db = setup_test_db().await;
        let err = project_service(db).get(3).await.unwrap_err();
        assert_eq!(err.to_string(), "Project with id 3 not found.");
    }
}
