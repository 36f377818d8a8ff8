//! Key/value settings scoped by (name, owner, section).
//!
//! Rows written without an authenticated user are stored under
//! [`ANONYMOUS_USER_ID`]; anonymous and per-user scopes never see each
//! other's values.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::database::entities::config_entries::{self, ANONYMOUS_USER_ID};
use crate::errors::ApiResult;

/// Config group holding graph-rendering parameters
pub const NODES_CONFIG: &str = "nodes";

const DISTANCE: &str = "distance";
const NODE_RADIUS: &str = "node_radius";
const MULTIPLIER_NODE_SIZE: &str = "multiplier_node_size";
const NODE_LABELS_SHOW: &str = "node_labels_show";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigScope<'a> {
    pub name: &'a str,
    pub user_id: i32,
    pub section_id: Option<i32>,
}

impl<'a> ConfigScope<'a> {
    pub fn new(name: &'a str, user_id: Option<i32>, section_id: Option<i32>) -> Self {
        Self {
            name,
            user_id: user_id.unwrap_or(ANONYMOUS_USER_ID),
            section_id,
        }
    }

    fn condition(&self) -> Condition {
        let section = match self.section_id {
            Some(section_id) => config_entries::Column::SectionId.eq(section_id),
            None => config_entries::Column::SectionId.is_null(),
        };
        Condition::all()
            .add(config_entries::Column::Name.eq(self.name))
            .add(config_entries::Column::UserId.eq(self.user_id))
            .add(section)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOutcome {
    Created,
    Updated,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigWrite {
    pub key: String,
    pub outcome: WriteOutcome,
}

/// Graph-rendering parameters. Absent values are neither read nor written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    #[serde(default)]
    pub distance: Option<i64>,
    #[serde(default)]
    pub node_radius: Option<i64>,
    #[serde(default)]
    pub multiplier_node_size: Option<f64>,
    #[serde(default)]
    pub node_labels_show: Option<bool>,
}

impl NodeConfig {
    fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = Vec::new();
        if let Some(distance) = self.distance {
            entries.push((DISTANCE, distance.to_string()));
        }
        if let Some(radius) = self.node_radius {
            entries.push((NODE_RADIUS, radius.to_string()));
        }
        if let Some(multiplier) = self.multiplier_node_size {
            entries.push((MULTIPLIER_NODE_SIZE, multiplier.to_string()));
        }
        if let Some(show) = self.node_labels_show {
            entries.push((NODE_LABELS_SHOW, show.to_string()));
        }
        entries
    }

    fn set(&mut self, key: &str, value: &str) {
        let parsed = match key {
            DISTANCE => value.parse().map(|v| self.distance = Some(v)).is_ok(),
            NODE_RADIUS => value.parse().map(|v| self.node_radius = Some(v)).is_ok(),
            MULTIPLIER_NODE_SIZE => value
                .parse()
                .map(|v| self.multiplier_node_size = Some(v))
                .is_ok(),
            NODE_LABELS_SHOW => match value.to_ascii_lowercase().as_str() {
                "true" | "1" => {
                    self.node_labels_show = Some(true);
                    true
                }
                "false" | "0" => {
                    self.node_labels_show = Some(false);
                    true
                }
                _ => false,
            },
            _ => true,
        };

        if !parsed {
            warn!("Ignoring unparsable config value {}={}", key, value);
        }
    }
}

/// POST body for the nodes config; `section_id` selects the scope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeConfigUpdate {
    #[serde(flatten)]
    pub values: NodeConfig,
    #[serde(default)]
    pub section_id: Option<i32>,
}

pub struct ConfigService {
    db: DatabaseConnection,
}

impl ConfigService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_all(&self, scope: &ConfigScope<'_>) -> ApiResult<Vec<config_entries::Model>> {
        Ok(config_entries::Entity::find()
            .filter(scope.condition())
            .all(&self.db)
            .await?)
    }

    pub async fn get(
        &self,
        scope: &ConfigScope<'_>,
        key: &str,
    ) -> ApiResult<Option<config_entries::Model>> {
        Ok(config_entries::Entity::find()
            .filter(scope.condition())
            .filter(config_entries::Column::Key.eq(key))
            .one(&self.db)
            .await?)
    }

    /// Inserts the key if missing and rewrites it only when the value differs.
    pub async fn upsert(
        &self,
        scope: &ConfigScope<'_>,
        key: &str,
        value: String,
    ) -> ApiResult<WriteOutcome> {
        let outcome = match self.get(scope, key).await? {
            None => {
                config_entries::ActiveModel {
                    name: Set(scope.name.to_string()),
                    description: Set(None),
                    key: Set(key.to_string()),
                    value: Set(value),
                    is_active: Set(true),
                    user_id: Set(scope.user_id),
                    section_id: Set(scope.section_id),
                    created_at: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(&self.db)
                .await?;
                WriteOutcome::Created
            }
            Some(existing) if existing.value == value => WriteOutcome::Unchanged,
            Some(existing) => {
                let mut active = existing.into_active_model();
                active.value = Set(value);
                active.update(&self.db).await?;
                WriteOutcome::Updated
            }
        };

        debug!("Config {}.{} for user {}: {:?}", scope.name, key, scope.user_id, outcome);
        Ok(outcome)
    }

    pub async fn get_node_config(
        &self,
        user_id: Option<i32>,
        section_id: Option<i32>,
    ) -> ApiResult<NodeConfig> {
        let scope = ConfigScope::new(NODES_CONFIG, user_id, section_id);
        let mut config = NodeConfig::default();
        for entry in self.get_all(&scope).await? {
            config.set(&entry.key, &entry.value);
        }
        Ok(config)
    }

    /// Writes each present key independently; there is no batch atomicity.
    pub async fn update_node_config(
        &self,
        user_id: Option<i32>,
        update: NodeConfigUpdate,
    ) -> ApiResult<Vec<ConfigWrite>> {
        let scope = ConfigScope::new(NODES_CONFIG, user_id, update.section_id);
        let mut writes = Vec::new();
        for (key, value) in update.values.entries() {
            let outcome = self.upsert(&scope, key, value).await?;
            writes.push(ConfigWrite {
                key: key.to_string(),
                outcome,
            });
        }
        Ok(writes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;

    fn full() -> NodeConfigUpdate {
        NodeConfigUpdate {
            values: NodeConfig {
                distance: Some(100),
                node_radius: Some(5),
                multiplier_node_size: Some(1.2),
                node_labels_show: Some(true),
            },
            section_id: None,
        }
    }

    #[tokio::test]
    async fn test_anonymous_round_trip() {
        let db = setup_test_db().await;
        let service = ConfigService::new(db);

        let writes = service.update_node_config(None, full()).await.unwrap();
        assert_eq!(writes.len(), 4);
        assert!(writes.iter().all(|w| w.outcome == WriteOutcome::Created));

        let config = service.get_node_config(None, None).await.unwrap();
        assert_eq!(config, full().values);
    }

    #[tokio::test]
    async fn test_user_and_anonymous_scopes_are_isolated() {
        let db = setup_test_db().await;
        let service = ConfigService::new(db);

        service.update_node_config(None, full()).await.unwrap();
        service
            .update_node_config(
                Some(7),
                NodeConfigUpdate {
                    values: NodeConfig {
                        distance: Some(300),
                        ..Default::default()
                    },
                    section_id: None,
                },
            )
            .await
            .unwrap();

        let anonymous = service.get_node_config(None, None).await.unwrap();
        assert_eq!(anonymous.distance, Some(100));

        let user = service.get_node_config(Some(7), None).await.unwrap();
        assert_eq!(user.distance, Some(300));
        assert_eq!(user.node_radius, None);
    }

    #[tokio::test]
    async fn test_section_scope_is_separate() {
        let db = setup_test_db().await;
        let service = ConfigService::new(db);

        let mut update = full();
        update.section_id = Some(3);
        service.update_node_config(None, update).await.unwrap();

        assert_eq!(
            service.get_node_config(None, None).await.unwrap(),
            NodeConfig::default()
        );
        assert_eq!(
            service.get_node_config(None, Some(3)).await.unwrap().node_radius,
            Some(5)
        );
    }

    #[tokio::test]
    async fn test_upsert_reports_outcomes() {
        let db = setup_test_db().await;
        let service = ConfigService::new(db);
        service.update_node_config(None, full()).await.unwrap();

        let mut update = full();
        update.values.distance = Some(150);
        update.values.node_labels_show = None;

        let writes = service.update_node_config(None, update).await.unwrap();
        let outcomes: Vec<_> = writes.iter().map(|w| (w.key.as_str(), w.outcome)).collect();
        assert_eq!(
            outcomes,
            vec![
                ("distance", WriteOutcome::Updated),
                ("node_radius", WriteOutcome::Unchanged),
                ("multiplier_node_size", WriteOutcome::Unchanged),
            ]
        );

        let config = service.get_node_config(None, None).await.unwrap();
        assert_eq!(config.distance, Some(150));
        assert_eq!(config.node_labels_show, Some(true));
    }

    #[test]
    fn test_legacy_boolean_spelling() {
        let mut config = NodeConfig::default();
        config.set("node_labels_show", "True");
        config.set("distance", "far");
        assert_eq!(config.node_labels_show, Some(true));
        assert_eq!(config.distance, None);
    }
}
