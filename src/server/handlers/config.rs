use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;

use crate::errors::ApiResult;
use crate::server::app::AppState;
use crate::server::auth::MaybeUser;
use crate::services::config_service::{ConfigWrite, NodeConfig, NodeConfigUpdate};
use crate::services::ConfigService;

#[derive(Debug, Default, Deserialize)]
pub struct SectionQuery {
    pub section_id: Option<i32>,
}

pub async fn get_node_config(
    State(state): State<AppState>,
    user: MaybeUser,
    Query(query): Query<SectionQuery>,
) -> ApiResult<Json<NodeConfig>> {
    let config = ConfigService::new(state.db)
        .get_node_config(user.user_id(), query.section_id)
        .await?;
    Ok(Json(config))
}

pub async fn get_section_node_config(
    State(state): State<AppState>,
    user: MaybeUser,
    Path(section_id): Path<i32>,
) -> ApiResult<Json<NodeConfig>> {
    let config = ConfigService::new(state.db)
        .get_node_config(user.user_id(), Some(section_id))
        .await?;
    Ok(Json(config))
}

pub async fn update_node_config(
    State(state): State<AppState>,
    user: MaybeUser,
    Json(payload): Json<NodeConfigUpdate>,
) -> ApiResult<Json<Vec<ConfigWrite>>> {
    let writes = ConfigService::new(state.db)
        .update_node_config(user.user_id(), payload)
        .await?;
    Ok(Json(writes))
}
