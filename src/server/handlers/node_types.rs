use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::Value;

use crate::database::entities::node_types;
use crate::errors::{ApiError, ApiResult};
use crate::server::app::AppState;
use crate::server::auth::CurrentUser;
use crate::server::handlers::{deleted, ListParams};
use crate::services::node_type_service::{NodeTypeInput, NodeTypePatch};
use crate::services::NodeTypeService;

pub async fn list_node_types(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<node_types::Model>>> {
    let node_types = NodeTypeService::new(state.db)
        .list(params.offset(), params.limit())
        .await?;
    Ok(Json(node_types))
}

pub async fn create_node_type(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(mut payload): Json<NodeTypeInput>,
) -> ApiResult<Json<node_types::Model>> {
    payload.user_id = Some(user.id);
    Ok(Json(NodeTypeService::new(state.db).create(payload).await?))
}

pub async fn get_node_type(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<node_types::Model>> {
    Ok(Json(NodeTypeService::new(state.db).get(id).await?))
}

pub async fn get_node_types_by_section(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(section_id): Path<i32>,
) -> ApiResult<Json<Vec<node_types::Model>>> {
    Ok(Json(
        NodeTypeService::new(state.db)
            .get_by_section_id(section_id)
            .await?,
    ))
}

pub async fn get_node_type_by_name(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(name): Path<String>,
) -> ApiResult<Json<node_types::Model>> {
    NodeTypeService::new(state.db)
        .get_by_name(&name)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::missing("Node type not found"))
}

pub async fn get_node_types_by_user(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(user_id): Path<i32>,
) -> ApiResult<Json<Vec<node_types::Model>>> {
    Ok(Json(NodeTypeService::new(state.db).get_by_user_id(user_id).await?))
}

pub async fn update_node_type(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<NodeTypePatch>,
) -> ApiResult<Json<node_types::Model>> {
    Ok(Json(NodeTypeService::new(state.db).update(id, payload).await?))
}

pub async fn delete_node_type(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    NodeTypeService::new(state.db).delete(id).await?;
    Ok(deleted())
}
