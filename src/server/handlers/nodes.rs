use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::Value;

use crate::database::entities::{node_node, nodes};
use crate::errors::{ApiError, ApiResult};
use crate::server::app::AppState;
use crate::server::auth::CurrentUser;
use crate::server::handlers::{deleted, ListParams};
use crate::services::node_service::{NodeInput, NodeLinkInput, NodeLinks, NodePatch};
use crate::services::NodeService;

pub async fn list_nodes(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<nodes::Model>>> {
    let nodes = NodeService::new(state.db)
        .list(params.offset(), params.limit())
        .await?;
    Ok(Json(nodes))
}

pub async fn create_node(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(mut payload): Json<NodeInput>,
) -> ApiResult<Json<nodes::Model>> {
    payload.user_id = Some(user.id);
    Ok(Json(NodeService::new(state.db).create(payload).await?))
}

pub async fn get_node(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<nodes::Model>> {
    Ok(Json(NodeService::new(state.db).get(id).await?))
}

/// Lookup variant that reports a bare "Node not found"
pub async fn get_node_by_id(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<nodes::Model>> {
    NodeService::new(state.db)
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::missing("Node not found"))
}

pub async fn get_node_by_name(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(name): Path<String>,
) -> ApiResult<Json<nodes::Model>> {
    NodeService::new(state.db)
        .get_by_name(&name)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::missing("Node not found"))
}

pub async fn get_nodes_by_user(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(user_id): Path<i32>,
) -> ApiResult<Json<Vec<nodes::Model>>> {
    Ok(Json(NodeService::new(state.db).get_by_user_id(user_id).await?))
}

pub async fn get_nodes_by_section(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(section_id): Path<i32>,
) -> ApiResult<Json<Vec<nodes::Model>>> {
    Ok(Json(NodeService::new(state.db).get_by_section_id(section_id).await?))
}

pub async fn update_node(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<NodePatch>,
) -> ApiResult<Json<nodes::Model>> {
    Ok(Json(NodeService::new(state.db).update(id, payload).await?))
}

pub async fn delete_node(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    NodeService::new(state.db).delete(id).await?;
    Ok(deleted())
}

pub async fn node_links(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<NodeLinks>> {
    Ok(Json(NodeService::new(state.db).linked_nodes(id).await?))
}

pub async fn link_nodes(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(mut payload): Json<NodeLinkInput>,
) -> ApiResult<Json<node_node::Model>> {
    payload.user_id = Some(user.id);
    Ok(Json(NodeService::new(state.db).link(payload).await?))
}

pub async fn unlink_nodes(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path((node1_id, node2_id)): Path<(i32, i32)>,
) -> ApiResult<Json<Value>> {
    NodeService::new(state.db)
        .delete_link(node1_id, node2_id)
        .await?;
    Ok(deleted())
}
