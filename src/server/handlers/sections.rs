use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::Value;

use crate::database::entities::{nodes, sections};
use crate::errors::{ApiError, ApiResult};
use crate::server::app::AppState;
use crate::server::auth::CurrentUser;
use crate::server::handlers::{binded, deleted, ListParams};
use crate::services::section_service::{SectionInput, SectionPatch};
use crate::services::SectionService;

pub async fn list_sections(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<sections::Model>>> {
    let sections = SectionService::new(state.db)
        .list(params.offset(), params.limit())
        .await?;
    Ok(Json(sections))
}

pub async fn create_section(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(mut payload): Json<SectionInput>,
) -> ApiResult<Json<sections::Model>> {
    payload.user_id = Some(user.id);
    Ok(Json(SectionService::new(state.db).create(payload).await?))
}

pub async fn get_section(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<sections::Model>> {
    Ok(Json(SectionService::new(state.db).get(id).await?))
}

pub async fn get_section_by_name(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(name): Path<String>,
) -> ApiResult<Json<sections::Model>> {
    SectionService::new(state.db)
        .get_by_name(&name)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::missing("Section not found"))
}

pub async fn get_sections_by_user(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(user_id): Path<i32>,
) -> ApiResult<Json<Vec<sections::Model>>> {
    Ok(Json(SectionService::new(state.db).get_by_user_id(user_id).await?))
}

pub async fn update_section(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<SectionPatch>,
) -> ApiResult<Json<sections::Model>> {
    Ok(Json(SectionService::new(state.db).update(id, payload).await?))
}

pub async fn delete_section(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    SectionService::new(state.db).delete(id).await?;
    Ok(deleted())
}

pub async fn list_section_nodes(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<nodes::Model>>> {
    Ok(Json(SectionService::new(state.db).list_nodes(id).await?))
}

pub async fn attach_node(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path((id, node_id)): Path<(i32, i32)>,
) -> ApiResult<Json<Value>> {
    let items = SectionService::new(state.db).add_node(id, node_id).await?;
    Ok(binded(items))
}

pub async fn detach_node(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path((id, node_id)): Path<(i32, i32)>,
) -> ApiResult<Json<Value>> {
    SectionService::new(state.db).remove_node(id, node_id).await?;
    Ok(deleted())
}
