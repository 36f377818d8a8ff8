use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::Value;

use crate::database::entities::projects;
use crate::errors::ApiResult;
use crate::server::app::AppState;
use crate::server::auth::CurrentUser;
use crate::server::handlers::{deleted, CountResponse, ListParams};
use crate::services::lookup_service::{project_service, ValueInput, ValuePatch};

pub async fn count_projects(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<CountResponse>> {
    let count = project_service(state.db).count().await?;
    Ok(Json(CountResponse { count }))
}

pub async fn list_projects(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<projects::Model>>> {
    let projects = project_service(state.db)
        .list(params.offset(), params.limit())
        .await?;
    Ok(Json(projects))
}

pub async fn create_project(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(payload): Json<ValueInput>,
) -> ApiResult<Json<projects::Model>> {
    let project = project_service(state.db)
        .create(payload.into_project())
        .await?;
    Ok(Json(project))
}

pub async fn get_project(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<projects::Model>> {
    Ok(Json(project_service(state.db).get(id).await?))
}

pub async fn update_project(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<ValuePatch>,
) -> ApiResult<Json<projects::Model>> {
    Ok(Json(project_service(state.db).update(id, payload).await?))
}

pub async fn delete_project(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    project_service(state.db).delete(id).await?;
    Ok(deleted())
}
