use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::Value;

use crate::database::entities::departments;
use crate::errors::ApiResult;
use crate::server::app::AppState;
use crate::server::auth::CurrentUser;
use crate::server::handlers::{deleted, CountResponse, ListParams};
use crate::services::lookup_service::{department_service, DepartmentInput};

pub async fn count_departments(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<CountResponse>> {
    let count = department_service(state.db).count().await?;
    Ok(Json(CountResponse { count }))
}

pub async fn list_departments(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<departments::Model>>> {
    let departments = department_service(state.db)
        .list(params.offset(), params.limit())
        .await?;
    Ok(Json(departments))
}

pub async fn create_department(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(payload): Json<DepartmentInput>,
) -> ApiResult<Json<departments::Model>> {
    let department = department_service(state.db)
        .create(payload.into_active_model())
        .await?;
    Ok(Json(department))
}

pub async fn get_department(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<departments::Model>> {
    Ok(Json(department_service(state.db).get(id).await?))
}

pub async fn update_department(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<DepartmentInput>,
) -> ApiResult<Json<departments::Model>> {
    Ok(Json(department_service(state.db).update(id, payload).await?))
}

pub async fn delete_department(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    department_service(state.db).delete(id).await?;
    Ok(deleted())
}
