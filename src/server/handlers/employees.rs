use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::Value;

use crate::database::entities::employees;
use crate::errors::ApiResult;
use crate::server::app::AppState;
use crate::server::auth::CurrentUser;
use crate::server::handlers::{deleted, CountResponse, ListParams};
use crate::services::employee_service::{EmployeeInput, EmployeePatch};
use crate::services::EmployeeService;

pub async fn count_employees(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<CountResponse>> {
    let count = EmployeeService::new(state.db).count().await?;
    Ok(Json(CountResponse { count }))
}

pub async fn list_employees(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<employees::Model>>> {
    let employees = EmployeeService::new(state.db)
        .list(params.offset(), params.limit())
        .await?;
    Ok(Json(employees))
}

pub async fn create_employee(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(payload): Json<EmployeeInput>,
) -> ApiResult<Json<employees::Model>> {
    Ok(Json(EmployeeService::new(state.db).create(payload).await?))
}

pub async fn get_employee(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(uuid): Path<String>,
) -> ApiResult<Json<employees::Model>> {
    Ok(Json(EmployeeService::new(state.db).get(&uuid).await?))
}

pub async fn update_employee(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(uuid): Path<String>,
    Json(payload): Json<EmployeePatch>,
) -> ApiResult<Json<employees::Model>> {
    Ok(Json(EmployeeService::new(state.db).update(&uuid, payload).await?))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(uuid): Path<String>,
) -> ApiResult<Json<Value>> {
    EmployeeService::new(state.db).delete(&uuid).await?;
    Ok(deleted())
}
