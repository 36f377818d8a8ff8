//! Employee join tables: `/employee_department`, `/employee_position`,
//! `/employee_project` and `/employee_employee`.
//!
//! Every table exposes the same four operations: bind (POST), list all
//! bound rows (GET), list rows bound to one employee (GET `/:uuid`) and
//! unbind (DELETE with the pair in the body).

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::Value;
use tracing::debug;

use crate::database::entities::{departments, employees, positions, projects};
use crate::errors::ApiResult;
use crate::server::app::AppState;
use crate::server::auth::CurrentUser;
use crate::server::handlers::{binded, deleted};
use crate::services::employee_service::{
    EmployeeDepartmentInput, EmployeeEmployeeInput, EmployeePositionInput, EmployeeProjectInput,
};
use crate::services::EmployeeService;

pub async fn bind_department(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(payload): Json<EmployeeDepartmentInput>,
) -> ApiResult<Json<Value>> {
    let items = EmployeeService::new(state.db)
        .bind_department(&payload.employee_uuid, payload.department_id)
        .await?;
    Ok(binded(items))
}

pub async fn list_departments(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<Vec<departments::Model>>> {
    Ok(Json(EmployeeService::new(state.db).get_bind_department(None).await?))
}

pub async fn employee_departments(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(uuid): Path<String>,
) -> ApiResult<Json<Vec<departments::Model>>> {
    Ok(Json(
        EmployeeService::new(state.db)
            .get_bind_department(Some(&uuid))
            .await?,
    ))
}

pub async fn unbind_department(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(payload): Json<EmployeeDepartmentInput>,
) -> ApiResult<Json<Value>> {
    let removed = EmployeeService::new(state.db)
        .delete_bind_department(&payload.employee_uuid, payload.department_id)
        .await?;
    debug!("Removed {} employee_department rows", removed);
    Ok(deleted())
}

pub async fn bind_position(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(payload): Json<EmployeePositionInput>,
) -> ApiResult<Json<Value>> {
    let items = EmployeeService::new(state.db)
        .bind_position(&payload.employee_uuid, payload.position_id)
        .await?;
    Ok(binded(items))
}

pub async fn list_positions(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<Vec<positions::Model>>> {
    Ok(Json(EmployeeService::new(state.db).get_bind_position(None).await?))
}

pub async fn employee_positions(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(uuid): Path<String>,
) -> ApiResult<Json<Vec<positions::Model>>> {
    Ok(Json(
        EmployeeService::new(state.db)
            .get_bind_position(Some(&uuid))
            .await?,
    ))
}

pub async fn unbind_position(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(payload): Json<EmployeePositionInput>,
) -> ApiResult<Json<Value>> {
    let removed = EmployeeService::new(state.db)
        .delete_bind_position(&payload.employee_uuid, payload.position_id)
        .await?;
    debug!("Removed {} employee_position rows", removed);
    Ok(deleted())
}

pub async fn bind_project(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(payload): Json<EmployeeProjectInput>,
) -> ApiResult<Json<Value>> {
    let items = EmployeeService::new(state.db)
        .bind_project(&payload.employee_uuid, payload.project_id)
        .await?;
    Ok(binded(items))
}

pub async fn list_projects(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<Vec<projects::Model>>> {
    Ok(Json(EmployeeService::new(state.db).get_bind_project(None).await?))
}

pub async fn employee_projects(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(uuid): Path<String>,
) -> ApiResult<Json<Vec<projects::Model>>> {
    Ok(Json(
        EmployeeService::new(state.db)
            .get_bind_project(Some(&uuid))
            .await?,
    ))
}

pub async fn unbind_project(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(payload): Json<EmployeeProjectInput>,
) -> ApiResult<Json<Value>> {
    let removed = EmployeeService::new(state.db)
        .delete_bind_project(&payload.employee_uuid, payload.project_id)
        .await?;
    debug!("Removed {} employee_project rows", removed);
    Ok(deleted())
}

pub async fn bind_employee(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(payload): Json<EmployeeEmployeeInput>,
) -> ApiResult<Json<Value>> {
    let items = EmployeeService::new(state.db)
        .bind_employee(&payload.employee1_uuid, &payload.employee2_uuid)
        .await?;
    Ok(binded(items))
}

pub async fn list_employees(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<Vec<employees::Model>>> {
    Ok(Json(EmployeeService::new(state.db).get_bind_employee(None).await?))
}

pub async fn employee_employees(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(uuid): Path<String>,
) -> ApiResult<Json<Vec<employees::Model>>> {
    Ok(Json(
        EmployeeService::new(state.db)
            .get_bind_employee(Some(&uuid))
            .await?,
    ))
}

pub async fn unbind_employee(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(payload): Json<EmployeeEmployeeInput>,
) -> ApiResult<Json<Value>> {
    let removed = EmployeeService::new(state.db)
        .delete_bind_employee(&payload.employee1_uuid, &payload.employee2_uuid)
        .await?;
    debug!("Removed {} employee_employee rows", removed);
    Ok(deleted())
}
