use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::Value;

use crate::database::entities::positions;
use crate::errors::ApiResult;
use crate::server::app::AppState;
use crate::server::auth::CurrentUser;
use crate::server::handlers::{deleted, CountResponse, ListParams};
use crate::services::lookup_service::{position_service, ValueInput, ValuePatch};

pub async fn count_positions(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<CountResponse>> {
    let count = position_service(state.db).count().await?;
    Ok(Json(CountResponse { count }))
}

pub async fn list_positions(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Vec<positions::Model>>> {
    let positions = position_service(state.db)
        .list(params.offset(), params.limit())
        .await?;
    Ok(Json(positions))
}

pub async fn create_position(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(payload): Json<ValueInput>,
) -> ApiResult<Json<positions::Model>> {
    let position = position_service(state.db)
        .create(payload.into_position())
        .await?;
    Ok(Json(position))
}

pub async fn get_position(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<positions::Model>> {
    Ok(Json(position_service(state.db).get(id).await?))
}

pub async fn update_position(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<ValuePatch>,
) -> ApiResult<Json<positions::Model>> {
    Ok(Json(position_service(state.db).update(id, payload).await?))
}

pub async fn delete_position(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> ApiResult<Json<Value>> {
    position_service(state.db).delete(id).await?;
    Ok(deleted())
}
