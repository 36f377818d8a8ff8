use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::errors::ApiResult;
use crate::graph::GraphData;
use crate::server::app::AppState;
use crate::server::auth::CurrentUser;
use crate::services::GraphService;

pub async fn org_graph(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> ApiResult<Json<GraphData>> {
    Ok(Json(GraphService::new(state.db).org_graph().await?))
}

/// Same materialization as [`org_graph`] without a token
pub async fn public_graph(State(state): State<AppState>) -> ApiResult<Json<GraphData>> {
    Ok(Json(GraphService::new(state.db).org_graph().await?))
}

pub async fn section_graph(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(section_id): Path<i32>,
) -> ApiResult<Json<GraphData>> {
    Ok(Json(
        GraphService::new(state.db)
            .section_graph(section_id)
            .await?,
    ))
}
