pub mod auth;
pub mod config;
pub mod departments;
pub mod employees;
pub mod graph;
pub mod health;
pub mod node_types;
pub mod nodes;
pub mod positions;
pub mod projects;
pub mod relations;
pub mod sections;

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::services::DEFAULT_LIST_LIMIT;

/// `?skip=&limit=` accepted by list endpoints
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl ListParams {
    pub fn offset(&self) -> u64 {
        self.skip.unwrap_or(0)
    }

    pub fn limit(&self) -> Option<u64> {
        Some(self.limit.unwrap_or(DEFAULT_LIST_LIMIT))
    }
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u64,
}

pub fn deleted() -> Json<Value> {
    Json(json!({ "detail": "Deleted" }))
}

pub fn binded<T: Serialize>(items: Vec<T>) -> Json<Value> {
    Json(json!({ "detail": "Binded", "items": items }))
}
