use axum::{extract::State, Form, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::ApiResult;
use crate::server::app::AppState;
use crate::server::auth::CurrentUser;
use crate::services::auth_service::AccessToken;

/// Form fields shared by `/register` and the OAuth2 password flow on `/token`
#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> ApiResult<Json<Value>> {
    state.auth.register(&form.username, &form.password).await?;
    Ok(Json(json!({ "msg": "User registered successfully" })))
}

pub async fn token(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> ApiResult<Json<AccessToken>> {
    Ok(Json(state.auth.login(&form.username, &form.password).await?))
}

pub async fn me(CurrentUser(user): CurrentUser) -> Json<Value> {
    Json(json!({ "username": user.username }))
}
