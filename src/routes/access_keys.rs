use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AdminAuth;
use crate::crypto;
use crate::db;
use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::AccessKey;
use crate::state::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateAccessKey {
    /// Generated when omitted.
    #[serde(default)]
    pub key_value: Option<String>,
}

pub async fn list(
    _admin: AdminAuth,
    State(state): State<SharedState>,
    AppPath((project_id, endpoint_id)): AppPath<(Uuid, Uuid)>,
) -> Result<Json<Vec<AccessKey>>, AppError> {
    require_endpoint(&state, project_id, endpoint_id).await?;

    let keys = db::access_keys::list_by_endpoint(&state.pool, endpoint_id).await?;
    Ok(Json(keys))
}

pub async fn create(
    _admin: AdminAuth,
    State(state): State<SharedState>,
    AppPath((project_id, endpoint_id)): AppPath<(Uuid, Uuid)>,
    AppJson(req): AppJson<CreateAccessKey>,
) -> Result<(StatusCode, Json<AccessKey>), AppError> {
    require_endpoint(&state, project_id, endpoint_id).await?;

    let key_value = match req.key_value {
        Some(value) if value.is_empty() => {
            return Err(AppError::BadRequest("Key value must not be empty".to_string()));
        }
        Some(value) => value,
        None => crypto::generate_key(),
    };

    let key = db::access_keys::create(&state.pool, endpoint_id, &key_value).await?;

    tracing::info!(key_id = %key.id, %endpoint_id, "access key created");

    Ok((StatusCode::CREATED, Json(key)))
}

pub async fn delete(
    _admin: AdminAuth,
    State(state): State<SharedState>,
    AppPath((project_id, endpoint_id, key_id)): AppPath<(Uuid, Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    require_endpoint(&state, project_id, endpoint_id).await?;

    if !db::access_keys::delete(&state.pool, key_id, endpoint_id).await? {
        return Err(AppError::NotFound("Access key not found".to_string()));
    }

    tracing::info!(%key_id, %endpoint_id, "access key deleted");

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

async fn require_endpoint(
    state: &SharedState,
    project_id: Uuid,
    endpoint_id: Uuid,
) -> Result<(), AppError> {
    super::endpoints::require_project(state, project_id).await?;

    db::endpoints::find_by_id(&state.pool, endpoint_id, project_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Endpoint not found".to_string()))?;
    Ok(())
}
