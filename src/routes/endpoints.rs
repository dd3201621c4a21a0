use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AdminAuth;
use crate::db;
use crate::db::endpoints::EndpointFields;
use crate::error::AppError;
use crate::extract::{AppJson, AppPath};
use crate::mock::HttpMethod;
use crate::models::Endpoint;
use crate::state::SharedState;

/// Body for both create and update; update replaces every column.
#[derive(Debug, Deserialize)]
pub struct EndpointPayload {
    pub method: Option<String>,
    pub path: Option<String>,
    pub response_body: Option<String>,
    pub status_code: Option<i32>,
    pub requires_key: Option<bool>,
}

struct ValidEndpoint {
    method: HttpMethod,
    path: String,
    response_body: Option<String>,
    status_code: i32,
    requires_key: bool,
}

impl ValidEndpoint {
    fn fields(&self) -> EndpointFields<'_> {
        EndpointFields {
            method: self.method.as_str(),
            path: &self.path,
            response_body: self.response_body.as_deref(),
            status_code: self.status_code,
            requires_key: self.requires_key,
        }
    }
}

pub async fn list_by_project(
    _admin: AdminAuth,
    State(state): State<SharedState>,
    AppPath(project_id): AppPath<Uuid>,
) -> Result<Json<Vec<Endpoint>>, AppError> {
    require_project(&state, project_id).await?;

    let endpoints = db::endpoints::list_by_project(&state.pool, project_id).await?;
    Ok(Json(endpoints))
}

pub async fn create(
    _admin: AdminAuth,
    State(state): State<SharedState>,
    AppPath(project_id): AppPath<Uuid>,
    AppJson(req): AppJson<EndpointPayload>,
) -> Result<(StatusCode, Json<Endpoint>), AppError> {
    require_project(&state, project_id).await?;
    let valid = validate(req)?;

    let endpoint = db::endpoints::create(&state.pool, project_id, &valid.fields())
        .await
        .map_err(map_write_error)?;

    tracing::info!(
        endpoint_id = %endpoint.id,
        %project_id,
        method = %endpoint.method,
        path = %endpoint.path,
        "endpoint created"
    );

    Ok((StatusCode::CREATED, Json(endpoint)))
}

pub async fn get(
    _admin: AdminAuth,
    State(state): State<SharedState>,
    AppPath((project_id, endpoint_id)): AppPath<(Uuid, Uuid)>,
) -> Result<Json<Endpoint>, AppError> {
    require_project(&state, project_id).await?;

    let endpoint = db::endpoints::find_by_id(&state.pool, endpoint_id, project_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Endpoint not found".to_string()))?;
    Ok(Json(endpoint))
}

pub async fn update(
    _admin: AdminAuth,
    State(state): State<SharedState>,
    AppPath((project_id, endpoint_id)): AppPath<(Uuid, Uuid)>,
    AppJson(req): AppJson<EndpointPayload>,
) -> Result<Json<Endpoint>, AppError> {
    require_project(&state, project_id).await?;
    let valid = validate(req)?;

    let endpoint = db::endpoints::update(&state.pool, endpoint_id, project_id, &valid.fields())
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Endpoint not found".to_string()),
            _ => map_write_error(e),
        })?;

    tracing::info!(endpoint_id = %endpoint.id, %project_id, "endpoint updated");

    Ok(Json(endpoint))
}

pub async fn delete(
    _admin: AdminAuth,
    State(state): State<SharedState>,
    AppPath((project_id, endpoint_id)): AppPath<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    require_project(&state, project_id).await?;

    if !db::endpoints::delete(&state.pool, endpoint_id, project_id).await? {
        return Err(AppError::NotFound("Endpoint not found".to_string()));
    }

    tracing::info!(%endpoint_id, %project_id, "endpoint deleted");

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

pub(crate) async fn require_project(state: &SharedState, project_id: Uuid) -> Result<(), AppError> {
    db::projects::find_by_id(&state.pool, project_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;
    Ok(())
}

fn map_write_error(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => AppError::Conflict(
            "An endpoint with this method and path already exists".to_string(),
        ),
        _ => AppError::Database(e),
    }
}

fn validate(req: EndpointPayload) -> Result<ValidEndpoint, AppError> {
    let (Some(method), Some(path)) = (req.method, req.path) else {
        return Err(AppError::BadRequest(
            "Method and path are required".to_string(),
        ));
    };

    let method: HttpMethod = method.parse().map_err(AppError::BadRequest)?;

    if !path.starts_with('/') {
        return Err(AppError::BadRequest("Path must start with '/'".to_string()));
    }

    let status_code = req.status_code.unwrap_or(200);
    if !(100..=599).contains(&status_code) {
        return Err(AppError::BadRequest(
            "Status code must be between 100 and 599".to_string(),
        ));
    }

    Ok(ValidEndpoint {
        method,
        path,
        response_body: req.response_body.filter(|b| !b.is_empty()),
        status_code,
        requires_key: req.requires_key.unwrap_or(false),
    })
}
