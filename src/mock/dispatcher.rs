use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use super::registry::EndpointRegistry;
use super::render::{render, RenderedResponse};
use super::request::{HttpMethod, MockRequest};

/// Why a mock call did not produce the stored response.
#[derive(Debug)]
pub enum DispatchError {
    NotFound { method: HttpMethod, path: String },
    KeyRequired,
    KeyInvalid,
    Storage(sqlx::Error),
    Internal(String),
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchError::NotFound { method, path } => {
                write!(f, "No {method} endpoint found at {path}")
            }
            DispatchError::KeyRequired => write!(f, "API key required"),
            DispatchError::KeyInvalid => write!(f, "Invalid API key"),
            DispatchError::Storage(err) => write!(f, "Storage error: {err}"),
            DispatchError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl From<sqlx::Error> for DispatchError {
    fn from(err: sqlx::Error) -> Self {
        DispatchError::Storage(err)
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            DispatchError::NotFound { method, path } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "Endpoint not found",
                    "detail": format!("No {method} endpoint found at {path} for this project"),
                }),
            ),
            DispatchError::KeyRequired => {
                (StatusCode::UNAUTHORIZED, json!({ "error": "API key required" }))
            }
            DispatchError::KeyInvalid => {
                (StatusCode::FORBIDDEN, json!({ "error": "Invalid API key" }))
            }
            DispatchError::Storage(err) => {
                tracing::error!("Error serving mock endpoint: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
            DispatchError::Internal(msg) => {
                tracing::error!("Error serving mock endpoint: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Stateless apart from the registry handle; cheap to share across requests.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<dyn EndpointRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<dyn EndpointRegistry>) -> Self {
        Self { registry }
    }

    /// Resolve a mock call to its stored response.
    ///
    /// At most two registry reads: the endpoint lookup and, for key-gated
    /// endpoints, the key lookup. Nothing is written.
    pub async fn serve(&self, req: &MockRequest) -> Result<RenderedResponse, DispatchError> {
        let endpoints = self
            .registry
            .find_endpoints(&req.project_id, req.method, &req.path)
            .await?;

        let Some(endpoint) = endpoints.into_iter().next() else {
            tracing::debug!(project_id = %req.project_id, method = %req.method, path = %req.path, "no matching endpoint");
            return Err(DispatchError::NotFound {
                method: req.method,
                path: req.path.clone(),
            });
        };

        if endpoint.requires_key {
            let Some(key) = req.presented_key.as_deref() else {
                tracing::debug!(endpoint_id = %endpoint.id, "key required but none presented");
                return Err(DispatchError::KeyRequired);
            };
            if !self.is_valid_key(endpoint.id, key).await? {
                tracing::debug!(endpoint_id = %endpoint.id, "presented key rejected");
                return Err(DispatchError::KeyInvalid);
            }
        }

        let status = u16::try_from(endpoint.status_code)
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
            // 1xx cannot be sent as a final response.
            .filter(|status| !status.is_informational())
            .ok_or_else(|| {
                DispatchError::Internal(format!(
                    "Endpoint {} has invalid status code {}",
                    endpoint.id, endpoint.status_code
                ))
            })?;

        tracing::debug!(endpoint_id = %endpoint.id, status = status.as_u16(), "serving mock response");
        Ok(render(endpoint.response_body.as_deref(), status))
    }

    /// True iff a stored key for this endpoint equals `candidate` exactly.
    pub async fn is_valid_key(&self, endpoint_id: Uuid, candidate: &str) -> Result<bool, sqlx::Error> {
        let keys = self.registry.find_access_keys(endpoint_id, candidate).await?;
        Ok(!keys.is_empty())
    }
}
