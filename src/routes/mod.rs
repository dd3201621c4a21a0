pub mod access_keys;
pub mod endpoints;
pub mod mock;

use axum::routing::{delete, get};
use axum::Router;

use crate::mock::Dispatcher;
use crate::state::SharedState;

/// Fixed prefix in front of `{project_id}/{path...}` on the mock surface.
pub const MOCK_PREFIX: &str = "/api/mock";

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Endpoints
        .route(
            "/api/v1/projects/{project_id}/endpoints",
            get(endpoints::list_by_project).post(endpoints::create),
        )
        .route(
            "/api/v1/projects/{project_id}/endpoints/{endpoint_id}",
            get(endpoints::get)
                .put(endpoints::update)
                .delete(endpoints::delete),
        )
        // Access keys
        .route(
            "/api/v1/projects/{project_id}/endpoints/{endpoint_id}/keys",
            get(access_keys::list).post(access_keys::create),
        )
        .route(
            "/api/v1/projects/{project_id}/endpoints/{endpoint_id}/keys/{key_id}",
            delete(access_keys::delete),
        )
}

/// Public mock surface. No session auth; only per-endpoint keys apply.
pub fn mock_routes() -> Router<Dispatcher> {
    Router::new()
        .route(
            &format!("{MOCK_PREFIX}/{{project_id}}"),
            get(mock::serve_root)
                .post(mock::serve_root)
                .put(mock::serve_root)
                .patch(mock::serve_root)
                .delete(mock::serve_root),
        )
        .route(
            &format!("{MOCK_PREFIX}/{{project_id}}/"),
            get(mock::serve_root)
                .post(mock::serve_root)
                .put(mock::serve_root)
                .patch(mock::serve_root)
                .delete(mock::serve_root),
        )
        .route(
            &format!("{MOCK_PREFIX}/{{project_id}}/{{*path}}"),
            get(mock::serve)
                .post(mock::serve)
                .put(mock::serve)
                .patch(mock::serve)
                .delete(mock::serve),
        )
}
