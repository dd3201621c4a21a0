use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::mock::{Dispatcher, HttpMethod, MockRequest};

/// `{prefix}/{project_id}` and `{prefix}/{project_id}/`, served as path `/`.
pub async fn serve_root(
    State(dispatcher): State<Dispatcher>,
    Path(project_id): Path<String>,
    method: Method,
    headers: HeaderMap,
) -> Response {
    dispatch(&dispatcher, project_id, None, &method, &headers).await
}

/// `{prefix}/{project_id}/{*path}`.
pub async fn serve(
    State(dispatcher): State<Dispatcher>,
    Path((project_id, path)): Path<(String, String)>,
    method: Method,
    headers: HeaderMap,
) -> Response {
    dispatch(&dispatcher, project_id, Some(&path), &method, &headers).await
}

async fn dispatch(
    dispatcher: &Dispatcher,
    project_id: String,
    path: Option<&str>,
    method: &Method,
    headers: &HeaderMap,
) -> Response {
    // HEAD reaches here through the GET route.
    let Ok(method) = HttpMethod::try_from(method) else {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    };

    let req = MockRequest::new(project_id, method, path, headers);
    match dispatcher.serve(&req).await {
        Ok(rendered) => rendered.into_response(),
        Err(err) => err.into_response(),
    }
}
