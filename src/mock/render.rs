use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::de::IgnoredAny;

/// The only two content types a mock response can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Json,
    Text,
}

impl ContentKind {
    pub fn mime(&self) -> &'static str {
        match self {
            ContentKind::Json => "application/json",
            ContentKind::Text => "text/plain",
        }
    }

    /// JSON if the text parses as any JSON value, otherwise plain text.
    pub fn classify(body: &str) -> Self {
        if !body.is_empty() && serde_json::from_str::<IgnoredAny>(body).is_ok() {
            ContentKind::Json
        } else {
            ContentKind::Text
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResponse {
    pub status: StatusCode,
    pub content_type: ContentKind,
    pub body: String,
}

/// Render a stored body. The bytes are never re-serialized.
pub fn render(body: Option<&str>, status: StatusCode) -> RenderedResponse {
    let body = body.unwrap_or_default();
    RenderedResponse {
        status,
        content_type: ContentKind::classify(body),
        body: body.to_string(),
    }
}

impl IntoResponse for RenderedResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static(self.content_type.mime()),
            )],
            self.body,
        )
            .into_response()
    }
}
