use std::fmt;
use std::str::FromStr;

use axum::http::{HeaderMap, Method};
use serde::{Deserialize, Serialize};

/// Header checked first for a presented access key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// The verbs an endpoint can be registered for. Stored upper-cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    /// Case-insensitive; the stored form is always upper-case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == upper)
            .ok_or_else(|| format!("Unsupported method '{s}'. Must be one of GET, POST, PUT, PATCH, DELETE"))
    }
}

impl TryFrom<&Method> for HttpMethod {
    type Error = String;

    fn try_from(method: &Method) -> Result<Self, Self::Error> {
        method.as_str().parse()
    }
}

/// Everything the dispatcher needs to know about an inbound mock call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRequest {
    pub project_id: String,
    pub method: HttpMethod,
    pub path: String,
    pub presented_key: Option<String>,
}

impl MockRequest {
    /// Build from the pieces the transport layer extracted.
    pub fn new(
        project_id: impl Into<String>,
        method: HttpMethod,
        rest: Option<&str>,
        headers: &HeaderMap,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            method,
            path: normalize_path(rest),
            presented_key: presented_key(headers),
        }
    }
}

/// Rebuild the endpoint path from whatever followed the project id.
///
/// Exactly one leading slash is added; nothing else is folded, so
/// `api/users/` stays distinct from `api/users`.
pub fn normalize_path(rest: Option<&str>) -> String {
    match rest {
        Some(rest) => format!("/{rest}"),
        None => "/".to_string(),
    }
}

/// `x-api-key` wins; otherwise `Authorization`, minus a leading `Bearer `.
/// Empty and non-UTF-8 values count as absent.
pub fn presented_key(headers: &HeaderMap) -> Option<String> {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
    };

    if let Some(key) = header_str(API_KEY_HEADER) {
        return Some(key.to_string());
    }

    header_str("authorization")
        .map(|auth| auth.strip_prefix("Bearer ").unwrap_or(auth))
        .filter(|key| !key.is_empty())
        .map(|key| key.to_string())
}
