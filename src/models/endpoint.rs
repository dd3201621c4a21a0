use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: Uuid,
    pub project_id: Uuid,
    pub method: String,
    pub path: String,
    pub response_body: Option<String>,
    pub status_code: i32,
    pub requires_key: bool,
    pub created_at: DateTime<Utc>,
}
