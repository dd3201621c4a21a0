use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct AccessKey {
    pub id: Uuid,
    pub endpoint_id: Uuid,
    pub key_value: String,
    pub created_at: DateTime<Utc>,
}
