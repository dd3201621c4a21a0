use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db;
use crate::models::{AccessKey, Endpoint};

use super::request::HttpMethod;

/// Read-only view of stored endpoints and their access keys.
#[async_trait]
pub trait EndpointRegistry: Send + Sync {
    /// Exact match on all three; usually zero or one row.
    async fn find_endpoints(
        &self,
        project_id: &str,
        method: HttpMethod,
        path: &str,
    ) -> Result<Vec<Endpoint>, sqlx::Error>;

    async fn find_access_keys(
        &self,
        endpoint_id: Uuid,
        key_value: &str,
    ) -> Result<Vec<AccessKey>, sqlx::Error>;
}

/// Registry backed by the application database.
#[derive(Clone)]
pub struct PgRegistry {
    pool: PgPool,
}

impl PgRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EndpointRegistry for PgRegistry {
    async fn find_endpoints(
        &self,
        project_id: &str,
        method: HttpMethod,
        path: &str,
    ) -> Result<Vec<Endpoint>, sqlx::Error> {
        // Project ids are UUIDs; anything else cannot own an endpoint.
        let Ok(project_id) = Uuid::parse_str(project_id) else {
            return Ok(Vec::new());
        };
        db::endpoints::find_matching(&self.pool, project_id, method.as_str(), path).await
    }

    async fn find_access_keys(
        &self,
        endpoint_id: Uuid,
        key_value: &str,
    ) -> Result<Vec<AccessKey>, sqlx::Error> {
        db::access_keys::find_matching(&self.pool, endpoint_id, key_value).await
    }
}

/// In-process registry for tests and embedding without a database.
#[derive(Default)]
pub struct MemoryRegistry {
    endpoints: RwLock<Vec<Endpoint>>,
    keys: RwLock<Vec<AccessKey>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_endpoint(&self, endpoint: Endpoint) {
        self.endpoints.write().await.push(endpoint);
    }

    pub async fn insert_key(&self, key: AccessKey) {
        self.keys.write().await.push(key);
    }
}

#[async_trait]
impl EndpointRegistry for MemoryRegistry {
    async fn find_endpoints(
        &self,
        project_id: &str,
        method: HttpMethod,
        path: &str,
    ) -> Result<Vec<Endpoint>, sqlx::Error> {
        let Ok(project_id) = Uuid::parse_str(project_id) else {
            return Ok(Vec::new());
        };
        let mut found: Vec<Endpoint> = self
            .endpoints
            .read()
            .await
            .iter()
            .filter(|e| e.project_id == project_id && e.method == method.as_str() && e.path == path)
            .cloned()
            .collect();
        found.sort_by_key(|e| (e.created_at, e.id));
        Ok(found)
    }

    async fn find_access_keys(
        &self,
        endpoint_id: Uuid,
        key_value: &str,
    ) -> Result<Vec<AccessKey>, sqlx::Error> {
        Ok(self
            .keys
            .read()
            .await
            .iter()
            .filter(|k| k.endpoint_id == endpoint_id && k.key_value == key_value)
            .cloned()
            .collect())
    }
}
