#![allow(dead_code)]

use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use mockserve::config::Config;

pub const ADMIN_SECRET: &str = "test-admin-secret";

/// A running test server instance with a dedicated test database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub client: Client,
    pub db_name: String,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Projects are owned by the admin side; insert one directly.
    pub async fn create_project(&self, name: &str) -> Uuid {
        sqlx::query_scalar::<_, Uuid>("INSERT INTO projects (name) VALUES ($1) RETURNING id")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .expect("insert project failed")
    }

    /// Create an endpoint through the admin API, return (body, status).
    pub async fn create_endpoint(&self, project_id: Uuid, body: &Value) -> (Value, StatusCode) {
        self.post_admin(&format!("/api/v1/projects/{project_id}/endpoints"), body)
            .await
    }

    /// Create an endpoint that must succeed, return its id.
    pub async fn endpoint(
        &self,
        project_id: Uuid,
        method: &str,
        path: &str,
        response_body: Option<&str>,
        status_code: u16,
        requires_key: bool,
    ) -> String {
        let (body, status) = self
            .create_endpoint(
                project_id,
                &json!({
                    "method": method,
                    "path": path,
                    "response_body": response_body,
                    "status_code": status_code,
                    "requires_key": requires_key,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create endpoint failed: {body}");
        body["id"].as_str().unwrap().to_string()
    }

    /// Add an access key to an endpoint, return the stored key value.
    pub async fn add_key(&self, project_id: Uuid, endpoint_id: &str, key_value: Option<&str>) -> String {
        let body = match key_value {
            Some(v) => json!({ "key_value": v }),
            None => json!({}),
        };
        let (body, status) = self
            .post_admin(
                &format!("/api/v1/projects/{project_id}/endpoints/{endpoint_id}/keys"),
                &body,
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "add key failed: {body}");
        body["key_value"].as_str().unwrap().to_string()
    }

    /// Call the mock surface. Returns (status, content-type, raw body).
    pub async fn mock(
        &self,
        method: reqwest::Method,
        project_id: Uuid,
        path: &str,
        headers: &[(&str, &str)],
    ) -> (StatusCode, Option<String>, String) {
        let mut req = self
            .client
            .request(method, self.url(&format!("/api/mock/{project_id}{path}")));
        for (k, v) in headers {
            req = req.header(*k, *v);
        }
        let resp = req.send().await.expect("mock request failed");
        let status = resp.status();
        let content_type = resp
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let body = resp.text().await.unwrap_or_default();
        (status, content_type, body)
    }

    pub async fn get_admin(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .header("x-admin-secret", ADMIN_SECRET)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post_admin(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .header("x-admin-secret", ADMIN_SECRET)
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put_admin(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .header("x-admin-secret", ADMIN_SECRET)
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn delete_admin(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .header("x-admin-secret", ADMIN_SECRET)
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

fn admin_url(base_url: &str) -> String {
    base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.to_string())
}

/// Spawn a test app with a fresh temporary database.
pub async fn spawn_app() -> TestApp {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    // Create a unique test database
    let db_name = format!("mockserve_test_{}", Uuid::now_v7().simple());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(&base_url))
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    let config = Config {
        database_url: test_url,
        admin_secret: Some(ADMIN_SECRET.to_string()),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 1_048_576,
        db_max_connections: 5,
        log_level: "warn".to_string(),
    };

    let app = mockserve::build_app(pool.clone(), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        pool,
        client: Client::new(),
        db_name,
    }
}

/// Drop the test database after tests complete.
pub async fn cleanup(app: TestApp) {
    let db_name = app.db_name.clone();
    app.pool.close().await;

    let base_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(&base_url))
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}
