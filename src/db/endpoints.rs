use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Endpoint;

/// Column values shared by create and update.
pub struct EndpointFields<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub response_body: Option<&'a str>,
    pub status_code: i32,
    pub requires_key: bool,
}

pub async fn list_by_project(
    pool: &PgPool,
    project_id: Uuid,
) -> Result<Vec<Endpoint>, sqlx::Error> {
    sqlx::query_as::<_, Endpoint>(
        "SELECT * FROM endpoints WHERE project_id = $1 ORDER BY created_at DESC",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    project_id: Uuid,
    fields: &EndpointFields<'_>,
) -> Result<Endpoint, sqlx::Error> {
    sqlx::query_as::<_, Endpoint>(
        "INSERT INTO endpoints (project_id, method, path, response_body, status_code, requires_key)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(project_id)
    .bind(fields.method)
    .bind(fields.path)
    .bind(fields.response_body)
    .bind(fields.status_code)
    .bind(fields.requires_key)
    .fetch_one(pool)
    .await
}

/// Public lookup used by the mock dispatcher, no ownership check.
///
/// Ordered so that "first" is stable if duplicates ever coexist.
pub async fn find_matching(
    pool: &PgPool,
    project_id: Uuid,
    method: &str,
    path: &str,
) -> Result<Vec<Endpoint>, sqlx::Error> {
    sqlx::query_as::<_, Endpoint>(
        "SELECT * FROM endpoints
         WHERE project_id = $1 AND method = $2 AND path = $3
         ORDER BY created_at, id",
    )
    .bind(project_id)
    .bind(method)
    .bind(path)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
    project_id: Uuid,
) -> Result<Option<Endpoint>, sqlx::Error> {
    sqlx::query_as::<_, Endpoint>(
        "SELECT * FROM endpoints WHERE id = $1 AND project_id = $2",
    )
    .bind(id)
    .bind(project_id)
    .fetch_optional(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    project_id: Uuid,
    fields: &EndpointFields<'_>,
) -> Result<Endpoint, sqlx::Error> {
    sqlx::query_as::<_, Endpoint>(
        "UPDATE endpoints
         SET method = $3, path = $4, response_body = $5, status_code = $6, requires_key = $7
         WHERE id = $1 AND project_id = $2
         RETURNING *",
    )
    .bind(id)
    .bind(project_id)
    .bind(fields.method)
    .bind(fields.path)
    .bind(fields.response_body)
    .bind(fields.status_code)
    .bind(fields.requires_key)
    .fetch_one(pool)
    .await
}

/// Returns false when no row matched. Access keys go with it via cascade.
pub async fn delete(pool: &PgPool, id: Uuid, project_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM endpoints WHERE id = $1 AND project_id = $2")
        .bind(id)
        .bind(project_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
