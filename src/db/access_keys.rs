use sqlx::PgPool;
use uuid::Uuid;

use crate::models::AccessKey;

pub async fn list_by_endpoint(
    pool: &PgPool,
    endpoint_id: Uuid,
) -> Result<Vec<AccessKey>, sqlx::Error> {
    sqlx::query_as::<_, AccessKey>(
        "SELECT * FROM access_keys WHERE endpoint_id = $1 ORDER BY created_at DESC",
    )
    .bind(endpoint_id)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    endpoint_id: Uuid,
    key_value: &str,
) -> Result<AccessKey, sqlx::Error> {
    sqlx::query_as::<_, AccessKey>(
        "INSERT INTO access_keys (endpoint_id, key_value) VALUES ($1, $2) RETURNING *",
    )
    .bind(endpoint_id)
    .bind(key_value)
    .fetch_one(pool)
    .await
}

/// Exact match on both columns. Any row means the key is valid.
pub async fn find_matching(
    pool: &PgPool,
    endpoint_id: Uuid,
    key_value: &str,
) -> Result<Vec<AccessKey>, sqlx::Error> {
    sqlx::query_as::<_, AccessKey>(
        "SELECT * FROM access_keys WHERE endpoint_id = $1 AND key_value = $2",
    )
    .bind(endpoint_id)
    .bind(key_value)
    .fetch_all(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, endpoint_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM access_keys WHERE id = $1 AND endpoint_id = $2")
        .bind(id)
        .bind(endpoint_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
