use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::crypto::secrets_match;
use crate::error::AppError;
use crate::state::SharedState;

pub const ADMIN_SECRET_HEADER: &str = "x-admin-secret";

/// Proof that the caller presented the configured admin secret.
#[derive(Debug, Clone, Copy)]
pub struct AdminAuth;

impl FromRequestParts<SharedState> for AdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let rejected = || AppError::Unauthorized("Invalid or missing admin secret".to_string());

        let Some(expected) = state.config.admin_secret.as_deref() else {
            return Err(rejected());
        };

        let presented = parts
            .headers
            .get(ADMIN_SECRET_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(rejected)?;

        if secrets_match(presented, expected) {
            Ok(AdminAuth)
        } else {
            Err(rejected())
        }
    }
}
