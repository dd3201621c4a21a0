use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;

pub type SharedState = Arc<AppState>;

/// State for the admin API. The mock surface only gets a `Dispatcher`.
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
}
