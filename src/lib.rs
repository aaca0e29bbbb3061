use sqlx::PgPool;

use config::Config;
use session::SessionStore;

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub sessions: SessionStore,
}
