use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::Response;
use axum::http::header::SET_COOKIE;
use marina_backend::{
    AppState,
    config::Config,
    routes,
    session::{MemorySessionBackend, SessionStore},
};
use sqlx::postgres::PgPoolOptions;

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/marina_test".into(),
        redis_url: "redis://127.0.0.1/".into(),
        secret_key: "clef-de-test-integration".into(),
        jwt_expiration_secs: 24 * 3600,
        flash_clear_secs: 10,
        revalidate_subject: false,
        server_host: "::".into(),
        server_port: 3000,
    }
}

/// État de test : pool paresseux (jamais sollicité par les chemins
/// testés), backend de session en mémoire.
pub fn test_state() -> AppState {
    let config = test_config();
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database_url)
        .expect("lazy pool");
    let sessions = SessionStore::new(
        Arc::new(MemorySessionBackend::default()),
        config.flash_clear_delay(),
    );

    AppState {
        pool,
        config,
        sessions,
    }
}

pub fn app(state: AppState) -> Router {
    routes::router(state)
}

/// Valeur du cookie `session` posé par la réponse, s'il y en a un.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|raw| {
            let pair = raw.split(';').next()?;
            let (name, value) = pair.split_once('=')?;
            (name == "session").then(|| value.to_string())
        })
}
