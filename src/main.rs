use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use marina_backend::{
    AppState,
    config::Config,
    routes,
    session::{RedisSessionBackend, SessionStore},
};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load configuration");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to Postgres");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let redis_client =
        redis::Client::open(config.redis_url.clone()).expect("Failed to create Redis client");
    let sessions = SessionStore::new(
        Arc::new(RedisSessionBackend::new(Arc::new(redis_client))),
        config.flash_clear_delay(),
    );

    let state = AppState {
        pool,
        config: config.clone(),
        sessions,
    };

    let app = routes::router(state);

    // CORS permissif uniquement en développement
    #[cfg(debug_assertions)]
    let app = {
        tracing::debug!("Adding CORS layer for development mode");
        app.layer(tower_http::cors::CorsLayer::permissive())
    };

    let addr = SocketAddr::new(
        config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .await
    .expect("Failed to start server");
}
