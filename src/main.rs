use std::sync::Arc;

use anyhow::Context;
use poem::{Server, listener::TcpListener};
use sqlx::postgres::PgPoolOptions;
use tokio::main;
use tracing_subscriber::EnvFilter;

use contact_desk::{
    application::services::jwt::{JwtService, JwtServiceConfig},
    config::Config,
    infrastructure::repositories::PostgresMessageRepository,
    presentation::http::{build_app, endpoints::root::ApiState},
};

#[main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::try_parse().map_err(anyhow::Error::msg)?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(config.store_timeout)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run database migrations")?;

    let repo = PostgresMessageRepository::new(pool, config.store_timeout);
    let jwt = JwtService::new(JwtServiceConfig {
        secret: config.jwt_secret.clone(),
        expiration: config.jwt_expiration,
    });
    let state = Arc::new(ApiState::new(repo, jwt, config.max_page_size));

    let server_url = config.server_url();
    tracing::info!(%server_url, "starting server");

    let app = build_app(state, &server_url);

    Server::new(TcpListener::bind(format!("{}:{}", config.host, config.port)))
        .run(app)
        .await
        .context("server stopped with an error")
}
