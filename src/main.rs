use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use photobooth::config::Settings;
use photobooth::database::connection;
use photobooth::repository::PgPhotoRepository;
use photobooth::routes::api;
use photobooth::services::access::AccessGate;
use photobooth::services::storage::UploadStorage;
use photobooth::state::AppState;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env().context("Failed to load configuration")?;

    let storage = UploadStorage::new(&settings.upload_dir);
    storage
        .ensure_dir()
        .context("Failed to prepare upload directory")?;

    let pool = connection::connect(&settings.database_url)
        .await
        .context("Failed to connect to database")?;
    connection::migrate(&pool)
        .await
        .context("Failed to run database migrations")?;

    let state = web::Data::new(AppState::new(
        Arc::new(PgPhotoRepository::new(pool)),
        AccessGate::new(settings.upload_secret.clone()),
        storage,
        settings.public_dir.clone(),
    ));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(api::configure(state.clone()))
    })
    .bind((settings.host.as_str(), settings.port))
    .with_context(|| format!("Failed to bind {}:{}", settings.host, settings.port))?;

    info!("Server running on http://localhost:{}", settings.port);
    server.run().await?;

    info!("Server shut down");
    Ok(())
}
