use sqlx::{PgPool, migrate::MigrateError, postgres::PgPoolOptions};
use tracing::info;

pub type DbPool = PgPool;

pub async fn connect(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("Connected to database");
    Ok(pool)
}

pub async fn migrate(pool: &DbPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;

    info!("Database migrations applied");
    Ok(())
}
