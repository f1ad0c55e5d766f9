use sea_orm::Database;
use sea_orm_migration::MigratorTrait;

use pengaduan::config::AppConfig;
use pengaduan::migrations::Migrator;
use pengaduan::routes;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_target(false).compact().init();

    let config = AppConfig::load()?;
    let db = Database::connect(&config.database_url).await?;
    Migrator::up(&db, None).await?;

    let app = routes::router(&db);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "Listening");
    axum::serve(listener, app).await?;
    Ok(())
}
