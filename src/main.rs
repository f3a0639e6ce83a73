use tracing_subscriber::EnvFilter;

use materna::api::{api_router, ApiContext};
use materna::config;
use materna::db::open_database;
use materna::db::seed::seed_reference_rows;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let db_path = config::db_path();
    tracing::info!(
        "{} v{} starting, database at {}",
        config::APP_NAME,
        config::APP_VERSION,
        db_path.display()
    );

    let mut conn = open_database(&db_path)?;
    seed_reference_rows(&mut conn)?;

    let uploads_dir = config::uploads_dir();
    std::fs::create_dir_all(config::lab_results_dir(&uploads_dir))?;

    let app = api_router(ApiContext::new(conn, uploads_dir));

    let addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
