use anyhow::Context;
use campusdesk::router::init_router;
use campusdesk::state::AppState;
use campusdesk_config::{CorsConfig, DatabaseConfig, EncryptionConfig, ServerConfig};
use campusdesk_crypto::FieldCipher;
use campusdesk_db::{init_db_pool, run_migrations};
use campusdesk_observability::{init_metrics, init_tracing, metrics_app, shutdown_tracer};
use dotenvy::dotenv;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    init_tracing()?;

    let server_config = ServerConfig::from_env();
    let database_config = DatabaseConfig::from_env()?;
    let encryption_config =
        EncryptionConfig::from_env().context("FIELD_ENCRYPTION_KEY is missing or invalid")?;

    let db = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;

    if server_config.run_migrations {
        run_migrations(&db)
            .await
            .context("Failed to apply migrations")?;
    }

    if let Some(handle) = init_metrics()? {
        let metrics_listener = tokio::net::TcpListener::bind(&server_config.metrics_addr)
            .await
            .with_context(|| format!("Failed to bind {}", server_config.metrics_addr))?;
        info!(addr = %server_config.metrics_addr, "Metrics listener started");
        tokio::spawn(async move {
            if let Err(e) = axum::serve(metrics_listener, metrics_app(handle)).await {
                error!(error = %e, "Metrics listener stopped");
            }
        });
    }

    let state = AppState::new(
        db,
        FieldCipher::from_config(&encryption_config),
        CorsConfig::from_env(),
    );
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&server_config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", server_config.addr))?;
    info!(addr = %server_config.addr, "Server running");
    info!("Swagger UI available at /swagger-ui, Scalar at /scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tracer().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
