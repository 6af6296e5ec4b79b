use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::info;

use edunexus_api::AppStateInner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edunexus=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let db_path =
        std::env::var("EDUNEXUS_SERVER_DB_PATH").unwrap_or_else(|_| "edunexus-server.db".into());
    let host = std::env::var("EDUNEXUS_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("EDUNEXUS_PORT")
        .unwrap_or_else(|_| "5000".into())
        .parse()?;

    let db = edunexus_db::Database::open(&PathBuf::from(&db_path))?;
    let app = edunexus_api::router(AppStateInner::new(db));

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("EduNexus backend listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received Ctrl+C, shutting down...");
    }
}
