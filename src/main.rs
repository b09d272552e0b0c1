use kys_backend::{app, store, AppState, Settings};
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("kys_backend=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let pool = store::connect(&settings.database_url, settings.max_connections).await?;
    store::ensure_tables(&pool).await?;
    tracing::info!(database = %settings.database_url, "database ready");

    let state = AppState::new(pool, &settings)?;
    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::warn!("received ctrl-c, shutting down");
}
