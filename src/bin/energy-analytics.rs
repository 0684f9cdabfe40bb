use tracing::info;
use tracing_subscriber::EnvFilter;

use energy_forecast::config::ServerConfig;
use energy_forecast::http;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("energy_forecast=info,energy_analytics=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let addr = config.socket_address();

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        service = http::SERVICE_NAME,
        version = env!("CARGO_PKG_VERSION"),
        "Listening on {addr}"
    );
    axum::serve(listener, http::router()).await?;

    Ok(())
}
