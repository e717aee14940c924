use anyhow::{Context, Result};
use clap::Parser;
use photoshoot_generator::{app::PhotoshootService, config::Config, create_router, AppState};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "photoshoot-generator")]
#[command(about = "Serve the photoshoot image generation API")]
struct CliArgs {
    /// Host to bind, overrides HOST.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overrides PORT.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photoshoot_generator=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let config = Config::from_env()
        .and_then(|config| config.with_overrides(args.host, args.port))
        .context("Failed to load configuration")?;

    let service =
        PhotoshootService::from_config(&config).context("Failed to initialize image client")?;
    let app = create_router(AppState::new(service, config.cors_allowed_origins.clone()));

    let addr = config.listen_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use clap::Parser;

    #[test]
    fn test_cli_args_port_override() {
        let args = CliArgs::parse_from(["photoshoot-generator", "--port", "8080"]);
        assert_eq!(args.port, Some(8080));
        assert!(args.host.is_none());
    }

    #[test]
    fn test_cli_args_invalid_port() {
        assert!(CliArgs::try_parse_from(["photoshoot-generator", "--port", "http"]).is_err());
    }
}
