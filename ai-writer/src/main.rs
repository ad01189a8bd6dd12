use std::path::PathBuf;
use std::sync::Arc;

use ai_writer::{AppContext, ENDPOINTS, router};
use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use writer_adapters::GenerationGateway;
use writer_adapters::ollama::{OllamaConfig, OllamaLoader};
use writer_config::{ConfigLoader, Overrides, WriterConfig, load_dotenv};
use writer_telemetry::init_tracing;

/// AI content generation API.
#[derive(Debug, Parser)]
#[command(name = "ai-writer", version, about)]
struct Cli {
    /// Interface to bind (overrides HOST).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides PORT).
    #[arg(long)]
    port: Option<u32>,

    /// Model to load (overrides MODEL_NAME).
    #[arg(long)]
    model: Option<String>,

    /// Configuration file (TOML, YAML, or JSON).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let dotenv = load_dotenv();

    let config = ConfigLoader::new()
        .load_from_file(cli.config.as_deref())
        .load_from_env()
        .with_overrides(Overrides {
            host: cli.host,
            port: cli.port,
            model_name: cli.model,
        })
        .build()
        .context("failed to load configuration")?;

    init_tracing(&config.log_level).context("failed to initialise logging")?;
    match dotenv {
        Ok(Some(path)) => info!(path = %path.display(), "loaded environment from .env"),
        Ok(None) => {}
        Err(err) => warn!(error = %err, "ignoring unreadable .env file"),
    }

    config.validate().context("configuration validation failed")?;
    config.log_summary();

    let gateway = Arc::new(build_gateway(&config)?);
    info!(model = %config.model_name, "loading AI model");
    if let Err(err) = gateway.initialize().await {
        error!(error = %err, "model failed to load; generation requests will get 503");
    }

    let ctx = AppContext::new(config, gateway);
    let address = ctx.config().bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    info!(address = %listener.local_addr()?, "AI Writer listening");
    for endpoint in ENDPOINTS {
        info!(
            method = endpoint.method,
            path = endpoint.path,
            "{}",
            endpoint.description
        );
    }

    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("server stopped");
    Ok(())
}

fn build_gateway(config: &WriterConfig) -> Result<GenerationGateway> {
    let ollama = OllamaConfig::new()
        .with_base_url(&config.model_endpoint)
        .context("invalid MODEL_ENDPOINT")?
        .with_timeout(config.generation_timeout())
        .with_gpu(config.use_gpu);
    let loader = OllamaLoader::new(ollama).context("failed to build model client")?;

    Ok(GenerationGateway::new(
        Arc::new(loader),
        config.model_name.clone(),
    ))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
