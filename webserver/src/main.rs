//! Workshop backend entry point
//!
//! Reads configuration from flags with environment fallbacks, wires the
//! store and text generator into the orchestrator and serves the HTTP API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use generator::{GeneratorConfig, OfflineGenerator, ProviderId, RealTextGenerator, TextGenerator};
use orchestrator::{EngineConfig, FileWorkshopStore, MemoryWorkshopStore, WorkshopOrchestrator, WorkshopRepository};
use shared::logging;
use tokio::signal;

use webserver::WebServer;

const SERVICE: &str = "webserver";

#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "AI-readiness workshop backend")]
struct Args {
    /// Address for the HTTP API
    #[arg(long, env = "WORKSHOP_BIND", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "WORKSHOP_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Directory for workshop documents; kept in memory when absent
    #[arg(long, env = "WORKSHOP_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Text generation provider (openai, anthropic)
    #[arg(long, env = "WORKSHOP_PROVIDER", default_value = "openai")]
    provider: ProviderId,

    /// Model name; the provider default when absent
    #[arg(long, env = "WORKSHOP_MODEL")]
    model: Option<String>,

    /// Override for the provider's API base URL
    #[arg(long, env = "WORKSHOP_PROVIDER_URL")]
    base_url: Option<String>,

    /// Provider request timeout in seconds
    #[arg(long, env = "WORKSHOP_PROVIDER_TIMEOUT", default_value = "30")]
    timeout_secs: u64,

    #[arg(long, env = "WORKSHOP_SIMILARITY_THRESHOLD", default_value = "0.8")]
    similarity_threshold: f64,

    #[arg(long, env = "WORKSHOP_PRIORITY_THRESHOLD", default_value = "7.0")]
    priority_threshold: f64,

    #[arg(long, env = "WORKSHOP_CONFIDENCE_FLOOR", default_value = "0.5")]
    confidence_floor: f64,
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            similarity_threshold: self.similarity_threshold,
            priority_threshold: self.priority_threshold,
            confidence_floor: self.confidence_floor,
            ..EngineConfig::default()
        }
    }
}

async fn build_store(data_dir: Option<&PathBuf>) -> anyhow::Result<Box<dyn WorkshopRepository>> {
    match data_dir {
        Some(dir) => {
            let store = FileWorkshopStore::open(dir)
                .await
                .with_context(|| format!("opening data directory {}", dir.display()))?;
            logging::log_success(SERVICE, &format!("Persisting workshops to {}", dir.display()));
            Ok(Box::new(store))
        }
        None => {
            logging::log_success(SERVICE, "Keeping workshops in memory");
            Ok(Box::new(MemoryWorkshopStore::new()))
        }
    }
}

fn build_generator(args: &Args) -> anyhow::Result<Box<dyn TextGenerator>> {
    let Ok(api_key) = std::env::var(args.provider.api_key_var()) else {
        logging::log_success(
            SERVICE,
            &format!("{} not set, serving demo content", args.provider.api_key_var()),
        );
        return Ok(Box::new(OfflineGenerator));
    };

    let mut config = GeneratorConfig::new(args.provider, api_key)?
        .with_timeout(Duration::from_secs(args.timeout_secs));
    if let Some(model) = &args.model {
        config = config.with_model(model.clone());
    }
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url)?;
    }

    logging::log_success(
        SERVICE,
        &format!("Using {} model {}", config.provider, config.model),
    );
    Ok(Box::new(RealTextGenerator::new(config)?))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup(SERVICE, &format!("workshop backend on {}", args.bind));

    let config = args.engine_config();
    config.validate().context("invalid engine configuration")?;

    let store = build_store(args.data_dir.as_ref()).await?;
    let generator = build_generator(&args)?;
    let orchestrator = WorkshopOrchestrator::new(store, generator, config);
    let server = WebServer::new(args.bind, orchestrator);

    let shutdown = async {
        match signal::ctrl_c().await {
            Ok(()) => logging::log_shutdown(SERVICE, "Received Ctrl+C signal"),
            Err(err) => logging::log_error(SERVICE, "Signal handling", &err),
        }
    };

    if let Err(err) = server.run(shutdown).await {
        logging::log_error(SERVICE, "Serving", &err);
        return Err(err.into());
    }

    logging::log_success(SERVICE, "WebServer stopped gracefully");
    Ok(())
}
