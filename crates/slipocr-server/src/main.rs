//! HTTP service for Thai bank-slip OCR and field extraction.

mod response;
mod routes;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use clap::Parser;
use tower_http::cors::CorsLayer;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use slipocr_core::{SlipConfig, SlipFieldExtractor, SlipOcrEngine};

/// Thai bank-slip OCR service
#[derive(Parser)]
#[command(name = "slipocr-server")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Port to listen on (falls back to the PORT environment variable, then 5000)
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Model directory (overrides the config file)
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

/// Shared state handed to request handlers. The OCR engine is built once
/// at startup and passed by reference, not initialized lazily behind a
/// global.
pub struct AppState {
    pub engine: SlipOcrEngine,
    pub extractor: SlipFieldExtractor,
    pub confidence_threshold: f32,
}

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_PORT: u16 = 5000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &cli.config {
        Some(path) => SlipConfig::from_file(path)?,
        None => SlipConfig::default(),
    };
    if let Some(model_dir) = cli.model_dir {
        config.models.model_dir = model_dir;
    }

    let port = resolve_port(cli.port)?;

    info!("Initializing OCR engine with Thai language support...");
    let engine = SlipOcrEngine::from_config(&config)?;
    info!("OCR engine initialized successfully");

    let state = Arc::new(AppState {
        engine,
        extractor: SlipFieldExtractor::new(),
        confidence_threshold: config.ocr.confidence_threshold,
    });

    let app = Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/ocr", post(routes::ocr))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr: SocketAddr = format!("{}:{}", cli.host, port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Resolve the listen port: `--port` flag first, then the `PORT`
/// environment variable, then the default.
fn resolve_port(flag: Option<u16>) -> anyhow::Result<u16> {
    match flag {
        Some(port) => validate_port(&port.to_string()),
        None => match std::env::var("PORT") {
            Ok(raw) => validate_port(&raw),
            Err(_) => Ok(DEFAULT_PORT),
        },
    }
}

fn validate_port(raw: &str) -> anyhow::Result<u16> {
    let port: u32 = raw
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("port must be a number, got '{}'", raw))?;

    if !(1..=65535).contains(&port) {
        anyhow::bail!("port must be between 1 and 65535, got {}", port);
    }

    Ok(port as u16)
}
