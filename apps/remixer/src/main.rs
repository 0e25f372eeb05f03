mod config;
mod errors;
mod library;
mod llm_client;
mod models;
mod page;
mod remix;
mod routes;
mod state;
mod terminal;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::library::{JsonFileRepository, MemoryRepository, PromptRepository};
use crate::llm_client::LlmClient;
use crate::page::client::HttpRemixClient;
use crate::page::clipboard::SystemClipboard;
use crate::page::session::RemixPage;
use crate::routes::build_router;
use crate::state::AppState;

#[derive(Parser)]
#[command(version, about = "Remix text into short posts with a language model")]
struct Cli {
    #[command(subcommand)]
    command: Option<Mode>,
}

#[derive(Subcommand)]
enum Mode {
    /// Run the remix HTTP endpoint (default).
    Serve,
    /// Open the interactive remix page in this terminal.
    Page {
        /// Base URL of a running remix endpoint.
        #[arg(long, default_value = "http://localhost:3000")]
        endpoint: String,
        /// Directory holding savedPrompts.json.
        #[arg(long, default_value = ".remixer")]
        data_dir: PathBuf,
        /// Keep prompts in memory only for this session.
        #[arg(long)]
        ephemeral: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Mode::Serve) {
        Mode::Serve => serve().await,
        Mode::Page {
            endpoint,
            data_dir,
            ephemeral,
        } => open_page(endpoint, data_dir, ephemeral).await,
    }
}

fn init_tracing(rust_log: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn serve() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    init_tracing(&config.rust_log);

    info!("Starting remixer v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(config.claude_api_key.clone());
    info!(
        "LLM client initialized (model: {}, max_tokens: {})",
        llm_client::MODEL,
        llm_client::MAX_TOKENS
    );

    let state = AppState {
        model: Arc::new(llm),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn open_page(endpoint: String, data_dir: PathBuf, ephemeral: bool) -> Result<()> {
    config::load_dotenv();
    init_tracing(&config::log_level());

    let repository: Box<dyn PromptRepository> = if ephemeral {
        Box::new(MemoryRepository::new())
    } else {
        Box::new(JsonFileRepository::new(&data_dir))
    };
    info!("Remix endpoint: {endpoint}");

    let mut page = RemixPage::load(repository);
    let api = HttpRemixClient::new(endpoint);
    let mut clipboard = SystemClipboard;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    terminal::run(&mut page, &api, &mut clipboard, stdin, &mut stdout).await
}
