mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use doclens_agent::OpenAiVisionRunner;
use doclens_gateway::{start_server, AppState, Environment};
use doclens_store::SqliteDocumentStore;

use config::Config;

#[derive(Parser)]
#[command(name = "doclens")]
#[command(about = "DocLens — document image extraction server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the DocLens HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show current server status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/health", config.port))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("DocLens is not running on port {}", config.port);
                }
            }
        }
    }

    Ok(())
}

async fn run_server(config: Config) -> Result<()> {
    info!(
        port = config.port,
        bind = %config.bind_address,
        db = %config.db_path,
        environment = %config.environment,
        "Starting DocLens server"
    );

    let Some(api_key) = config.openai_api_key.clone() else {
        bail!("OPENAI_API_KEY must be set to run the extraction server");
    };

    let agent = OpenAiVisionRunner::new(api_key)
        .with_base_url(&config.openai_base_url)
        .with_model(&config.model);
    info!(model = %config.model, "Registered OpenAI vision agent runner");

    let store = SqliteDocumentStore::open(&config.db_path)?;

    let state = AppState {
        agent: Arc::new(agent),
        store: Arc::new(store),
        environment: Environment::from_name(&config.environment),
    };

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port).parse()?;
    start_server(addr, state, &config.allowed_origins).await
}
