//! Presales Assistant - chatbot endpoint backed by a hosted generative-language API.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use presales_assistant::ai::{system_instruction, AiClient};
use presales_assistant::config::ConfigLoader;
use presales_assistant::knowledge::KnowledgeBase;
use presales_assistant::server::{AnswerServer, AppState};

#[derive(Parser)]
#[command(
    name = "presales-assistant",
    about = "Presales chatbot endpoint backed by a hosted generative-language API",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the answer API.
    Serve {
        /// Path to a specific config file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Host address to bind to (overrides config).
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config).
        #[arg(short, long)]
        port: Option<u16>,
        /// Path to the knowledge base JSON file (overrides config).
        #[arg(short, long)]
        knowledge_base: Option<PathBuf>,
    },
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

async fn serve(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    knowledge_base: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let loader = match config_path {
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new(),
    };
    let mut config = loader.load()?;

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(path) = knowledge_base {
        config.knowledge_base = path;
    }

    let knowledge = KnowledgeBase::load(&config.knowledge_base)?;
    let client = AiClient::from_config(config.ai.clone())?;
    let contact_email = config.prompt.resolve_contact_email();

    tracing::info!(
        provider = ?client.provider_kind(),
        model = %client.model(),
        contact_email = %contact_email,
        "Presales assistant configured"
    );

    let state = AppState::new(knowledge, client, system_instruction(&contact_email));
    spawn_shutdown_listener(state.cancel.clone());

    let server = AnswerServer::new(state).with_config(config.server);
    server.run().await?;

    Ok(())
}

/// Cancel the token on Ctrl-C so the server shuts down gracefully.
fn spawn_shutdown_listener(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received Ctrl-C, shutting down");
            cancel.cancel();
        }
    });
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Serve {
            config,
            host,
            port,
            knowledge_base,
        } => {
            if let Err(e) = serve(config, host, port, knowledge_base).await {
                tracing::error!(error = %e, "Fatal error");
                std::process::exit(1);
            }
        }
    }
}
