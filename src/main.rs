//! Main entry point for AI Translator & Critic

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use translator_critic::cli::commands::{self, Commands};
use translator_critic::AppConfig;

/// AI Translator & Critic - translate text and critique the translation
#[derive(Parser, Debug)]
#[command(name = "translator-critic", version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    let default_filter = format!("{}={}", env!("CARGO_PKG_NAME").replace('-', "_"), log_level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    match args.command {
        Commands::Serve { host, port } => {
            commands::handle_serve(host, port, config).await?;
        }
        Commands::Translate { text, language } => {
            commands::handle_translate(text, language, config).await?;
        }
    }

    Ok(())
}
