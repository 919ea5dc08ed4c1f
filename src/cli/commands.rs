//! CLI command definitions and handlers

use clap::Subcommand;

use crate::core::client::LlmClient;
use crate::core::config::AppConfig;
use crate::core::models::{LanguageSelection, LlmResult};

/// Commands for the translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web application
    Serve {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Listen port
        #[arg(short, long, default_value_t = 5000)]
        port: u16,
    },

    /// Translate and critique a single text from the terminal
    Translate {
        /// Text to translate
        text: String,

        /// Target language (key, ISO code or name); configured default if omitted
        #[arg(short, long)]
        language: Option<String>,
    },
}

/// Handle serve command
pub async fn handle_serve(host: String, port: u16, config: AppConfig) -> anyhow::Result<()> {
    use crate::server::api::run_server;
    use tracing::info;

    info!("Starting web application on {}:{} ({} mode)", host, port, config.mode());
    println!("🚀 Server starting on http://{}:{}", host, port);

    run_server(host, port, config).await?;

    Ok(())
}

/// Handle translate command
pub async fn handle_translate(
    text: String,
    language: Option<String>,
    config: AppConfig,
) -> anyhow::Result<()> {
    let selection = LanguageSelection::resolve(language.as_deref(), config.default_language)?;
    if selection.defaulted {
        println!("ℹ️  No language given, using default: {}", selection.language);
    }

    let client = LlmClient::new(&config)?;

    let translation = match client.translate(&text, selection.language.code()).await {
        LlmResult::Success { text } => text,
        LlmResult::Failure { kind, message } => {
            anyhow::bail!("translation failed ({}): {}", kind, message);
        }
    };
    println!("\n✅ Translation ({}):\n{}", selection.language, translation);

    match client.critique(&text, &translation).await {
        LlmResult::Success { text } => println!("\n📝 Critique:\n{}", text),
        LlmResult::Failure { kind, message } => {
            eprintln!("\n❌ Critique failed ({}): {}", kind, message);
        }
    }

    Ok(())
}
