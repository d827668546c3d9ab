//! algomentor CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Write a default config file
//! - `chat`    — Interactive question-answering session
//! - `ask`     — Single question (optionally with an image)
//! - `doctor`  — Diagnose provider, index, and OCR health

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "algomentor",
    about = "algomentor — retrieval-augmented DSA study assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Onboard,

    /// Start an interactive chat session
    Chat,

    /// Ask a single question
    Ask {
        /// The question to ask
        question: String,

        /// Attach an image (a diagram, a screenshot of code, ...)
        #[arg(short, long)]
        image: Option<std::path::PathBuf>,
    },

    /// Diagnose system health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run()?,
        Commands::Chat => commands::chat::run().await?,
        Commands::Ask { question, image } => commands::ask::run(&question, image.as_deref()).await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
