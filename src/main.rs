use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use snapquiz::groq::{ApiKeyManager, GroqClient};
use snapquiz::pipeline::{Mode, Pipeline, PipelineSettings};
use snapquiz::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "snapquiz")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Generate a quiz from an image and play it in the terminal
    Play {
        /// Path to a photo of a textbook page
        image: PathBuf,
        /// What to generate: mcq or flashcard
        #[arg(short, long, default_value = "mcq")]
        mode: Mode,
    },
    /// Manage the Groq API key
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Store an API key in the system keyring
    SetKey {
        /// The key, starting with gsk_
        key: String,
    },
    /// Show the configured key (masked)
    Show,
    /// Remove the key from the system keyring
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snapquiz=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let config = Config::load()?;
            let port = port.unwrap_or(config.port);
            let pipeline = build_pipeline(&config)?;

            let router = snapquiz::server::router(pipeline, &config.trusted_origin_suffix);
            snapquiz::server::serve(router, port).await?;
        }
        Commands::Play { image, mode } => {
            let config = Config::load()?;
            let pipeline = build_pipeline(&config)?;

            let request = snapquiz::app::load_request(&image, mode)?;
            let image_name = image
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| image.display().to_string());

            let mut app = App::new(config, pipeline, request, image_name)?;
            app.run().await?;
        }
        Commands::Auth { action } => match action {
            AuthAction::SetKey { key } => {
                ApiKeyManager::set_api_key(&key)?;
                println!("Stored API key {}", ApiKeyManager::mask_key(&key));
            }
            AuthAction::Show => {
                let key = ApiKeyManager::get_api_key()?;
                println!("{}", ApiKeyManager::mask_key(&key));
            }
            AuthAction::Clear => {
                ApiKeyManager::delete_api_key()?;
                println!("API key removed");
            }
        },
    }

    Ok(())
}

/// Resolve the API key and assemble the generation pipeline
fn build_pipeline(config: &Config) -> Result<Arc<Pipeline>> {
    let api_key = ApiKeyManager::get_api_key().context("Groq API key is required")?;
    let client = GroqClient::new(api_key, config.request_timeout())?;
    Ok(Arc::new(Pipeline::new(Arc::new(client), PipelineSettings::from(config))))
}
