use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

mod resolve;
mod review;
mod token;

#[derive(Debug, Parser)]
#[command(name = "hcr")]
#[command(about = "Home contractor review tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a free-text address into city, state and zip fields.
    Resolve {
        /// The address text to resolve.
        text: String,
        /// Geocode the text first; falls back to heuristics on failure.
        #[arg(long)]
        geocode: bool,
    },
    /// Validate a review draft, upload its photos, and submit it.
    Submit {
        /// The contractor being reviewed.
        #[arg(long)]
        contractor: Uuid,
        /// Path to the review draft JSON file.
        #[arg(long)]
        file: PathBuf,
        /// Photo files to upload before submitting (repeatable).
        #[arg(long = "photo")]
        photos: Vec<PathBuf>,
        /// Validate and resolve only; do not upload or submit.
        #[arg(long)]
        dry_run: bool,
    },
    /// Manage stored push notification tokens.
    #[command(subcommand)]
    Token(TokenCommands),
    /// List the project-type reference table.
    Services,
}

#[derive(Debug, Subcommand)]
enum TokenCommands {
    /// Save (or refresh) a device token for a user.
    Save {
        #[arg(long)]
        user: Uuid,
        #[arg(long)]
        token: String,
    },
    /// Delete every stored token for a user.
    Clear {
        #[arg(long)]
        user: Uuid,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = hcr_core::load_app_config_from_env()?;

    match cli.command {
        Commands::Resolve { text, geocode } => resolve::run_resolve(&config, &text, geocode).await,
        Commands::Submit {
            contractor,
            file,
            photos,
            dry_run,
        } => review::run_submit(&config, contractor, &file, &photos, dry_run).await,
        Commands::Token(TokenCommands::Save { user, token }) => {
            token::run_save(&config, user, &token).await
        }
        Commands::Token(TokenCommands::Clear { user }) => token::run_clear(&config, user).await,
        Commands::Services => review::run_services(&config).await,
    }
}
