mod commands;

use clap::Parser;
use commands::{execute_command, utils::create_client, Commands};

/// Genius catalog and collaborator explorer
#[derive(Parser)]
#[command(
    name = "genius-collab",
    about = "Fetch an artist's songs and lyrics from Genius and index their collaborators",
    long_about = None
)]
struct Cli {
    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let client = match create_client() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Error: {e}");
            eprintln!();
            eprintln!("Please set the following environment variable:");
            eprintln!("  GENIUS_BEARER_TOKEN=your_genius_api_access_token");
            std::process::exit(1);
        }
    };

    if let Err(e) = execute_command(args.command, &client).await {
        eprintln!("❌ Command failed: {e}");
        std::process::exit(1);
    }

    Ok(())
}
