//! CLI application for receipt expense tracking.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{config, inbox, list, parse, save};

/// Turn photographed receipts into an expense ledger
#[derive(Parser)]
#[command(name = "spense")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a single receipt image without saving it
    Parse(parse::ParseArgs),

    /// Save one already-parsed receipt JSON to the ledger
    Save(save::SaveArgs),

    /// Process every receipt image in the inbox folder
    Inbox(inbox::InboxArgs),

    /// List the most recently saved receipts
    List(list::ListArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Parse(args) => parse::run(args, cli.config.as_deref()).await,
        Commands::Save(args) => save::run(args, cli.config.as_deref()).await,
        Commands::Inbox(args) => inbox::run(args, cli.config.as_deref()).await,
        Commands::List(args) => list::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args).await,
    }
}
