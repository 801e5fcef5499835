use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "parlance")]
#[command(about = "Parlance CLI - inspect and reset persisted dialog stacks", long_about = None)]
struct Cli {
    /// Runtime config file (defaults to ~/.config/parlance/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// State directory, overriding the configured file store
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List conversations with a stored dialog stack
    List,
    /// Print a conversation's dialog stack, top first
    Show {
        /// Channel id, e.g. msteams
        channel: String,
        /// Conversation id
        conversation: String,
    },
    /// Delete a conversation's dialog stack
    Reset {
        channel: String,
        conversation: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    parlance_application::telemetry::init_tracing("parlance=warn");
    let cli = Cli::parse();
    let ctx = commands::StoreContext::open(cli.config.as_deref(), cli.state_dir.as_deref())?;

    match cli.command {
        Commands::List => commands::list::run(&ctx)?,
        Commands::Show {
            channel,
            conversation,
        } => commands::show::run(&ctx, &channel, &conversation).await?,
        Commands::Reset {
            channel,
            conversation,
        } => commands::reset::run(&ctx, &channel, &conversation).await?,
    }

    Ok(())
}
