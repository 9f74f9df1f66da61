use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "nudge")]
#[command(about = "nudge - conversational task reminders", long_about = None)]
struct Cli {
    /// Owner id scoping all store operations (supplied by the chat platform
    /// in production).
    #[arg(long, global = true, default_value_t = 1)]
    owner: i64,

    /// Task database path. Defaults to the platform data directory.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Talk to the bot on the console
    Chat,
    /// Run the extraction pipeline once on the given text
    Extract { text: String },
    /// Operate on the task store directly
    Tasks {
        #[command(subcommand)]
        action: TasksAction,
    },
}

#[derive(Subcommand)]
enum TasksAction {
    /// List tasks with their ids
    List,
    /// Print the number of stored tasks
    Count,
    /// Delete all tasks
    Clear,
    /// Delete one task by id
    Delete { id: i64 },
    /// Show store-wide statistics
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat => commands::chat::run(cli.owner, cli.db.as_deref()).await?,
        Commands::Extract { text } => commands::extract::run(&text).await?,
        Commands::Tasks { action } => commands::tasks::run(cli.owner, cli.db.as_deref(), action).await?,
    }

    Ok(())
}
