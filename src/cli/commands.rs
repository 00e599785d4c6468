//! CLI command definitions and argument parsing

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "fundrag")]
#[command(about = "Mutual fund FAQ assistant over an embedded knowledge base")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: configured level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to the configuration file (default: config.toml)
    #[arg(short, long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive question-and-answer loop
    Chat,
    /// Start the HTTP API server with the chat frontend
    Serve {
        /// Bind host (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Build the embeddings snapshot from the knowledge base
    Build {
        /// Number of concurrent embedding requests
        #[arg(long, default_value = "4")]
        concurrency: usize,
        /// Overwrite an existing snapshot
        #[arg(short, long)]
        force: bool,
    },
    /// Show the effective configuration
    Config,
}
