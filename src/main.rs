use clap::Parser;
use fundrag::cli::handlers;
use fundrag::cli::Cli;
use fundrag::cli::Commands;
use fundrag::config::AppConfig;
use fundrag::logging;
use fundrag::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load()?,
    };

    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    logging::init_logging_with_level(level)?;

    if config.logging.backtrace {
        std::env::set_var("RUST_BACKTRACE", "1");
    }

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => handlers::handle_chat(&config).await,
        Commands::Serve { host, port } => handlers::handle_serve(&config, host, port).await,
        Commands::Build { concurrency, force } => {
            handlers::handle_build(&config, concurrency, force).await
        }
        Commands::Config => handlers::handle_config(&config),
    }
}
