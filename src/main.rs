//! Simloop CLI entry point.

use clap::Parser;

use simloop::cli::commands;
use simloop::cli::{handle_error, load_config, Cli, Commands};
use simloop::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => handle_error(&err, cli.json),
    };

    let _logger = match LoggerImpl::init(&LogConfig::from(&config.logging)) {
        Ok(logger) => logger,
        Err(err) => handle_error(&err, cli.json),
    };

    let result = match cli.command {
        Commands::Init(args) => commands::init::execute(args, &config, cli.json).await,
        Commands::Loop(args) => commands::loop_cmd::execute(args, &config, cli.json).await,
        Commands::Converse(args) => commands::converse::execute(args, &config, cli.json).await,
        Commands::Converge => commands::converge::execute(&config, cli.json).await,
        Commands::Messages => commands::messages::execute(&config, cli.json).await,
        Commands::Debug(args) => commands::debug::execute(args, &config, cli.json).await,
    };

    if let Err(err) = result {
        handle_error(&err, cli.json);
    }
}
