//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;

use crate::config::Config;
use crate::logging;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.no_color);
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    // Create context for commands; flags win over the config file
    let ctx = commands::Context::new(&cli, &config)?;

    // Dispatch to appropriate command
    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Zones => commands::zones::execute(ctx).await,
        Commands::Records(args) => commands::records::execute(ctx, args).await,
        Commands::Add(args) => commands::add::execute(ctx, args).await,
        Commands::Delete(args) => commands::delete::execute(ctx, args).await,
        Commands::Update(args) => commands::update::execute(ctx, args).await,
        Commands::Serial(args) => commands::serial::execute(ctx, args).await,
        Commands::Check(args) => commands::check::execute(ctx, args).await,
        Commands::Reload(args) => commands::check::reload(ctx, args).await,
        Commands::Backups(args) => commands::backups::execute(ctx, args).await,
        Commands::Restore(args) => commands::backups::restore(ctx, args).await,
        Commands::Menu => commands::menu::execute(ctx).await,
        Commands::Config(args) => commands::config::execute(ctx, args).await,
    }
}
