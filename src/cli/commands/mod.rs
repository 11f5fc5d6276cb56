//! Subcommand dispatch.

pub mod browse;
pub mod config;
pub mod wizard;

use crate::cli::args::{Cli, Commands};
use crate::cli::core::{CommandContext, CommandResult};
use crate::config::ConfigManager;
use crate::intake::identity::EnvIdentity;
use crate::utils::clock::SystemClock;

/// Runs the parsed command line against the real environment.
pub fn run(cli: Cli) -> CommandResult {
    let context = CommandContext::new(ConfigManager::new()?, &EnvIdentity, Box::new(SystemClock))?;
    dispatch(&context, cli.command)
}

pub fn dispatch(context: &CommandContext, command: Commands) -> CommandResult {
    tracing::debug!(?command, "dispatching command");
    match command {
        Commands::Profile(args) => wizard::profile(context, &args),
        Commands::Company(args) => wizard::company(context, &args),
        Commands::Offer(args) => wizard::offer(context, &args),
        Commands::Offers => browse::offers(context),
        Commands::Companies => browse::companies(context),
        Commands::Config(command) => config::run(context, command),
    }
}
