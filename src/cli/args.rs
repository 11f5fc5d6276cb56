//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};

/// Placement intake - collect student, company and offer records.
#[derive(Debug, Parser)]
#[command(name = "placement_intake_cli")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable colors and glyphs
    #[arg(long, global = true)]
    pub plain: bool,

    /// Only print warnings, errors and results
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create your student profile
    Profile(WizardArgs),

    /// Register a company
    Company(WizardArgs),

    /// Publish a job offer
    Offer(WizardArgs),

    /// Browse published offers
    Offers,

    /// Browse registered companies
    Companies,

    /// Show or change settings
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Clone, Copy, Args)]
pub struct WizardArgs {
    /// Print the JSON payload instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective settings
    Show,

    /// Change one setting (api_base_url, request_timeout_secs)
    Set {
        key: String,
        value: String,
    },
}
