use std::process::ExitCode;

use clap::Parser;

use placement_intake::cli::{self, output, Cli};

fn main() -> ExitCode {
    let args = Cli::parse();
    placement_intake::init(args.debug);
    output::set_preferences(output::OutputPreferences {
        plain_mode: args.plain,
        quiet_mode: args.quiet,
    });

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            output::error(&err);
            ExitCode::from(err.exit_code())
        }
    }
}
