use crate::cli::args::ConfigCommand;
use crate::cli::core::{CommandContext, CommandResult};
use crate::cli::io;
use crate::cli::ui::formatting::Formatter;

pub fn run(context: &CommandContext, command: ConfigCommand) -> CommandResult {
    match command {
        ConfigCommand::Show => show(context),
        ConfigCommand::Set { key, value } => set(context, &key, &value),
    }
}

fn show(context: &CommandContext) -> CommandResult {
    let formatter = Formatter::new();
    formatter.print_header("Configuration");
    let entries = vec![
        ("api_base_url".to_string(), context.config.api_base_url.clone()),
        (
            "request_timeout_secs".to_string(),
            context.config.request_timeout_secs.to_string(),
        ),
        (
            "file".to_string(),
            context.config_manager.path().display().to_string(),
        ),
    ];
    for line in formatter.two_column_lines(&entries) {
        println!("{line}");
    }
    Ok(())
}

/// Edits the persisted file, not the env-overridden view held by the context.
fn set(context: &CommandContext, key: &str, value: &str) -> CommandResult {
    let mut stored = context.config_manager.load()?;
    stored.set(key, value)?;
    context.config_manager.save(&stored)?;
    tracing::info!(key, "configuration updated");
    io::print_success(format!("{key} updated."));
    Ok(())
}
