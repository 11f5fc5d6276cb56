use std::fmt;

use colored::Colorize;

use crate::cli::output::{current_preferences, OutputPreferences};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Header,
    Detail,
    Accent,
}

pub struct Formatter {
    prefs: OutputPreferences,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {
            prefs: current_preferences(),
        }
    }

    pub fn with_preferences(prefs: OutputPreferences) -> Self {
        Self { prefs }
    }

    pub fn print_header(&self, title: impl fmt::Display) {
        println!("\n{}", self.header_text(title));
    }

    pub fn header_text(&self, title: impl fmt::Display) -> String {
        self.colorize(format!("=== {} ===", title), Style::Header)
    }

    pub fn print_detail(&self, message: impl fmt::Display) {
        println!("{}", self.detail_text(message));
    }

    pub fn detail_text(&self, message: impl fmt::Display) -> String {
        self.colorize(message.to_string(), Style::Detail)
    }

    pub fn accent_text(&self, message: impl fmt::Display) -> String {
        self.colorize(message.to_string(), Style::Accent)
    }

    fn colorize(&self, text: String, style: Style) -> String {
        if self.prefs.plain_mode {
            return text;
        }
        match style {
            Style::Header => text.bold().to_string(),
            Style::Detail => text.dimmed().to_string(),
            Style::Accent => text.cyan().to_string(),
        }
    }

    pub fn format_two_column_row(&self, label: &str, value: &str, width: usize) -> String {
        format!("  {:<width$}  {}", label, value, width = width + 2)
    }

    pub fn two_column_lines(&self, entries: &[(String, String)]) -> Vec<String> {
        let width = entries
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);
        entries
            .iter()
            .map(|(label, value)| self.format_two_column_row(label, value, width))
            .collect()
    }
}
