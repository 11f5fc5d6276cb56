#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

pub const BIN: &str = "placement_intake_cli";

/// Nothing listens on the discard port, so every request fails fast.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9";

/// Isolated home directory plus a preconfigured command builder.
pub struct Harness {
    home: TempDir,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            home: TempDir::new().expect("create temp home"),
        }
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    /// Binary with a clean environment: no identity, plain output.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin(BIN).expect("binary built");
        cmd.env("PLACEMENT_INTAKE_HOME", self.home.path())
            .env("PLACEMENT_INTAKE_API_URL", UNREACHABLE_API)
            .env_remove("PLACEMENT_INTAKE_TOKEN")
            .env_remove("PLACEMENT_INTAKE_NAME")
            .env_remove("PLACEMENT_INTAKE_EMAIL")
            .env_remove("PLACEMENT_INTAKE_TEST_BROWSER_EVENTS")
            .env_remove("RUST_LOG")
            .arg("--plain");
        cmd
    }

    /// Command whose prompts are answered by `answers` in order.
    pub fn scripted(&self, answers: &[&str]) -> Command {
        let mut cmd = self.command();
        cmd.env("PLACEMENT_INTAKE_TEST_TEXT_INPUTS", answers.join("|"));
        cmd
    }

    pub fn signed_in(&self, answers: &[&str]) -> Command {
        let mut cmd = self.scripted(answers);
        cmd.env("PLACEMENT_INTAKE_TOKEN", "google-oauth2|1048")
            .env("PLACEMENT_INTAKE_NAME", "Asha Patel")
            .env("PLACEMENT_INTAKE_EMAIL", "asha@example.edu");
        cmd
    }
}

/// The pretty-printed JSON document that ends a dry run's output.
pub fn trailing_json(stdout: &[u8]) -> serde_json::Value {
    let text = String::from_utf8_lossy(stdout);
    let start = text
        .lines()
        .scan(0usize, |offset, line| {
            let at = *offset;
            *offset += line.len() + 1;
            Some((at, line))
        })
        .filter(|(_, line)| *line == "{")
        .map(|(at, _)| at)
        .last()
        .expect("dry run printed a JSON object");
    serde_json::from_str(&text[start..]).expect("valid JSON payload")
}
