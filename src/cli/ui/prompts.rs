use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{self, ClearType},
    ExecutableCommand,
};
use dialoguer::{theme::ColorfulTheme, Select};

use crate::cli::ui::test_mode::{self, TextTestInput};

const BACK_LABEL: &str = "← Back";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextPromptResult {
    Value(String),
    Keep,
    Back,
    Help,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoicePromptResult {
    Value(String),
    Back,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationPromptResult {
    Confirm,
    Back,
    Cancel,
}

fn scripted_text(label: &str) -> Option<TextPromptResult> {
    test_mode::next_text_input(label).map(|scripted| match scripted {
        TextTestInput::Value(value) => TextPromptResult::Value(value),
        TextTestInput::Keep => TextPromptResult::Keep,
        TextTestInput::Back => TextPromptResult::Back,
        TextTestInput::Help => TextPromptResult::Help,
        TextTestInput::Cancel => TextPromptResult::Cancel,
    })
}

pub fn text_input(label: &str, default: Option<&str>) -> io::Result<TextPromptResult> {
    if let Some(scripted) = scripted_text(label) {
        return Ok(scripted);
    }

    let mut guard = RawModeGuard::activate()?;
    let mut stdout = io::stdout();
    redraw_input(&mut stdout, "")?;
    let mut buffer = String::new();

    loop {
        let event = event::read()?;
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    match key.code {
                        KeyCode::Char('c') | KeyCode::Char('C') => {
                            guard.deactivate();
                            println!();
                            return Ok(TextPromptResult::Cancel);
                        }
                        KeyCode::Char('u') | KeyCode::Char('U') => {
                            buffer.clear();
                            redraw_input(&mut stdout, &buffer)?;
                            continue;
                        }
                        _ => {}
                    }
                }

                match key.code {
                    KeyCode::Esc => {
                        guard.deactivate();
                        println!();
                        return Ok(TextPromptResult::Back);
                    }
                    KeyCode::Enter => {
                        guard.deactivate();
                        println!();
                        return Ok(interpret_buffer(&buffer, default));
                    }
                    KeyCode::Backspace => {
                        buffer.pop();
                        redraw_input(&mut stdout, &buffer)?;
                    }
                    KeyCode::Char(ch) => {
                        buffer.push(ch);
                        redraw_input(&mut stdout, &buffer)?;
                    }
                    _ => {}
                }
            }
            _ => continue,
        }
    }
}

/// Single choice from `options`. Scripted answers are matched case-insensitively.
pub fn choice_input(
    title: &str,
    options: &[String],
    default: Option<&str>,
    enable_back: bool,
) -> io::Result<ChoicePromptResult> {
    if let Some(scripted) = scripted_text(title) {
        return Ok(match scripted {
            TextPromptResult::Value(value) => ChoicePromptResult::Value(value),
            TextPromptResult::Keep => match default {
                Some(current) => ChoicePromptResult::Value(current.to_string()),
                None => ChoicePromptResult::Value(String::new()),
            },
            TextPromptResult::Back => ChoicePromptResult::Back,
            TextPromptResult::Help | TextPromptResult::Cancel => ChoicePromptResult::Cancel,
        });
    }
    if options.is_empty() {
        return Ok(ChoicePromptResult::Cancel);
    }

    let mut items: Vec<&str> = options.iter().map(String::as_str).collect();
    if enable_back {
        items.push(BACK_LABEL);
    }
    let initial = default
        .and_then(|current| {
            options
                .iter()
                .position(|candidate| candidate.eq_ignore_ascii_case(current))
        })
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(title)
        .items(&items)
        .default(initial)
        .interact_opt()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
    Ok(match selection {
        Some(index) if index < options.len() => ChoicePromptResult::Value(options[index].clone()),
        Some(_) => ChoicePromptResult::Back,
        None => ChoicePromptResult::Cancel,
    })
}

pub fn confirm_input(title: &str) -> io::Result<ConfirmationPromptResult> {
    if let Some(scripted) = scripted_text(title) {
        return Ok(match scripted {
            TextPromptResult::Value(value) => match value.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" | "confirm" | "submit" => ConfirmationPromptResult::Confirm,
                "back" | "edit" => ConfirmationPromptResult::Back,
                _ => ConfirmationPromptResult::Cancel,
            },
            TextPromptResult::Keep => ConfirmationPromptResult::Confirm,
            TextPromptResult::Back => ConfirmationPromptResult::Back,
            TextPromptResult::Help | TextPromptResult::Cancel => ConfirmationPromptResult::Cancel,
        });
    }

    let items = ["Submit", "Edit previous field", "Cancel"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(title)
        .items(&items)
        .default(0)
        .interact_opt()
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err.to_string()))?;
    Ok(match selection {
        Some(0) => ConfirmationPromptResult::Confirm,
        Some(1) => ConfirmationPromptResult::Back,
        _ => ConfirmationPromptResult::Cancel,
    })
}

fn redraw_input(stdout: &mut Stdout, buffer: &str) -> io::Result<()> {
    stdout.execute(cursor::MoveToColumn(0))?;
    stdout.execute(terminal::Clear(ClearType::CurrentLine))?;
    write!(stdout, "> {}", buffer)?;
    stdout.flush()
}

fn interpret_buffer(buffer: &str, default: Option<&str>) -> TextPromptResult {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return if default.is_some_and(|value| !value.is_empty()) {
            TextPromptResult::Keep
        } else {
            TextPromptResult::Value(String::new())
        };
    }

    match trimmed.to_ascii_lowercase().as_str() {
        ":cancel" => TextPromptResult::Cancel,
        ":back" => TextPromptResult::Back,
        ":help" => TextPromptResult::Help,
        ":clear" => TextPromptResult::Value(String::new()),
        _ => TextPromptResult::Value(buffer.to_string()),
    }
}

struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    fn activate() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { active: true })
    }

    fn deactivate(&mut self) {
        if self.active {
            let _ = terminal::disable_raw_mode();
            self.active = false;
        }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_commands() {
        assert_eq!(interpret_buffer("  ", Some("Surat")), TextPromptResult::Keep);
        assert_eq!(
            interpret_buffer("", None),
            TextPromptResult::Value(String::new())
        );
        assert_eq!(interpret_buffer(":BACK", None), TextPromptResult::Back);
        assert_eq!(
            interpret_buffer(":clear", Some("x")),
            TextPromptResult::Value(String::new())
        );
        assert_eq!(
            interpret_buffer("back street", None),
            TextPromptResult::Value("back street".into())
        );
    }

    #[test]
    fn scripted_prompts_consume_queue() {
        test_mode::install_text_inputs(vec![
            TextTestInput::Value("female".into()),
            TextTestInput::Back,
            TextTestInput::Value("yes".into()),
        ]);
        let options = vec!["Male".to_string(), "Female".to_string()];
        assert_eq!(
            choice_input("Gender", &options, None, false).unwrap(),
            ChoicePromptResult::Value("female".into())
        );
        assert_eq!(
            text_input("City", None).unwrap(),
            TextPromptResult::Back
        );
        assert_eq!(
            confirm_input("Review").unwrap(),
            ConfirmationPromptResult::Confirm
        );
        test_mode::reset_text_inputs();
    }
}
