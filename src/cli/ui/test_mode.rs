//! Scripted terminal input for automated runs.
//!
//! `PLACEMENT_INTAKE_TEST_TEXT_INPUTS` holds `|`-separated prompt answers.
//! `PLACEMENT_INTAKE_TEST_BROWSER_EVENTS` holds `|`-separated browser
//! sessions, each a `,`-separated list of key tokens.

use once_cell::sync::Lazy;
use std::{
    collections::VecDeque,
    env,
    sync::{Mutex, MutexGuard, PoisonError},
};

pub const TEXT_INPUTS_ENV: &str = "PLACEMENT_INTAKE_TEST_TEXT_INPUTS";
pub const BROWSER_EVENTS_ENV: &str = "PLACEMENT_INTAKE_TEST_BROWSER_EVENTS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextTestInput {
    Value(String),
    Keep,
    Back,
    Help,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserTestEvent {
    Up,
    Down,
    Enter,
    Esc,
    Close,
    ClickInside,
    ClickOutside,
    Retry,
    Quit,
}

struct Queue<T> {
    enabled: bool,
    items: VecDeque<T>,
}

impl<T> Queue<T> {
    fn from_env(var: &str, parse: fn(&str) -> VecDeque<T>) -> Self {
        match env::var(var) {
            Ok(raw) => Self {
                enabled: true,
                items: parse(&raw),
            },
            Err(_) => Self {
                enabled: false,
                items: VecDeque::new(),
            },
        }
    }
}

static TEXT_INPUTS: Lazy<Mutex<Queue<TextTestInput>>> =
    Lazy::new(|| Mutex::new(Queue::from_env(TEXT_INPUTS_ENV, parse_text_sequences)));

static BROWSER_EVENTS: Lazy<Mutex<Queue<Vec<BrowserTestEvent>>>> =
    Lazy::new(|| Mutex::new(Queue::from_env(BROWSER_EVENTS_ENV, parse_browser_sequences)));

fn lock<T>(queue: &Mutex<T>) -> MutexGuard<'_, T> {
    queue.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Next scripted answer. An exhausted script cancels the prompt.
pub fn next_text_input(label: &str) -> Option<TextTestInput> {
    let mut guard = lock(&TEXT_INPUTS);
    if !guard.enabled {
        return None;
    }
    Some(guard.items.pop_front().unwrap_or_else(|| {
        tracing::warn!(label, "scripted text inputs exhausted");
        TextTestInput::Cancel
    }))
}

/// Events for the next browser session. An exhausted script quits.
pub fn next_browser_events(label: &str) -> Option<Vec<BrowserTestEvent>> {
    let mut guard = lock(&BROWSER_EVENTS);
    if !guard.enabled {
        return None;
    }
    Some(guard.items.pop_front().unwrap_or_else(|| {
        tracing::warn!(label, "scripted browser events exhausted");
        vec![BrowserTestEvent::Quit]
    }))
}

fn parse_text_input(token: &str) -> TextTestInput {
    match token.to_ascii_uppercase().as_str() {
        "<CANCEL>" | "<ESC>" => TextTestInput::Cancel,
        "<BACK>" => TextTestInput::Back,
        "<HELP>" => TextTestInput::Help,
        "<KEEP>" => TextTestInput::Keep,
        "<BLANK>" | "<EMPTY>" => TextTestInput::Value(String::new()),
        _ => TextTestInput::Value(token.to_string()),
    }
}

fn parse_text_sequences(raw: &str) -> VecDeque<TextTestInput> {
    raw.split('|')
        .filter_map(|segment| {
            let trimmed = segment.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(parse_text_input(trimmed))
            }
        })
        .collect()
}

fn parse_browser_event(token: &str) -> Option<BrowserTestEvent> {
    match token.to_ascii_uppercase().as_str() {
        "UP" => Some(BrowserTestEvent::Up),
        "DOWN" => Some(BrowserTestEvent::Down),
        "ENTER" | "RETURN" => Some(BrowserTestEvent::Enter),
        "ESC" | "ESCAPE" => Some(BrowserTestEvent::Esc),
        "CLOSE" | "X" => Some(BrowserTestEvent::Close),
        "CLICK_IN" | "CLICK_INSIDE" => Some(BrowserTestEvent::ClickInside),
        "CLICK_OUT" | "CLICK_OUTSIDE" => Some(BrowserTestEvent::ClickOutside),
        "RETRY" | "R" => Some(BrowserTestEvent::Retry),
        "QUIT" | "Q" => Some(BrowserTestEvent::Quit),
        _ => None,
    }
}

fn parse_browser_sequences(raw: &str) -> VecDeque<Vec<BrowserTestEvent>> {
    raw.split('|')
        .filter_map(|segment| {
            let events = segment
                .split(',')
                .filter_map(|token| parse_browser_event(token.trim()))
                .collect::<Vec<_>>();
            if events.is_empty() {
                None
            } else {
                Some(events)
            }
        })
        .collect()
}

pub fn install_text_inputs(inputs: Vec<TextTestInput>) {
    let mut guard = lock(&TEXT_INPUTS);
    guard.enabled = true;
    guard.items = inputs.into();
}

pub fn reset_text_inputs() {
    let mut guard = lock(&TEXT_INPUTS);
    guard.enabled = false;
    guard.items.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_tokens_map_to_inputs() {
        let parsed = parse_text_sequences("Anya| <back> |<blank>|<KEEP>||8.5");
        assert_eq!(
            parsed,
            VecDeque::from(vec![
                TextTestInput::Value("Anya".into()),
                TextTestInput::Back,
                TextTestInput::Value(String::new()),
                TextTestInput::Keep,
                TextTestInput::Value("8.5".into()),
            ])
        );
    }

    #[test]
    fn browser_sessions_split_on_pipe() {
        let parsed = parse_browser_sequences("down,enter,esc,q|enter, click_out ,bogus,q");
        assert_eq!(parsed.len(), 2);
        assert_eq!(
            parsed[1],
            vec![
                BrowserTestEvent::Enter,
                BrowserTestEvent::ClickOutside,
                BrowserTestEvent::Quit
            ]
        );
    }
}
