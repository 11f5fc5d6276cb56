//! Terminal front end for the record browser.
//!
//! The list is drawn on the main screen. Opening a record switches to the
//! alternate screen with mouse capture (the scroll lock) and draws its detail
//! there; every dismissal returns to the list.

use std::io::{self, Write};
use std::sync::Arc;

use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{self, Clear, ClearType},
};

use crate::browse::{
    Browsable, BrowserEvent, BrowserState, LoadState, NoopScrollLock, Rect, ScrollLock,
    TerminalScrollLock,
};
use crate::cli::core::CommandError;
use crate::cli::ui::detail_view::DetailView;
use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::navigation::{read_nav_key, NavKey};
use crate::cli::ui::test_mode::{self, BrowserTestEvent};
use crate::transport::{Collection, TransportError};

const LIST_HINT: &str = "↑/↓ move · Enter open · q quit";
const DETAIL_HINT: &str = "Esc/x close · click outside to dismiss";
const RETRY_HINT: &str = "Press r to retry or q to quit.";

/// Where browser input comes from. A finished script ends the session.
enum InputSource {
    Terminal,
    Scripted(std::vec::IntoIter<BrowserTestEvent>),
}

impl InputSource {
    fn is_terminal(&self) -> bool {
        matches!(self, InputSource::Terminal)
    }
}

impl Iterator for InputSource {
    type Item = io::Result<NavKey>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            InputSource::Terminal => Some(read_nav_key()),
            InputSource::Scripted(events) => events.next().map(|event| Ok(scripted_key(event))),
        }
    }
}

/// Scripted clicks land on the first detail row or just below the frame.
fn scripted_key(event: BrowserTestEvent) -> NavKey {
    match event {
        BrowserTestEvent::Up => NavKey::Up,
        BrowserTestEvent::Down => NavKey::Down,
        BrowserTestEvent::Enter => NavKey::Enter,
        BrowserTestEvent::Esc => NavKey::Esc,
        BrowserTestEvent::Close => NavKey::Close,
        BrowserTestEvent::ClickInside => NavKey::Click { column: 0, row: 0 },
        BrowserTestEvent::ClickOutside => NavKey::Click {
            column: 0,
            row: u16::MAX,
        },
        BrowserTestEvent::Retry => NavKey::Retry,
        BrowserTestEvent::Quit => NavKey::Quit,
    }
}

struct RawModeSession {
    enabled: bool,
}

impl RawModeSession {
    fn start(enabled: bool) -> io::Result<Self> {
        if enabled {
            terminal::enable_raw_mode()?;
        }
        Ok(Self { enabled })
    }
}

impl Drop for RawModeSession {
    fn drop(&mut self) {
        if self.enabled {
            let _ = terminal::disable_raw_mode();
        }
    }
}

/// Runs one browsing session over the records returned by `load`.
pub fn run_browser<T, L>(title: &str, mut load: L) -> Result<(), CommandError>
where
    T: Browsable,
    L: FnMut() -> Result<Collection<T>, TransportError>,
{
    let mut input = match test_mode::next_browser_events(title) {
        Some(events) => InputSource::Scripted(events.into_iter()),
        None => InputSource::Terminal,
    };
    let terminal = input.is_terminal();
    let lock: Arc<dyn ScrollLock> = if terminal {
        Arc::new(TerminalScrollLock)
    } else {
        Arc::new(NoopScrollLock)
    };

    let mut session = Session::new(lock);
    session.load(&mut load);

    let _raw = RawModeSession::start(terminal)?;
    let mut screen = Screen::new(io::stdout(), terminal);
    drive(title, &mut session, &mut load, &mut input, &mut screen)?;
    Ok(())
}

/// Draws the session, feeds it `keys` until one exits or they run out, then
/// tears the browser down.
fn drive<T, L, K, W>(
    title: &str,
    session: &mut Session<T>,
    load: &mut L,
    keys: K,
    screen: &mut Screen<W>,
) -> io::Result<()>
where
    T: Browsable,
    L: FnMut() -> Result<Collection<T>, TransportError>,
    K: IntoIterator<Item = io::Result<NavKey>>,
    W: Write,
{
    session.redraw(title, screen)?;
    for key in keys {
        match session.apply(key?, load) {
            Step::Exit => break,
            Step::Redraw => session.redraw(title, screen)?,
            Step::Unchanged => {}
        }
    }
    session.state.teardown();
    Ok(())
}

/// What a key press did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Redraw,
    Unchanged,
    Exit,
}

/// Browser state plus the list cursor and the last drawn detail frame.
struct Session<T> {
    state: BrowserState<T>,
    cursor: usize,
    detail_area: Rect,
}

impl<T: Browsable> Session<T> {
    fn new(lock: Arc<dyn ScrollLock>) -> Self {
        Self {
            state: BrowserState::new(lock),
            cursor: 0,
            detail_area: Rect::default(),
        }
    }

    fn load<L>(&mut self, load: &mut L)
    where
        L: FnMut() -> Result<Collection<T>, TransportError>,
    {
        fetch(&mut self.state, load);
        self.cursor = 0;
    }

    fn apply<L>(&mut self, key: NavKey, load: &mut L) -> Step
    where
        L: FnMut() -> Result<Collection<T>, TransportError>,
    {
        let active = self.state.active_index().is_some();
        let changed = match key {
            NavKey::Quit if active => self.state.handle(BrowserEvent::Close),
            NavKey::Quit => return Step::Exit,
            NavKey::Esc if !active => return Step::Exit,
            NavKey::Esc => self.state.handle(BrowserEvent::Escape),
            NavKey::Close => self.state.handle(BrowserEvent::Close),
            NavKey::Up if !active => {
                let moved = self.cursor > 0;
                self.cursor = self.cursor.saturating_sub(1);
                moved
            }
            NavKey::Down if !active => {
                let moved = self.cursor + 1 < self.state.items().len();
                if moved {
                    self.cursor += 1;
                }
                moved
            }
            NavKey::Enter if !active => self.state.handle(BrowserEvent::Select(self.cursor)),
            NavKey::Click { column, row } if active => {
                self.state.pointer_at(column, row, self.detail_area)
            }
            NavKey::Retry if matches!(self.state.load_state(), LoadState::Failed(_)) => {
                self.load(load);
                true
            }
            _ => false,
        };
        if !changed {
            return Step::Unchanged;
        }
        if let Some(index) = self.state.active_index() {
            self.cursor = index;
        }
        Step::Redraw
    }

    fn redraw<W: Write>(&mut self, title: &str, screen: &mut Screen<W>) -> io::Result<()> {
        self.detail_area = screen.draw(&view_lines(title, &self.state, self.cursor))?;
        Ok(())
    }
}

fn fetch<T, L>(state: &mut BrowserState<T>, load: &mut L)
where
    L: FnMut() -> Result<Collection<T>, TransportError>,
{
    let ticket = state.begin_fetch();
    let result = load();
    state.complete_fetch(ticket, result);
}

/// Lines for the current view and, when a record is open, its frame area.
fn view_lines<T: Browsable>(title: &str, state: &BrowserState<T>, cursor: usize) -> View {
    if let Some(detail) = state.active_detail() {
        let mut lines = DetailView::from_record(&detail).render_lines();
        let frame = lines.len();
        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        lines.push(DETAIL_HINT.to_string());
        return View {
            lines,
            detail: Some(Rect::new(0, 0, clamp_u16(width), clamp_u16(frame))),
        };
    }

    let formatter = Formatter::new();
    let mut lines = vec![formatter.header_text(title)];
    match state.load_state() {
        LoadState::Loading => lines.push("Loading…".to_string()),
        LoadState::Failed(message) => {
            lines.push(format!("ERROR: {message}"));
            lines.push(RETRY_HINT.to_string());
        }
        LoadState::Ready if state.items().is_empty() => {
            lines.push("No records found.".to_string());
        }
        LoadState::Ready => {
            for (index, card) in state.cards().iter().enumerate() {
                let heading = format!("{} · {}", card.title, card.subtitle);
                if index == cursor {
                    lines.push(format!("› {}", formatter.accent_text(heading)));
                } else {
                    lines.push(format!("  {heading}"));
                }
                lines.push(format!("    {}", card.description));
                lines.push(format!("    [{}]", card.cta));
            }
            lines.push(String::new());
            lines.push(LIST_HINT.to_string());
        }
    }
    View {
        lines,
        detail: None,
    }
}

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

struct View {
    lines: Vec<String>,
    detail: Option<Rect>,
}

struct Screen<W> {
    out: W,
    terminal: bool,
}

impl<W: Write> Screen<W> {
    fn new(out: W, terminal: bool) -> Self {
        Self { out, terminal }
    }

    /// Draws a view and returns the detail frame's area for hit tests.
    fn draw(&mut self, view: &View) -> io::Result<Rect> {
        if self.terminal {
            queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
            for line in &view.lines {
                write!(self.out, "{line}\r\n")?;
            }
        } else {
            for line in &view.lines {
                writeln!(self.out, "{line}")?;
            }
        }
        self.out.flush()?;
        Ok(view.detail.unwrap_or_default())
    }
}
