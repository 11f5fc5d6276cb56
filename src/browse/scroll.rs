//! Background scroll lock held while a detail view is open.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};

/// Freezes and restores whatever scrolls behind an open detail view.
pub trait ScrollLock: Send + Sync {
    fn lock(&self);
    fn unlock(&self);
}

/// Holds the lock for as long as it lives.
pub struct ScrollGuard {
    lock: Arc<dyn ScrollLock>,
    active: bool,
}

impl ScrollGuard {
    pub fn acquire(lock: Arc<dyn ScrollLock>) -> Self {
        lock.lock();
        Self { lock, active: true }
    }

    pub fn release(&mut self) {
        if self.active {
            self.lock.unlock();
            self.active = false;
        }
    }
}

impl Drop for ScrollGuard {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for ScrollGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollGuard")
            .field("active", &self.active)
            .finish()
    }
}

/// Switches to the alternate screen and captures the mouse.
#[derive(Debug, Default)]
pub struct TerminalScrollLock;

impl TerminalScrollLock {
    fn run(enter: bool) -> io::Result<()> {
        let mut stdout = io::stdout();
        if enter {
            execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        } else {
            execute!(stdout, DisableMouseCapture, LeaveAlternateScreen)?;
        }
        stdout.flush()
    }
}

impl ScrollLock for TerminalScrollLock {
    fn lock(&self) {
        if let Err(err) = Self::run(true) {
            tracing::warn!(error = %err, "could not enter the alternate screen");
        }
    }

    fn unlock(&self) {
        if let Err(err) = Self::run(false) {
            tracing::warn!(error = %err, "could not restore the main screen");
        }
    }
}

/// Lock that does nothing; used for plain output.
#[derive(Debug, Default)]
pub struct NoopScrollLock;

impl ScrollLock for NoopScrollLock {
    fn lock(&self) {}
    fn unlock(&self) {}
}

/// Counts lock and unlock calls.
#[derive(Debug, Default)]
pub struct CountingScrollLock {
    locks: AtomicUsize,
    unlocks: AtomicUsize,
}

impl CountingScrollLock {
    pub fn locks(&self) -> usize {
        self.locks.load(Ordering::SeqCst)
    }

    pub fn unlocks(&self) -> usize {
        self.unlocks.load(Ordering::SeqCst)
    }

    /// Currently held locks.
    pub fn held(&self) -> usize {
        self.locks().saturating_sub(self.unlocks())
    }
}

impl ScrollLock for CountingScrollLock {
    fn lock(&self) {
        self.locks.fetch_add(1, Ordering::SeqCst);
    }

    fn unlock(&self) {
        self.unlocks.fetch_add(1, Ordering::SeqCst);
    }
}
