//! List/detail browser state machine.
//!
//! At most one record is active. While one is, a [`ScrollGuard`] is held; it
//! is released by every dismissal path, by replacing the list, by
//! [`BrowserState::teardown`] and by dropping the state. Fetches are tagged
//! with a generation so a completion that arrives after a newer fetch (or
//! after teardown) is ignored.

use std::sync::Arc;

use crate::browse::projection::{Browsable, RecordCard, RecordDetail};
use crate::browse::scroll::{ScrollGuard, ScrollLock};
use crate::transport::{Collection, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserEvent {
    Select(usize),
    Close,
    Pointer { inside_detail: bool },
    Escape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Identifies one fetch; only the newest ticket may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// Screen rectangle used for pointer hit tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && row >= self.y
            && u32::from(column) < u32::from(self.x) + u32::from(self.width)
            && u32::from(row) < u32::from(self.y) + u32::from(self.height)
    }
}

#[derive(Debug)]
struct ActiveRecord {
    index: usize,
    _guard: ScrollGuard,
}

pub struct BrowserState<T> {
    items: Vec<T>,
    active: Option<ActiveRecord>,
    load: LoadState,
    generation: u64,
    lock: Arc<dyn ScrollLock>,
}

impl<T> BrowserState<T> {
    pub fn new(lock: Arc<dyn ScrollLock>) -> Self {
        Self {
            items: Vec::new(),
            active: None,
            load: LoadState::Loading,
            generation: 0,
            lock,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active.as_ref().map(|active| active.index)
    }

    pub fn active_record(&self) -> Option<&T> {
        self.active_index().and_then(|index| self.items.get(index))
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.active.is_some()
    }

    /// Applies one user event. Returns `true` when the active record changed.
    pub fn handle(&mut self, event: BrowserEvent) -> bool {
        match event {
            BrowserEvent::Select(index) => self.select(index),
            BrowserEvent::Pointer {
                inside_detail: true,
            } => false,
            BrowserEvent::Close | BrowserEvent::Escape | BrowserEvent::Pointer { .. } => {
                self.dismiss()
            }
        }
    }

    /// Maps a pointer press to an event using the detail surface bounds.
    pub fn pointer_at(&mut self, column: u16, row: u16, detail: Rect) -> bool {
        self.handle(BrowserEvent::Pointer {
            inside_detail: detail.contains(column, row),
        })
    }

    fn select(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            tracing::debug!(index, len = self.items.len(), "select ignored: out of range");
            return false;
        }
        if let Some(active) = self.active.as_mut() {
            if active.index == index {
                return false;
            }
            tracing::debug!(from = active.index, to = index, "active record switched");
            active.index = index;
            return true;
        }
        tracing::debug!(index, "detail opened");
        self.active = Some(ActiveRecord {
            index,
            _guard: ScrollGuard::acquire(Arc::clone(&self.lock)),
        });
        true
    }

    fn dismiss(&mut self) -> bool {
        match self.active.take() {
            Some(active) => {
                tracing::debug!(index = active.index, "detail closed");
                true
            }
            None => false,
        }
    }

    /// Starts a fetch; any earlier ticket becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.load = LoadState::Loading;
        FetchTicket {
            generation: self.generation,
        }
    }

    /// Applies a fetch result if `ticket` is still current.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Collection<T>, TransportError>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "stale fetch result discarded"
            );
            return false;
        }
        match result {
            Ok(collection) => {
                self.replace_items(collection.items);
                self.load = match collection.error {
                    Some(message) => LoadState::Failed(message),
                    None => LoadState::Ready,
                };
            }
            Err(err) => {
                tracing::warn!(error = %err, "fetch failed");
                self.replace_items(Vec::new());
                self.load = LoadState::Failed(err.to_string());
            }
        }
        true
    }

    /// Replaces the list and closes any open detail.
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.dismiss();
        self.items = items;
    }

    /// Invalidates outstanding fetches and releases the scroll lock.
    pub fn teardown(&mut self) {
        self.generation += 1;
        self.dismiss();
    }
}

impl<T: Browsable> BrowserState<T> {
    pub fn cards(&self) -> Vec<RecordCard> {
        self.items.iter().map(Browsable::card).collect()
    }

    pub fn active_detail(&self) -> Option<RecordDetail> {
        self.active_record().map(Browsable::detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browse::scroll::CountingScrollLock;

    fn ready(items: Vec<&'static str>) -> (BrowserState<&'static str>, Arc<CountingScrollLock>) {
        let counter = Arc::new(CountingScrollLock::default());
        let mut state = BrowserState::new(counter.clone());
        let ticket = state.begin_fetch();
        assert!(state.complete_fetch(
            ticket,
            Ok(Collection {
                items,
                error: None,
                skipped: 0
            })
        ));
        (state, counter)
    }

    #[test]
    fn every_dismissal_releases_the_lock() {
        for event in [
            BrowserEvent::Close,
            BrowserEvent::Escape,
            BrowserEvent::Pointer {
                inside_detail: false,
            },
        ] {
            let (mut state, counter) = ready(vec!["a", "b"]);
            assert!(state.handle(BrowserEvent::Select(1)));
            assert_eq!(counter.held(), 1);
            assert!(state.handle(event));
            assert_eq!(state.active_index(), None);
            assert_eq!(counter.held(), 0);
            assert!(!state.handle(event));
            assert_eq!(counter.unlocks(), 1);
        }
    }

    #[test]
    fn switching_records_keeps_single_lock() {
        let (mut state, counter) = ready(vec!["a", "b", "c"]);
        state.handle(BrowserEvent::Select(0));
        state.handle(BrowserEvent::Select(2));
        assert_eq!(state.active_record(), Some(&"c"));
        assert_eq!(counter.locks(), 1);
        assert!(!state.handle(BrowserEvent::Pointer {
            inside_detail: true
        }));
        assert!(!state.handle(BrowserEvent::Select(9)));
        assert_eq!(state.active_index(), Some(2));
    }

    #[test]
    fn stale_fetch_is_ignored() {
        let (mut state, _counter) = ready(vec!["a"]);
        let old = state.begin_fetch();
        let new = state.begin_fetch();
        assert!(!state.complete_fetch(old, Err(TransportError::Network("late".into()))));
        assert_eq!(state.load_state(), &LoadState::Loading);
        assert!(state.complete_fetch(
            new,
            Ok(Collection {
                items: vec!["x", "y"],
                error: None,
                skipped: 0
            })
        ));
        assert_eq!(state.items(), &["x", "y"]);
    }

    #[test]
    fn teardown_and_drop_release() {
        let (mut state, counter) = ready(vec!["a"]);
        state.handle(BrowserEvent::Select(0));
        let ticket = state.begin_fetch();
        state.teardown();
        assert_eq!(counter.held(), 0);
        assert!(!state.complete_fetch(ticket, Err(TransportError::Network("x".into()))));

        let (mut state, counter) = ready(vec!["a"]);
        state.handle(BrowserEvent::Select(0));
        drop(state);
        assert_eq!(counter.held(), 0);
    }

    #[test]
    fn failures_and_missing_lists_surface() {
        let (mut state, counter) = ready(vec!["a"]);
        state.handle(BrowserEvent::Select(0));
        let ticket = state.begin_fetch();
        state.complete_fetch(ticket, Ok(Collection::empty_with_error("no list")));
        assert_eq!(state.load_state(), &LoadState::Failed("no list".into()));
        assert!(state.items().is_empty());
        assert_eq!(counter.held(), 0);
    }

    #[test]
    fn rect_hit_test() {
        let rect = Rect::new(10, 5, 20, 4);
        assert!(rect.contains(10, 5));
        assert!(rect.contains(29, 8));
        assert!(!rect.contains(30, 8));
        assert!(!rect.contains(9, 6));
    }
}
