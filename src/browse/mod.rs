//! Read side: record shapes, card/detail projections and the browser state.

pub mod browser;
pub mod projection;
pub mod records;
pub mod scroll;

pub use browser::{BrowserEvent, BrowserState, FetchTicket, LoadState, Rect};
pub use projection::{Browsable, DetailLine, RecordCard, RecordDetail};
pub use records::{normalize_url, AddressRef, CompanyRecord, OfferRecord};
pub use scroll::{CountingScrollLock, NoopScrollLock, ScrollGuard, ScrollLock, TerminalScrollLock};
