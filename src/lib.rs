#![doc(test(attr(deny(warnings))))]

//! Placement intake collects student profiles, company records and job
//! offers through multi-step wizards, and browses published records.

pub mod browse;
pub mod cli;
pub mod config;
pub mod errors;
pub mod intake;
pub mod transport;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init(verbose: bool) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(verbose);
        tracing::debug!("placement intake tracing initialized");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init(false);
        super::init(true);
    }
}
