#![doc(test(attr(deny(warnings))))]

//! Menu Core offers the menu registration wizard, batch submission, and
//! margin classification primitives that power a small food-service
//! operator's profitability workflows.

pub mod catalog;
pub mod coach;
pub mod config;
pub mod errors;
pub mod margin;
pub mod registration;
pub mod repository;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Menu Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
