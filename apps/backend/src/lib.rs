#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod web;

// Re-exports for public API
pub use config::VetoConfig;
pub use error::AppError;
pub use extractors::{ChannelId, ValidatedJson};
pub use middleware::{RequestTrace, StructuredLogger, TraceSpan};
pub use services::{Outbound, SessionSweeper, SweeperHandle, VetoService};
pub use state::{build_state, AppState};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    veto_test_support::logging::init();
}
