//! In-memory channel registries. Nothing here survives a restart.

pub mod pending;
pub mod sessions;

pub use pending::{Claim, PendingCoinflip, PendingCoinflips};
pub use sessions::{SessionSeed, SessionStore};
