//! Domain layer: pure veto logic types and helpers.

pub mod catalogue;
pub mod coinflip;
pub mod sequence;
pub mod state;
pub mod summary;
pub mod veto;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod tests_props_veto;
#[cfg(test)]
mod tests_veto;

// Re-exports for ergonomics
pub use catalogue::{full_map_pool, CoinFace, MatchFormat, Side, MAP_CATALOGUE};
pub use coinflip::{resolve as resolve_coinflip, CoinSource, CoinflipOutcome, CoinflipWinner};
pub use sequence::generate as generate_sequence;
pub use state::{
    ActorId, ChannelId, ChoiceKind, MapResult, Session, SideAssignment, Step, StepKind, TeamSlot,
    VetoPhase,
};
pub use summary::VetoSummary;
pub use veto::{PromptKind, PromptRequest, VetoEffect, VetoProgress};
