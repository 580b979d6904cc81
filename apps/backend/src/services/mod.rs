pub mod sweeper;
pub mod veto_flow;

pub use sweeper::{SessionSweeper, SweeperHandle};
pub use veto_flow::{ChoiceOption, Outbound, SessionView, StartCoinflip, VetoService};
