//! Veto step templates per match format.
//!
//! `a` is the coinflip winner (format chooser), `b` the other team. The last
//! map of every format is never picked explicitly: it is whatever survives
//! the bans and picks, and enters `picks` when its side step runs.

use crate::domain::catalogue::MatchFormat;
use crate::domain::state::{Step, StepKind};

/// Ordered veto steps for `format`.
pub fn generate(format: MatchFormat, a: &str, b: &str) -> Vec<Step> {
    match format {
        MatchFormat::Bo1 => vec![
            Step::ban(a),
            Step::ban(b),
            Step::ban(a),
            Step::ban(b),
            Step::ban(a),
            Step::ban(b),
            Step::pick_side(a, 0),
        ],
        MatchFormat::Bo3 => vec![
            Step::ban(a),
            Step::ban(b),
            Step::pick_map(a),
            Step::pick_side(b, 0),
            Step::pick_map(b),
            Step::pick_side(a, 1),
            Step::ban(a),
            Step::ban(b),
            Step::pick_side(a, 2),
        ],
        MatchFormat::Bo5 => vec![
            Step::ban(a),
            Step::ban(b),
            Step::pick_map(a),
            Step::pick_side(b, 0),
            Step::pick_map(b),
            Step::pick_side(a, 1),
            Step::pick_map(a),
            Step::pick_side(b, 2),
            Step::pick_map(b),
            Step::pick_side(a, 3),
            Step::pick_side(a, 4),
        ],
    }
}

/// Number of steps that remove a map from the pool.
pub fn pool_reducing_steps(steps: &[Step]) -> usize {
    steps
        .iter()
        .filter(|s| matches!(s.kind, StepKind::Ban | StepKind::PickMap))
        .count()
}

/// Number of side steps, one per map played.
pub fn side_steps(steps: &[Step]) -> usize {
    steps
        .iter()
        .filter(|s| matches!(s.kind, StepKind::PickSide { .. }))
        .count()
}
