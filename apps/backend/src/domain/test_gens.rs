// Proptest generators for veto domain types.

use proptest::prelude::*;

use crate::domain::catalogue::{MatchFormat, Side, MAP_CATALOGUE};

pub fn match_format() -> impl Strategy<Value = MatchFormat> {
    prop_oneof![
        Just(MatchFormat::Bo1),
        Just(MatchFormat::Bo3),
        Just(MatchFormat::Bo5),
    ]
}

pub fn side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Attacker), Just(Side::Defender)]
}

/// One index per map-choosing step; taken modulo the pool size when applied,
/// so any vector drives a valid veto.
pub fn pool_choices() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..MAP_CATALOGUE.len(), 6)
}

/// One side per side step (five covers BO5).
pub fn side_choices() -> impl Strategy<Value = Vec<Side>> {
    prop::collection::vec(side(), 5)
}

/// Value guaranteed not to be a catalogue map or a side.
pub fn junk_value() -> impl Strategy<Value = String> {
    "[a-z]{1,12}".prop_filter("must not collide with real options", |s| {
        !MAP_CATALOGUE.contains(&s.as_str()) && s != "Attacker" && s != "Defender"
    })
}
