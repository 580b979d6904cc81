//! Property tests for the veto engine (pure domain).
//!
//! Ruleset contract:
//! - A full valid run drives the cursor from 0 to the sequence length
//! - The pool shrinks by exactly one per ban/pick_map and never on pick_side
//! - picks never exceed the maps played for the format
//! - Side assignments are always complementary
//! - The decider enters picks exactly once, when the pool holds one map

use proptest::prelude::*;

use crate::domain::state::{StepKind, VetoPhase};
use crate::domain::test_gens;
use crate::domain::test_prelude;
use crate::domain::test_state_helpers::{running_session, t0, A};
use crate::domain::veto::{apply, VetoProgress};
use crate::errors::domain::ValidationKind;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_full_run_respects_pool_and_pick_bounds(
        format in test_gens::match_format(),
        pool_choices in test_gens::pool_choices(),
        sides in test_gens::side_choices(),
    ) {
        let mut session = running_session(format);
        let mut pool_iter = pool_choices.into_iter();
        let mut side_iter = sides.into_iter();
        let mut decider_materialized = 0usize;

        while let Some(step) = session.current_step().cloned() {
            let pool_before = session.map_pool.len();
            let picks_before = session.picks.len();
            let cursor_before = session.veto_step;

            let value = match step.kind {
                StepKind::Ban | StepKind::PickMap => {
                    let idx = pool_iter.next().unwrap_or(0) % session.map_pool.len();
                    session.map_pool[idx].clone()
                }
                StepKind::PickSide { .. } => side_iter.next().unwrap().as_str().to_string(),
            };

            let progress = apply(&mut session, &step.by, step.kind.choice_kind(), &value, t0());
            prop_assert!(progress.is_ok(), "valid choice rejected: {:?}", progress);

            prop_assert_eq!(session.veto_step, cursor_before + 1);
            match step.kind {
                StepKind::Ban => {
                    prop_assert_eq!(session.map_pool.len(), pool_before - 1);
                    prop_assert_eq!(session.picks.len(), picks_before);
                }
                StepKind::PickMap => {
                    prop_assert_eq!(session.map_pool.len(), pool_before - 1);
                    prop_assert_eq!(session.picks.len(), picks_before + 1);
                }
                StepKind::PickSide { map_index } => {
                    prop_assert_eq!(session.map_pool.len(), pool_before);
                    if session.picks.len() == picks_before + 1 {
                        decider_materialized += 1;
                        prop_assert_eq!(pool_before, 1);
                        prop_assert_eq!(&session.picks[map_index].map, &session.map_pool[0]);
                    }
                    let sides = session.picks[map_index].sides.unwrap();
                    prop_assert_ne!(sides.team_a(), sides.team_b());
                    let chosen = if step.by == A { sides.team_a() } else { sides.team_b() };
                    prop_assert_eq!(chosen.as_str(), value.as_str());
                }
            }
            prop_assert!(session.picks.len() <= format.maps_played());
        }

        prop_assert_eq!(session.phase(), VetoPhase::Complete);
        prop_assert_eq!(session.veto_step, session.veto_sequence.len());
        prop_assert_eq!(session.picks.len(), format.maps_played());
        prop_assert_eq!(session.map_pool.len(), 1);
        prop_assert_eq!(decider_materialized, 1);
    }

    /// Junk values never mutate the session, whatever the step.
    #[test]
    fn prop_junk_values_are_rejected_without_mutation(
        format in test_gens::match_format(),
        advance in 0usize..11,
        junk in test_gens::junk_value(),
    ) {
        let mut session = running_session(format);
        for _ in 0..advance.min(session.veto_sequence.len() - 1) {
            let step = session.current_step().cloned().unwrap();
            let value = match step.kind {
                StepKind::PickSide { .. } => "Attacker".to_string(),
                _ => session.map_pool[0].clone(),
            };
            apply(&mut session, &step.by, step.kind.choice_kind(), &value, t0()).unwrap();
        }

        let step = session.current_step().cloned().unwrap();
        let before = session.clone();
        let err = apply(&mut session, &step.by, step.kind.choice_kind(), &junk, t0()).unwrap_err();
        let expected = match step.kind {
            StepKind::PickSide { .. } => ValidationKind::InvalidSide,
            _ => ValidationKind::InvalidMap,
        };
        prop_assert!(err.is_validation(&expected));
        prop_assert_eq!(session.veto_step, before.veto_step);
        prop_assert_eq!(&session.map_pool, &before.map_pool);
        prop_assert_eq!(&session.picks, &before.picks);
    }

    /// The final progress is Complete exactly once and carries every map.
    #[test]
    fn prop_completion_summary_matches_picks(
        format in test_gens::match_format(),
        side in test_gens::side(),
    ) {
        let mut session = running_session(format);
        let mut completions = 0;
        while let Some(step) = session.current_step().cloned() {
            let value = match step.kind {
                StepKind::PickSide { .. } => side.as_str().to_string(),
                _ => session.map_pool[session.map_pool.len() - 1].clone(),
            };
            if let VetoProgress::Complete { summary, .. } =
                apply(&mut session, &step.by, step.kind.choice_kind(), &value, t0()).unwrap()
            {
                completions += 1;
                prop_assert_eq!(summary.maps.len(), format.maps_played());
                prop_assert!(summary.maps.iter().all(|m| m.team_a_side.is_some()));
            }
        }
        prop_assert_eq!(completions, 1);
    }
}
