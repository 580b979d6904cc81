use time::Duration;

use crate::domain::catalogue::{MatchFormat, Side, MAP_CATALOGUE};
use crate::domain::state::{ChoiceKind, MapResult, SideAssignment, StepKind, VetoPhase};
use crate::domain::test_state_helpers::{
    fresh_session, play_out, running_session, t0, valid_choice, A, B, OUTSIDER,
};
use crate::domain::veto::{apply, choose_format, next_prompt, PromptKind, VetoEffect, VetoProgress};
use crate::errors::domain::{DomainError, ValidationKind};

#[test]
fn bo1_six_bans_then_side_pick_completes() {
    let mut session = running_session(MatchFormat::Bo1);
    assert_eq!(session.map_pool.len(), 7);

    let bans = ["Ascent", "Icebox", "Sunset", "Haven", "Lotus", "Pearl"];
    for (i, map) in bans.iter().enumerate() {
        let by = if i % 2 == 0 { A } else { B };
        let progress = apply(&mut session, by, ChoiceKind::BanMap, map, t0()).unwrap();
        assert!(matches!(
            progress,
            VetoProgress::Continue { effect: VetoEffect::Banned { .. }, .. }
        ));
    }
    assert_eq!(session.map_pool, vec!["Split".to_string()]);
    assert!(session.picks.is_empty());

    // The decider is announced before it exists in picks.
    let prompt = next_prompt(&session).unwrap();
    assert_eq!(prompt.kind, PromptKind::PickSide);
    assert_eq!(prompt.subject_map.as_deref(), Some("Split"));
    assert_eq!(prompt.for_actor, A);

    let progress = apply(&mut session, A, ChoiceKind::PickSide, "Attacker", t0()).unwrap();
    let VetoProgress::Complete { effect, summary } = progress else {
        panic!("expected completion");
    };
    assert_eq!(
        effect,
        VetoEffect::SidePicked {
            by: A.into(),
            map: "Split".into(),
            side: Side::Attacker
        }
    );
    assert_eq!(
        session.picks,
        vec![MapResult {
            map: "Split".into(),
            sides: Some(SideAssignment::team_a_takes(Side::Attacker)),
        }]
    );
    assert_eq!(session.picks[0].sides.unwrap().team_b(), Side::Defender);
    assert_eq!(session.phase(), VetoPhase::Complete);
    assert_eq!(session.veto_step, session.veto_sequence.len());
    assert_eq!(summary.maps.len(), 1);
    // pick_side never shrinks the pool
    assert_eq!(session.map_pool.len(), 1);
}

#[test]
fn bo3_full_run_records_picks_and_decider() {
    let mut session = running_session(MatchFormat::Bo3);

    apply(&mut session, A, ChoiceKind::BanMap, "Pearl", t0()).unwrap();
    apply(&mut session, B, ChoiceKind::BanMap, "Split", t0()).unwrap();
    let progress = apply(&mut session, A, ChoiceKind::PickMap, "Haven", t0()).unwrap();
    assert!(matches!(
        progress,
        VetoProgress::Continue {
            effect: VetoEffect::Picked { map_number: 1, .. },
            ..
        }
    ));
    // B picks the side on A's map.
    apply(&mut session, B, ChoiceKind::PickSide, "Defender", t0()).unwrap();
    apply(&mut session, B, ChoiceKind::PickMap, "Lotus", t0()).unwrap();
    apply(&mut session, A, ChoiceKind::PickSide, "Attacker", t0()).unwrap();
    apply(&mut session, A, ChoiceKind::BanMap, "Ascent", t0()).unwrap();
    apply(&mut session, B, ChoiceKind::BanMap, "Icebox", t0()).unwrap();
    assert_eq!(session.map_pool, vec!["Sunset".to_string()]);
    assert_eq!(session.picks.len(), 2);

    let progress = apply(&mut session, A, ChoiceKind::PickSide, "Defender", t0()).unwrap();
    let VetoProgress::Complete { summary, .. } = progress else {
        panic!("expected completion");
    };

    let maps: Vec<&str> = session.picks.iter().map(|p| p.map.as_str()).collect();
    assert_eq!(maps, vec!["Haven", "Lotus", "Sunset"]);
    assert_eq!(session.picks[0].sides.unwrap().team_b(), Side::Defender);
    assert_eq!(session.picks[0].sides.unwrap().team_a(), Side::Attacker);
    assert_eq!(session.picks[1].sides.unwrap().team_a(), Side::Attacker);
    assert_eq!(session.picks[2].sides.unwrap().team_a(), Side::Defender);
    assert_eq!(summary.match_type, MatchFormat::Bo3);
    assert_eq!(summary.team_a_label, "Alpha");
}

#[test]
fn bo5_plays_five_maps() {
    let mut session = running_session(MatchFormat::Bo5);
    let VetoProgress::Complete { summary, .. } = play_out(&mut session, Side::Attacker) else {
        unreachable!()
    };
    assert_eq!(session.picks.len(), 5);
    assert_eq!(summary.maps.len(), 5);
    assert!(session.picks.iter().all(|p| p.sides.is_some()));
}

#[test]
fn format_choice_by_non_winner_is_rejected_before_generation() {
    let mut session = fresh_session();
    let err = choose_format(&mut session, B, MatchFormat::Bo3, t0()).unwrap_err();
    assert!(err.is_validation(&ValidationKind::NotYourTurn));
    assert!(session.veto_sequence.is_empty());
    assert_eq!(session.match_type, None);
    assert_eq!(session.phase(), VetoPhase::AwaitingFormatChoice);
}

#[test]
fn format_cannot_be_rechosen_mid_veto() {
    let mut session = running_session(MatchFormat::Bo3);
    apply(&mut session, A, ChoiceKind::BanMap, "Pearl", t0()).unwrap();

    let err = choose_format(&mut session, A, MatchFormat::Bo1, t0()).unwrap_err();
    assert!(err.is_validation(&ValidationKind::PhaseMismatch));
    assert_eq!(session.match_type, Some(MatchFormat::Bo3));
    assert_eq!(session.map_pool.len(), 6);
}

#[test]
fn format_choice_returns_first_ban_prompt() {
    let mut session = fresh_session();
    let prompt = choose_format(&mut session, A, MatchFormat::Bo1, t0()).unwrap();
    assert_eq!(prompt.kind, PromptKind::BanMap);
    assert_eq!(prompt.for_actor, A);
    assert_eq!(prompt.options.len(), MAP_CATALOGUE.len());
}

#[test]
fn veto_choice_before_format_is_a_phase_mismatch() {
    let mut session = fresh_session();
    let err = apply(&mut session, A, ChoiceKind::BanMap, "Ascent", t0()).unwrap_err();
    assert!(err.is_validation(&ValidationKind::PhaseMismatch));
}

#[test]
fn wrong_actor_is_rejected_for_every_step_kind() {
    for format in MatchFormat::ALL {
        let mut session = running_session(format);
        while session.phase() != VetoPhase::Complete {
            let (by, kind, value) = valid_choice(&session, Side::Defender);
            let other = if by == A { B } else { A };
            for intruder in [other, OUTSIDER] {
                let before = session.clone();
                let err = apply(&mut session, intruder, kind, &value, t0()).unwrap_err();
                assert!(err.is_validation(&ValidationKind::NotYourTurn));
                assert_eq!(session.veto_step, before.veto_step);
                assert_eq!(session.map_pool, before.map_pool);
                assert_eq!(session.picks, before.picks);
            }
            apply(&mut session, &by, kind, &value, t0()).unwrap();
        }
    }
}

#[test]
fn banned_map_cannot_be_banned_again() {
    let mut session = running_session(MatchFormat::Bo1);
    apply(&mut session, A, ChoiceKind::BanMap, "Lotus", t0()).unwrap();

    let err = apply(&mut session, B, ChoiceKind::BanMap, "Lotus", t0()).unwrap_err();
    assert!(err.is_validation(&ValidationKind::InvalidMap));
    assert_eq!(session.veto_step, 1);
    assert_eq!(session.map_pool.len(), 6);
}

#[test]
fn picked_map_cannot_be_picked_again() {
    let mut session = running_session(MatchFormat::Bo3);
    apply(&mut session, A, ChoiceKind::BanMap, "Pearl", t0()).unwrap();
    apply(&mut session, B, ChoiceKind::BanMap, "Split", t0()).unwrap();
    apply(&mut session, A, ChoiceKind::PickMap, "Haven", t0()).unwrap();
    apply(&mut session, B, ChoiceKind::PickSide, "Attacker", t0()).unwrap();

    let err = apply(&mut session, B, ChoiceKind::PickMap, "Haven", t0()).unwrap_err();
    assert!(err.is_validation(&ValidationKind::InvalidMap));
    assert_eq!(session.picks.len(), 1);
}

#[test]
fn invalid_side_is_rejected_without_materializing_the_decider() {
    let mut session = running_session(MatchFormat::Bo1);
    for (i, map) in ["Ascent", "Icebox", "Sunset", "Haven", "Lotus", "Pearl"]
        .iter()
        .enumerate()
    {
        let by = if i % 2 == 0 { A } else { B };
        apply(&mut session, by, ChoiceKind::BanMap, map, t0()).unwrap();
    }

    let err = apply(&mut session, A, ChoiceKind::PickSide, "Spectator", t0()).unwrap_err();
    assert!(err.is_validation(&ValidationKind::InvalidSide));
    assert!(session.picks.is_empty(), "decider must not be appended on rejection");
    assert_eq!(session.veto_step, 6);
}

#[test]
fn stale_prompt_kind_is_a_step_mismatch() {
    let mut session = running_session(MatchFormat::Bo3);
    let err = apply(&mut session, A, ChoiceKind::PickMap, "Ascent", t0()).unwrap_err();
    assert!(err.is_validation(&ValidationKind::StepMismatch));
    assert_eq!(session.map_pool.len(), 7);
    assert!(session.picks.is_empty());
}

#[test]
fn turn_is_checked_before_step_kind_and_value() {
    let mut session = running_session(MatchFormat::Bo3);
    let err = apply(&mut session, B, ChoiceKind::PickSide, "nonsense", t0()).unwrap_err();
    assert!(err.is_validation(&ValidationKind::NotYourTurn));
}

#[test]
fn accepted_actions_touch_last_activity_rejections_do_not() {
    let mut session = running_session(MatchFormat::Bo1);
    let later = t0() + Duration::minutes(5);

    let _ = apply(&mut session, B, ChoiceKind::BanMap, "Ascent", later);
    assert_eq!(session.last_activity, t0());

    apply(&mut session, A, ChoiceKind::BanMap, "Ascent", later).unwrap();
    assert_eq!(session.last_activity, later);
    assert_eq!(session.created_at, t0());
}

#[test]
fn applying_after_completion_is_rejected() {
    let mut session = running_session(MatchFormat::Bo1);
    play_out(&mut session, Side::Defender);
    let err = apply(&mut session, A, ChoiceKind::PickSide, "Attacker", t0()).unwrap_err();
    assert!(err.is_validation(&ValidationKind::PhaseMismatch));
}

#[test]
fn broken_side_target_surfaces_as_internal_error() {
    let mut session = running_session(MatchFormat::Bo3);
    // Corrupt the sequence: a side step for map 1 while nothing has been picked.
    session.veto_sequence[0].kind = StepKind::PickSide { map_index: 1 };

    let err = apply(&mut session, A, ChoiceKind::PickSide, "Attacker", t0()).unwrap_err();
    assert!(matches!(err, DomainError::Internal(_)));
    assert!(session.picks.is_empty());
    assert_eq!(session.veto_step, 0);
}

#[test]
fn side_prompt_offers_defender_then_attacker() {
    let mut session = running_session(MatchFormat::Bo3);
    apply(&mut session, A, ChoiceKind::BanMap, "Pearl", t0()).unwrap();
    apply(&mut session, B, ChoiceKind::BanMap, "Split", t0()).unwrap();
    let progress = apply(&mut session, A, ChoiceKind::PickMap, "Haven", t0()).unwrap();
    let VetoProgress::Continue { next, .. } = progress else {
        panic!("expected continue");
    };
    assert_eq!(next.for_actor, B);
    assert_eq!(next.subject_map.as_deref(), Some("Haven"));
    assert_eq!(next.options, vec!["Defender".to_string(), "Attacker".to_string()]);
}
