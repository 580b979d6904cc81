//! Veto state machine: format selection and step application.
//!
//! Every operation validates completely before touching the session, so a
//! rejected action leaves it exactly as it was. No I/O happens here; callers
//! turn the returned prompts and effects into platform messages.

use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, error};

use crate::domain::catalogue::{full_map_pool, MatchFormat, Side};
use crate::domain::sequence::generate;
use crate::domain::state::{
    ActorId, ChoiceKind, MapResult, Session, SideAssignment, StepKind, VetoPhase,
};
use crate::domain::summary::VetoSummary;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    CoinflipSide,
    MatchFormat,
    BanMap,
    PickMap,
    PickSide,
}

impl From<ChoiceKind> for PromptKind {
    fn from(kind: ChoiceKind) -> Self {
        match kind {
            ChoiceKind::BanMap => PromptKind::BanMap,
            ChoiceKind::PickMap => PromptKind::PickMap,
            ChoiceKind::PickSide => PromptKind::PickSide,
        }
    }
}

/// Request for the adapter to ask one actor to choose among `options`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PromptRequest {
    pub for_actor: ActorId,
    pub kind: PromptKind,
    /// Map the side choice applies to (side prompts only).
    pub subject_map: Option<String>,
    pub options: Vec<String>,
}

/// What an accepted step did.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum VetoEffect {
    Banned {
        by: ActorId,
        map: String,
    },
    Picked {
        by: ActorId,
        map: String,
        /// 1-based position in `picks`.
        map_number: usize,
    },
    SidePicked {
        by: ActorId,
        map: String,
        side: Side,
    },
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum VetoProgress {
    Continue {
        effect: VetoEffect,
        next: PromptRequest,
    },
    /// The caller must remove the session from the store.
    Complete {
        effect: VetoEffect,
        summary: VetoSummary,
    },
}

/// Prompt for the coinflip winner to choose a format.
pub fn format_prompt(session: &Session) -> PromptRequest {
    PromptRequest {
        for_actor: session.team_a.id.clone(),
        kind: PromptKind::MatchFormat,
        subject_map: None,
        options: MatchFormat::ALL
            .iter()
            .map(|f| f.as_str().to_string())
            .collect(),
    }
}

/// Phase and turn checks for a format choice, without the value.
pub fn ensure_format_choice_allowed(session: &Session, actor_id: &str) -> Result<(), DomainError> {
    if session.phase() != VetoPhase::AwaitingFormatChoice {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            "The match format has already been chosen",
        ));
    }
    if actor_id != session.team_a.id {
        return Err(DomainError::not_your_turn(
            "Only the coinflip winner can pick the match format",
        ));
    }
    Ok(())
}

/// Fix the match format and start the veto. Only the coinflip winner may do
/// this, and only once.
pub fn choose_format(
    session: &mut Session,
    actor_id: &str,
    format: MatchFormat,
    now: OffsetDateTime,
) -> Result<PromptRequest, DomainError> {
    ensure_format_choice_allowed(session, actor_id)?;

    session.veto_sequence = generate(format, &session.team_a.id, &session.team_b.id);
    session.match_type = Some(format);
    session.map_pool = full_map_pool();
    session.picks.clear();
    session.veto_step = 0;
    session.touch(now);

    debug!(
        channel_id = %session.channel_id,
        match_type = %format,
        steps = session.veto_sequence.len(),
        "Veto sequence generated"
    );

    next_prompt(session)
}

/// Prompt for the step the cursor points at.
pub fn next_prompt(session: &Session) -> Result<PromptRequest, DomainError> {
    let step = session.current_step().ok_or_else(|| {
        DomainError::validation(ValidationKind::PhaseMismatch, "No veto step is awaiting input")
    })?;

    let prompt = match step.kind {
        StepKind::Ban | StepKind::PickMap => PromptRequest {
            for_actor: step.by.clone(),
            kind: step.kind.choice_kind().into(),
            subject_map: None,
            options: session.map_pool.clone(),
        },
        StepKind::PickSide { map_index } => {
            let map = session.side_pick_target(map_index).ok_or_else(|| {
                missing_side_target(session, map_index)
            })?;
            PromptRequest {
                for_actor: step.by.clone(),
                kind: PromptKind::PickSide,
                subject_map: Some(map.to_string()),
                options: Side::OPTIONS.iter().map(|s| s.as_str().to_string()).collect(),
            }
        }
    };
    Ok(prompt)
}

/// Apply one veto choice from `actor_id`.
///
/// Check order: phase, turn, submitted step kind, value.
pub fn apply(
    session: &mut Session,
    actor_id: &str,
    submitted: ChoiceKind,
    value: &str,
    now: OffsetDateTime,
) -> Result<VetoProgress, DomainError> {
    let step = match session.phase() {
        VetoPhase::AwaitingFormatChoice => {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "The match format has not been chosen yet",
            ))
        }
        VetoPhase::Complete => {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "The veto is already complete",
            ))
        }
        VetoPhase::Running { step } => session.veto_sequence[step].clone(),
    };

    if actor_id != step.by {
        return Err(DomainError::not_your_turn("It's not your turn!"));
    }

    let expected = step.kind.choice_kind();
    if submitted != expected {
        return Err(DomainError::validation(
            ValidationKind::StepMismatch,
            format!(
                "This prompt is stale: expected {}, got {}",
                expected.as_str(),
                submitted.as_str()
            ),
        ));
    }

    let effect = match step.kind {
        StepKind::Ban => {
            let idx = pool_position(session, value)?;
            let map = session.map_pool.remove(idx);
            VetoEffect::Banned {
                by: step.by.clone(),
                map,
            }
        }
        StepKind::PickMap => {
            let idx = pool_position(session, value)?;
            let map = session.map_pool.remove(idx);
            session.picks.push(MapResult::unsided(map.clone()));
            VetoEffect::Picked {
                by: step.by.clone(),
                map,
                map_number: session.picks.len(),
            }
        }
        StepKind::PickSide { map_index } => {
            let side: Side = value.parse()?;
            if session.picks.get(map_index).is_none() {
                materialize_final_map(session, map_index)?;
            }
            let assignment = if actor_id == session.team_a.id {
                SideAssignment::team_a_takes(side)
            } else {
                SideAssignment::team_b_takes(side)
            };
            let target = &mut session.picks[map_index];
            target.sides = Some(assignment);
            VetoEffect::SidePicked {
                by: step.by.clone(),
                map: target.map.clone(),
                side,
            }
        }
    };

    session.veto_step += 1;
    session.touch(now);

    if session.phase() == VetoPhase::Complete {
        let summary = VetoSummary::from_session(session)?;
        return Ok(VetoProgress::Complete { effect, summary });
    }

    let next = next_prompt(session)?;
    Ok(VetoProgress::Continue { effect, next })
}

fn pool_position(session: &Session, value: &str) -> Result<usize, DomainError> {
    session
        .map_pool
        .iter()
        .position(|m| m == value)
        .ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidMap,
                format!("{value} is not in the remaining map pool"),
            )
        })
}

/// Append the sole surviving map to `picks`; the decider is never picked
/// explicitly.
fn materialize_final_map(session: &mut Session, map_index: usize) -> Result<(), DomainError> {
    if map_index != session.picks.len() || session.map_pool.len() != 1 {
        return Err(missing_side_target(session, map_index));
    }
    let map = session.map_pool[0].clone();
    debug!(channel_id = %session.channel_id, map = %map, "Decider map materialized");
    session.picks.push(MapResult::unsided(map));
    Ok(())
}

fn missing_side_target(session: &Session, map_index: usize) -> DomainError {
    error!(
        channel_id = %session.channel_id,
        map_index,
        picks = session.picks.len(),
        pool = session.map_pool.len(),
        "Side step references a map that does not exist"
    );
    DomainError::internal(format!(
        "Invariant violated: no map at picks[{map_index}] and {} maps remain in pool",
        session.map_pool.len()
    ))
}
