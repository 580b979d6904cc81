//! Veto command service: turns inbound actions into engine calls and the
//! resulting engine output into outbound messages.
//!
//! All session mutation happens under the channel's store lock, so two
//! actions against the same channel never interleave. A completed session is
//! removed under that same lock.

use std::sync::Arc;

use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::domain::catalogue::{CoinFace, MatchFormat};
use crate::domain::coinflip::{resolve, CoinSource, CoinflipOutcome, CoinflipWinner};
use crate::domain::state::{
    ActorId, ChannelId, ChoiceKind, Session, TeamSlot, VetoPhase, DEFAULT_TEAM_A_LABEL,
    DEFAULT_TEAM_B_LABEL,
};
use crate::domain::summary::MapLine;
use crate::domain::veto::{self, PromptKind, PromptRequest, VetoEffect, VetoProgress};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::store::{Claim, PendingCoinflip, PendingCoinflips, SessionSeed, SessionStore};

/// Inbound `/coinflip` request.
#[derive(Debug, Clone)]
pub struct StartCoinflip {
    pub initiator: ActorId,
    pub opponent: Option<ActorId>,
    pub initiator_label: Option<String>,
    pub opponent_label: Option<String>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct ChoiceOption {
    pub label: String,
    pub value: String,
}

/// Message for the platform adapter to deliver.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outbound {
    /// Ask `for_actor` to choose one of `options`.
    PromptChoice {
        channel_id: ChannelId,
        for_actor: ActorId,
        kind: PromptKind,
        label: String,
        options: Vec<ChoiceOption>,
    },
    Announce {
        channel_id: ChannelId,
        text: String,
    },
}

impl Outbound {
    fn announce(channel_id: &str, text: impl Into<String>) -> Self {
        Outbound::Announce {
            channel_id: channel_id.to_string(),
            text: text.into(),
        }
    }
}

/// Read-only snapshot of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub channel_id: ChannelId,
    pub team_a: TeamSlot,
    pub team_b: TeamSlot,
    pub match_type: Option<MatchFormat>,
    pub phase: &'static str,
    pub map_pool: Vec<String>,
    pub picks: Vec<MapLine>,
    pub veto_step: usize,
    pub total_steps: usize,
    pub awaiting: Option<AwaitingStep>,
    pub created_at: String,
    pub last_activity: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AwaitingStep {
    pub actor: ActorId,
    pub kind: ChoiceKind,
}

impl SessionView {
    fn of(session: &Session) -> Self {
        let phase = match session.phase() {
            VetoPhase::AwaitingFormatChoice => "awaiting_format_choice",
            VetoPhase::Running { .. } => "running",
            VetoPhase::Complete => "complete",
        };
        let picks = session
            .picks
            .iter()
            .enumerate()
            .map(|(i, pick)| MapLine {
                number: i + 1,
                map: pick.map.clone(),
                team_a_side: pick.sides.map(|s| s.team_a()),
                team_b_side: pick.sides.map(|s| s.team_b()),
            })
            .collect();
        Self {
            channel_id: session.channel_id.clone(),
            team_a: session.team_a.clone(),
            team_b: session.team_b.clone(),
            match_type: session.match_type,
            phase,
            map_pool: session.map_pool.clone(),
            picks,
            veto_step: session.veto_step,
            total_steps: session.veto_sequence.len(),
            awaiting: session.current_step().map(|step| AwaitingStep {
                actor: step.by.clone(),
                kind: step.kind.choice_kind(),
            }),
            created_at: rfc3339(session.created_at),
            last_activity: rfc3339(session.last_activity),
        }
    }
}

fn rfc3339(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_else(|_| "unknown".to_string())
}

fn mention(actor_id: &str) -> String {
    format!("<@{actor_id}>")
}

/// Veto service holding explicit handles to the registries and the coin.
#[derive(Clone)]
pub struct VetoService {
    sessions: Arc<SessionStore>,
    pending: Arc<PendingCoinflips>,
    coin: Arc<dyn CoinSource>,
}

impl VetoService {
    pub fn new(
        sessions: Arc<SessionStore>,
        pending: Arc<PendingCoinflips>,
        coin: Arc<dyn CoinSource>,
    ) -> Self {
        Self {
            sessions,
            pending,
            coin,
        }
    }

    /// Open a Heads/Tails challenge between the initiator and an opponent.
    pub fn start_coinflip(
        &self,
        channel_id: &str,
        request: StartCoinflip,
    ) -> Result<Vec<Outbound>, DomainError> {
        if self.sessions.exists(channel_id) {
            return Err(DomainError::session_already_active(channel_id));
        }

        let opponent = request
            .opponent
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty() && *o != request.initiator)
            .ok_or_else(|| {
                DomainError::validation(ValidationKind::InvalidOpponent, "Invalid opponent.")
            })?;

        let challenge = PendingCoinflip {
            initiator: request.initiator.clone(),
            opponent: opponent.clone(),
            initiator_label: request.initiator_label,
            opponent_label: request.opponent_label,
            opened_at: OffsetDateTime::now_utc(),
        };
        if let Some(replaced) = self.pending.open(channel_id, challenge) {
            debug!(
                channel_id,
                replaced_initiator = %replaced.initiator,
                "Pending coinflip replaced"
            );
        }

        info!(channel_id, initiator = %request.initiator, opponent = %opponent, "Coinflip opened");

        Ok(vec![Outbound::PromptChoice {
            channel_id: channel_id.to_string(),
            for_actor: request.initiator.clone(),
            kind: PromptKind::CoinflipSide,
            label: format!(
                "{}, choose **Heads** or **Tails**. {} will get the other.",
                mention(&request.initiator),
                mention(&opponent)
            ),
            options: CoinFace::OPTIONS
                .iter()
                .map(|face| ChoiceOption {
                    label: face.as_str().to_string(),
                    value: face.as_str().to_string(),
                })
                .collect(),
        }])
    }

    /// Resolve the open challenge with the initiator's call and create the
    /// session with the winner as team A.
    pub fn choose_coinflip_side(
        &self,
        channel_id: &str,
        actor_id: &str,
        face: &str,
    ) -> Result<Vec<Outbound>, DomainError> {
        let challenge = self.pending.get(channel_id).ok_or_else(|| no_pending(channel_id))?;
        if actor_id != challenge.initiator {
            return Err(not_initiator());
        }
        let called: CoinFace = face.parse()?;

        if self.sessions.exists(channel_id) {
            return Err(DomainError::session_already_active(channel_id));
        }
        // The snapshot above may be stale if `/coinflip` re-opened the
        // challenge; only consume it if it is still this actor's.
        let challenge = match self.pending.take_if(channel_id, |c| c.initiator == actor_id) {
            Claim::Taken(challenge) => challenge,
            Claim::Refused => return Err(not_initiator()),
            Claim::Missing => return Err(no_pending(channel_id)),
        };

        let outcome = resolve(called, self.coin.as_ref());
        let seed = seed_from(&challenge, outcome.winner);
        let now = OffsetDateTime::now_utc();
        let session = self
            .sessions
            .try_create_at(channel_id, seed, now)
            .ok_or_else(|| DomainError::session_already_active(channel_id))?;

        info!(
            channel_id,
            landed_on = %outcome.landed_on,
            winner = %session.team_a.id,
            "Coinflip resolved; session created"
        );

        Ok(vec![
            Outbound::announce(channel_id, coinflip_text(&challenge, &outcome, &session)),
            prompt_message(channel_id, veto::format_prompt(&session)),
        ])
    }

    /// Fix the match format; only the coinflip winner, only once.
    pub fn choose_match_format(
        &self,
        channel_id: &str,
        actor_id: &str,
        format: &str,
    ) -> Result<Vec<Outbound>, DomainError> {
        self.sessions
            .with_session_mut(channel_id, |session| -> Result<Vec<Outbound>, DomainError> {
                veto::ensure_format_choice_allowed(session, actor_id)?;
                let format: MatchFormat = format.parse()?;
                let prompt = veto::choose_format(session, actor_id, format, OffsetDateTime::now_utc())?;

                info!(channel_id, match_type = %format, "Veto started");

                Ok(vec![
                    Outbound::announce(
                        channel_id,
                        format!("✅ Match format selected: **{format}**"),
                    ),
                    Outbound::announce(
                        channel_id,
                        format!(
                            "🗺️ Veto **{format}** started between **{}** and **{}**!",
                            session.team_a.label, session.team_b.label
                        ),
                    ),
                    prompt_message(channel_id, prompt),
                ])
            })
            .unwrap_or_else(|| Err(DomainError::no_active_session(channel_id)))
    }

    /// Apply one ban, map pick or side pick. A completed veto is announced
    /// and its session removed.
    pub fn submit_veto_choice(
        &self,
        channel_id: &str,
        actor_id: &str,
        kind: ChoiceKind,
        value: &str,
    ) -> Result<Vec<Outbound>, DomainError> {
        let (result, retired) = self
            .sessions
            .with_session_mut_retiring(channel_id, |session| -> Result<_, DomainError> {
                let progress = veto::apply(session, actor_id, kind, value, OffsetDateTime::now_utc())?;
                Ok(match progress {
                    VetoProgress::Continue { effect, next } => vec![
                        Outbound::announce(channel_id, effect_text(&effect)),
                        prompt_message(channel_id, next),
                    ],
                    VetoProgress::Complete { effect, summary } => vec![
                        Outbound::announce(channel_id, effect_text(&effect)),
                        Outbound::announce(channel_id, summary.render()),
                    ],
                })
            })
            .ok_or_else(|| DomainError::no_active_session(channel_id))?;

        if retired {
            info!(channel_id, "Veto complete; session removed");
        }
        result
    }

    /// Administrative end of the channel's session and any open challenge.
    pub fn force_end(&self, channel_id: &str) -> Result<Vec<Outbound>, DomainError> {
        let had_session = self.sessions.remove(channel_id);
        let had_challenge = self.pending.take(channel_id).is_some();
        if !had_session && !had_challenge {
            return Err(DomainError::no_active_session(channel_id));
        }
        info!(channel_id, had_session, had_challenge, "Veto session ended");
        Ok(vec![Outbound::announce(
            channel_id,
            "✅ The veto session has been ended.",
        )])
    }

    pub fn session_view(&self, channel_id: &str) -> Result<SessionView, DomainError> {
        self.sessions
            .get(channel_id)
            .map(|session| SessionView::of(&session))
            .ok_or_else(|| DomainError::no_active_session(channel_id))
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }
}

fn not_initiator() -> DomainError {
    DomainError::not_your_turn(
        "Only the person who initiated the coinflip can choose Heads or Tails.",
    )
}

fn no_pending(channel_id: &str) -> DomainError {
    DomainError::not_found(
        NotFoundKind::PendingCoinflip,
        format!("There is no pending coinflip in channel {channel_id}"),
    )
}

/// Winner becomes team A; labels travel with their owners, fallbacks by slot.
fn seed_from(challenge: &PendingCoinflip, winner: CoinflipWinner) -> SessionSeed {
    let initiator = (&challenge.initiator, challenge.initiator_label.clone());
    let opponent = (&challenge.opponent, challenge.opponent_label.clone());
    let ((a_id, a_label), (b_id, b_label)) = match winner {
        CoinflipWinner::Initiator => (initiator, opponent),
        CoinflipWinner::Opponent => (opponent, initiator),
    };
    SessionSeed {
        team_a: TeamSlot::new(a_id.clone(), a_label, DEFAULT_TEAM_A_LABEL),
        team_b: TeamSlot::new(b_id.clone(), b_label, DEFAULT_TEAM_B_LABEL),
    }
}

fn coinflip_text(challenge: &PendingCoinflip, outcome: &CoinflipOutcome, session: &Session) -> String {
    format!(
        "🪙 {} chose **{}**\n{} gets **{}**\n**Coin landed on {}!** 🎉\n➡️ {}, please select a match format.",
        mention(&challenge.initiator),
        outcome.initiator_side,
        mention(&challenge.opponent),
        outcome.opponent_side,
        outcome.landed_on,
        mention(&session.team_a.id),
    )
}

fn effect_text(effect: &VetoEffect) -> String {
    match effect {
        VetoEffect::Banned { by, map } => format!("🚫 {} banned **{map}**", mention(by)),
        VetoEffect::Picked {
            by,
            map,
            map_number,
        } => format!("✅ {} picked **{map}** as Map {map_number}", mention(by)),
        VetoEffect::SidePicked { by, map, side } => {
            format!("🧭 {} picked **{side}** side for **{map}**.", mention(by))
        }
    }
}

fn prompt_message(channel_id: &str, prompt: PromptRequest) -> Outbound {
    let who = mention(&prompt.for_actor);
    let (label, options) = match prompt.kind {
        PromptKind::MatchFormat => (
            format!("{who}, choose the match format for the veto:"),
            MatchFormat::ALL
                .iter()
                .map(|f| ChoiceOption {
                    label: f.label().to_string(),
                    value: f.as_str().to_string(),
                })
                .collect(),
        ),
        PromptKind::BanMap => (format!("{who}, ban a map."), plain_options(prompt.options)),
        PromptKind::PickMap => (format!("{who}, pick a map."), plain_options(prompt.options)),
        PromptKind::PickSide => (
            format!(
                "{who}, pick a side for **{}**.",
                prompt.subject_map.as_deref().unwrap_or("the decider")
            ),
            plain_options(prompt.options),
        ),
        PromptKind::CoinflipSide => (
            format!("{who}, choose **Heads** or **Tails**."),
            plain_options(prompt.options),
        ),
    };
    debug!(
        channel_id,
        for_actor = %prompt.for_actor,
        kind = ?prompt.kind,
        "Prompt issued"
    );
    Outbound::PromptChoice {
        channel_id: channel_id.to_string(),
        for_actor: prompt.for_actor,
        kind: prompt.kind,
        label,
        options,
    }
}

fn plain_options(values: Vec<String>) -> Vec<ChoiceOption> {
    values
        .into_iter()
        .map(|v| ChoiceOption {
            label: v.clone(),
            value: v,
        })
        .collect()
}
