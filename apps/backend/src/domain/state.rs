use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::catalogue::{full_map_pool, MatchFormat, Side};

/// Opaque platform channel identifier; the session key.
pub type ChannelId = String;
/// Opaque platform user identifier.
pub type ActorId = String;

pub const DEFAULT_TEAM_A_LABEL: &str = "Team A";
pub const DEFAULT_TEAM_B_LABEL: &str = "Team B";

/// Lifecycle of a session, derived from `match_type` and the step cursor.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum VetoPhase {
    /// Coinflip resolved; the winner has not chosen a format yet.
    AwaitingFormatChoice,
    /// Veto in progress; `step` indexes `veto_sequence`.
    Running { step: usize },
    /// Every step applied; the session is ready to be summarized and removed.
    Complete,
}

/// What a step asks its actor to do.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum StepKind {
    Ban,
    PickMap,
    /// Choose a side for `picks[map_index]`.
    PickSide { map_index: usize },
}

impl StepKind {
    pub fn choice_kind(self) -> ChoiceKind {
        match self {
            StepKind::Ban => ChoiceKind::BanMap,
            StepKind::PickMap => ChoiceKind::PickMap,
            StepKind::PickSide { .. } => ChoiceKind::PickSide,
        }
    }
}

/// Step kind as named by the prompt the actor answered.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceKind {
    BanMap,
    PickMap,
    PickSide,
}

impl ChoiceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ChoiceKind::BanMap => "ban_map",
            ChoiceKind::PickMap => "pick_map",
            ChoiceKind::PickSide => "pick_side",
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Step {
    pub by: ActorId,
    pub kind: StepKind,
}

impl Step {
    pub fn ban(by: &str) -> Self {
        Self {
            by: by.to_string(),
            kind: StepKind::Ban,
        }
    }

    pub fn pick_map(by: &str) -> Self {
        Self {
            by: by.to_string(),
            kind: StepKind::PickMap,
        }
    }

    pub fn pick_side(by: &str, map_index: usize) -> Self {
        Self {
            by: by.to_string(),
            kind: StepKind::PickSide { map_index },
        }
    }
}

/// Starting sides of both teams on one map. Always complementary.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct SideAssignment {
    team_a: Side,
    team_b: Side,
}

impl SideAssignment {
    /// Team A takes `side`, team B the opposite.
    pub fn team_a_takes(side: Side) -> Self {
        Self {
            team_a: side,
            team_b: side.opposite(),
        }
    }

    /// Team B takes `side`, team A the opposite.
    pub fn team_b_takes(side: Side) -> Self {
        Self {
            team_a: side.opposite(),
            team_b: side,
        }
    }

    pub fn team_a(&self) -> Side {
        self.team_a
    }

    pub fn team_b(&self) -> Side {
        self.team_b
    }
}

/// A map that will be played, with sides once chosen.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MapResult {
    pub map: String,
    pub sides: Option<SideAssignment>,
}

impl MapResult {
    pub fn unsided(map: impl Into<String>) -> Self {
        Self {
            map: map.into(),
            sides: None,
        }
    }
}

/// One participant: identifier plus the display label resolved at coinflip time.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct TeamSlot {
    pub id: ActorId,
    pub label: String,
}

impl TeamSlot {
    pub fn new(id: impl Into<ActorId>, label: Option<String>, fallback: &str) -> Self {
        let label = label
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        Self {
            id: id.into(),
            label,
        }
    }
}

/// Per-channel veto session.
///
/// `team_a` is always the coinflip winner, who chooses the format.
#[derive(Debug, Clone)]
pub struct Session {
    pub channel_id: ChannelId,
    pub team_a: TeamSlot,
    pub team_b: TeamSlot,
    /// `None` until the format is chosen.
    pub match_type: Option<MatchFormat>,
    /// Remaining maps in catalogue order. Only shrinks.
    pub map_pool: Vec<String>,
    /// Generated once at format selection; read-only afterwards.
    pub veto_sequence: Vec<Step>,
    /// Cursor into `veto_sequence`; equal to its length once complete.
    pub veto_step: usize,
    pub picks: Vec<MapResult>,
    pub created_at: OffsetDateTime,
    pub last_activity: OffsetDateTime,
}

impl Session {
    pub fn new(
        channel_id: impl Into<ChannelId>,
        team_a: TeamSlot,
        team_b: TeamSlot,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            channel_id: channel_id.into(),
            team_a,
            team_b,
            match_type: None,
            map_pool: full_map_pool(),
            veto_sequence: Vec::new(),
            veto_step: 0,
            picks: Vec::new(),
            created_at: now,
            last_activity: now,
        }
    }

    pub fn phase(&self) -> VetoPhase {
        match self.match_type {
            None => VetoPhase::AwaitingFormatChoice,
            Some(_) if self.veto_step >= self.veto_sequence.len() => VetoPhase::Complete,
            Some(_) => VetoPhase::Running {
                step: self.veto_step,
            },
        }
    }

    /// Step awaiting input, if the veto is running.
    pub fn current_step(&self) -> Option<&Step> {
        match self.phase() {
            VetoPhase::Running { step } => self.veto_sequence.get(step),
            _ => None,
        }
    }

    pub fn touch(&mut self, now: OffsetDateTime) {
        self.last_activity = now;
    }

    /// Name of the map `picks[map_index]` refers to, or the sole survivor
    /// that will be materialized there when its side step runs.
    pub fn side_pick_target(&self, map_index: usize) -> Option<&str> {
        match self.picks.get(map_index) {
            Some(result) => Some(result.map.as_str()),
            None if map_index == self.picks.len() && self.map_pool.len() == 1 => {
                self.map_pool.first().map(String::as_str)
            }
            None => None,
        }
    }
}
