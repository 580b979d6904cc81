//! Final veto summary, announced once the last step is applied.

use std::fmt::Write as _;

use serde::Serialize;

use crate::domain::catalogue::{MatchFormat, Side};
use crate::domain::state::Session;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct MapLine {
    /// 1-based play order.
    pub number: usize,
    pub map: String,
    pub team_a_side: Option<Side>,
    pub team_b_side: Option<Side>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct VetoSummary {
    pub match_type: MatchFormat,
    pub team_a_label: String,
    pub team_b_label: String,
    pub maps: Vec<MapLine>,
}

impl VetoSummary {
    pub fn from_session(session: &Session) -> Result<Self, DomainError> {
        let match_type = session.match_type.ok_or_else(|| {
            DomainError::internal(format!(
                "Invariant violated: summary requested before a format was chosen (channel {})",
                session.channel_id
            ))
        })?;

        let maps = session
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

        Ok(Self {
            match_type,
            team_a_label: session.team_a.label.clone(),
            team_b_label: session.team_b.label.clone(),
            maps,
        })
    }

    /// Announcement text, one line per map.
    pub fn render(&self) -> String {
        let mut out = format!("📋 Veto complete for **{}**\n\n", self.match_type);
        for line in &self.maps {
            let _ = writeln!(
                out,
                "**Map {}: {}** — **{}** ({}), **{}** ({})",
                line.number,
                line.map,
                self.team_a_label,
                side_or_unpicked(line.team_a_side),
                self.team_b_label,
                side_or_unpicked(line.team_b_side),
            );
        }
        out
    }
}

fn side_or_unpicked(side: Option<Side>) -> &'static str {
    side.map(Side::as_str).unwrap_or("Unpicked")
}
