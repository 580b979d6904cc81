//! Open Heads/Tails challenges, keyed by channel.
//!
//! A challenge exists between `/coinflip` and the initiator's call; the
//! session itself is only created once the coin is resolved.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use time::{Duration, OffsetDateTime};

use crate::domain::state::{ActorId, ChannelId};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PendingCoinflip {
    pub initiator: ActorId,
    pub opponent: ActorId,
    pub initiator_label: Option<String>,
    pub opponent_label: Option<String>,
    pub opened_at: OffsetDateTime,
}

/// Outcome of [`PendingCoinflips::take_if`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Claim {
    Taken(PendingCoinflip),
    /// A challenge exists but the predicate rejected it; it is left in place.
    Refused,
    Missing,
}

#[derive(Debug, Default)]
pub struct PendingCoinflips {
    pending: DashMap<ChannelId, PendingCoinflip>,
}

impl PendingCoinflips {
    pub fn new() -> Self {
        Self {
            pending: DashMap::new(),
        }
    }

    /// Open a challenge, replacing any earlier one in the channel.
    pub fn open(&self, channel_id: &str, challenge: PendingCoinflip) -> Option<PendingCoinflip> {
        self.pending.insert(channel_id.to_string(), challenge)
    }

    pub fn get(&self, channel_id: &str) -> Option<PendingCoinflip> {
        self.pending.get(channel_id).map(|p| p.value().clone())
    }

    /// Remove and return the channel's challenge.
    pub fn take(&self, channel_id: &str) -> Option<PendingCoinflip> {
        self.pending.remove(channel_id).map(|(_, p)| p)
    }

    /// Remove the channel's challenge only if `accept` holds for it.
    ///
    /// The check and the removal happen under one shard lock, so a challenge
    /// re-opened concurrently is never consumed on behalf of the old one.
    pub fn take_if(
        &self,
        channel_id: &str,
        accept: impl FnOnce(&PendingCoinflip) -> bool,
    ) -> Claim {
        match self.pending.entry(channel_id.to_string()) {
            Entry::Vacant(_) => Claim::Missing,
            Entry::Occupied(entry) => {
                if accept(entry.get()) {
                    Claim::Taken(entry.remove())
                } else {
                    Claim::Refused
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn sweep_at(&self, now: OffsetDateTime, max_age: Duration) -> usize {
        let mut removed = 0;
        self.pending.retain(|_, challenge| {
            let keep = now - challenge.opened_at <= max_age;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }
}
