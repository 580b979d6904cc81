//! Channel-keyed registry of live veto sessions.
//!
//! `create` overwrites unconditionally; the command layer checks `exists`
//! first. Mutation goes through `with_session_mut`, which holds the channel's
//! shard lock for the duration of the closure, so actions against one
//! channel are applied one at a time. Closures must not block or await.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use time::{Duration, OffsetDateTime};

use crate::domain::state::{ChannelId, Session, TeamSlot, VetoPhase};

/// Fields fixed at coinflip resolution.
#[derive(Debug, Clone)]
pub struct SessionSeed {
    /// Coinflip winner.
    pub team_a: TeamSlot,
    pub team_b: TeamSlot,
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<ChannelId, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn create(&self, channel_id: &str, seed: SessionSeed) -> Session {
        self.create_at(channel_id, seed, OffsetDateTime::now_utc())
    }

    pub fn create_at(&self, channel_id: &str, seed: SessionSeed, now: OffsetDateTime) -> Session {
        let session = Session::new(channel_id, seed.team_a, seed.team_b, now);
        self.sessions.insert(channel_id.to_string(), session.clone());
        session
    }

    /// Create only if the channel has no session; `None` when one exists.
    pub fn try_create_at(
        &self,
        channel_id: &str,
        seed: SessionSeed,
        now: OffsetDateTime,
    ) -> Option<Session> {
        match self.sessions.entry(channel_id.to_string()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                let session = Session::new(channel_id, seed.team_a, seed.team_b, now);
                Some(slot.insert(session).value().clone())
            }
        }
    }

    /// Snapshot of the channel's session.
    pub fn get(&self, channel_id: &str) -> Option<Session> {
        self.sessions.get(channel_id).map(|s| s.value().clone())
    }

    /// Run `f` against the live session under the channel lock.
    pub fn with_session_mut<R>(
        &self,
        channel_id: &str,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Option<R> {
        self.sessions
            .get_mut(channel_id)
            .map(|mut entry| f(entry.value_mut()))
    }

    /// Like [`Self::with_session_mut`], but once `f` leaves the session
    /// complete the entry is removed before the lock is released. Returns the
    /// closure's result and whether the session was retired.
    pub fn with_session_mut_retiring<R>(
        &self,
        channel_id: &str,
        f: impl FnOnce(&mut Session) -> R,
    ) -> Option<(R, bool)> {
        match self.sessions.entry(channel_id.to_string()) {
            Entry::Vacant(_) => None,
            Entry::Occupied(mut entry) => {
                let out = f(entry.get_mut());
                let complete = entry.get().phase() == VetoPhase::Complete;
                if complete {
                    entry.remove();
                }
                Some((out, complete))
            }
        }
    }

    pub fn touch(&self, channel_id: &str) -> bool {
        self.with_session_mut(channel_id, |s| s.touch(OffsetDateTime::now_utc()))
            .is_some()
    }

    pub fn exists(&self, channel_id: &str) -> bool {
        self.sessions.contains_key(channel_id)
    }

    pub fn remove(&self, channel_id: &str) -> bool {
        self.sessions.remove(channel_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop every session idle for longer than `max_age`; returns how many.
    pub fn sweep(&self, max_age: Duration) -> usize {
        self.sweep_at(OffsetDateTime::now_utc(), max_age)
    }

    pub fn sweep_at(&self, now: OffsetDateTime, max_age: Duration) -> usize {
        let mut removed = 0;
        self.sessions.retain(|_, session| {
            let keep = now - session.last_activity <= max_age;
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }
}
