//! Background expiry of idle sessions and stale coinflip challenges.

use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::VetoConfig;
use crate::store::{PendingCoinflips, SessionStore};

pub struct SessionSweeper;

/// Owner of a running sweeper task.
pub struct SweeperHandle {
    cancel: CancellationToken,
    join: JoinHandle<()>,
}

impl SweeperHandle {
    /// Stop the loop and wait for it to exit.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.join.await {
            warn!(error = %e, "Session sweeper task ended abnormally");
        }
    }
}

impl SessionSweeper {
    /// Spawn the sweep loop on the current runtime. The first sweep runs one
    /// full interval after spawning.
    pub fn spawn(
        sessions: Arc<SessionStore>,
        pending: Arc<PendingCoinflips>,
        config: &VetoConfig,
    ) -> SweeperHandle {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let period = config.sweep_interval;
        let max_age = to_time_duration(config.session_max_age);

        let join = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval's first tick completes immediately
            ticker.tick().await;

            debug!(period_secs = period.as_secs(), "Session sweeper started");
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        sweep_once(&sessions, &pending, OffsetDateTime::now_utc(), max_age);
                    }
                }
            }
            debug!("Session sweeper stopped");
        });

        SweeperHandle { cancel, join }
    }
}

/// One sweep pass; returns the number of sessions removed.
pub fn sweep_once(
    sessions: &SessionStore,
    pending: &PendingCoinflips,
    now: OffsetDateTime,
    max_age: time::Duration,
) -> usize {
    let removed = sessions.sweep_at(now, max_age);
    let challenges = pending.sweep_at(now, max_age);
    if removed > 0 || challenges > 0 {
        info!(
            sessions = removed,
            challenges,
            "Cleaned up abandoned veto sessions"
        );
    }
    removed
}

fn to_time_duration(d: Duration) -> time::Duration {
    time::Duration::try_from(d).unwrap_or(time::Duration::MAX)
}
