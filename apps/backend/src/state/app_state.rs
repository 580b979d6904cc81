use std::sync::Arc;

use crate::config::VetoConfig;
use crate::domain::coinflip::CoinSource;
use crate::services::VetoService;
use crate::store::{PendingCoinflips, SessionStore};

/// Shared handles for every worker; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub pending: Arc<PendingCoinflips>,
    pub coin: Arc<dyn CoinSource>,
    pub config: VetoConfig,
}

impl AppState {
    pub fn new(config: VetoConfig, coin: Arc<dyn CoinSource>) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new()),
            pending: Arc::new(PendingCoinflips::new()),
            coin,
            config,
        }
    }

    pub fn veto_service(&self) -> VetoService {
        VetoService::new(self.sessions.clone(), self.pending.clone(), self.coin.clone())
    }
}
