use std::sync::Arc;

use crate::config::VetoConfig;
use crate::domain::coinflip::{CoinSource, RandomCoin};
use crate::state::app_state::AppState;

/// Builder for `AppState`, used by `main` and by tests.
#[derive(Default)]
pub struct StateBuilder {
    config: VetoConfig,
    coin: Option<Arc<dyn CoinSource>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: VetoConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the coin; otherwise a `RandomCoin` seeded from config.
    pub fn with_coin(mut self, coin: Arc<dyn CoinSource>) -> Self {
        self.coin = Some(coin);
        self
    }

    pub fn build(self) -> AppState {
        let coin = self
            .coin
            .unwrap_or_else(|| Arc::new(RandomCoin::new(self.config.coin_seed)));
        AppState::new(self.config, coin)
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
