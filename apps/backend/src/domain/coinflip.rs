//! Coinflip resolution with an injectable randomness source.

use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::catalogue::CoinFace;

/// Source of coin tosses.
pub trait CoinSource: Send + Sync {
    fn flip(&self) -> CoinFace;
}

/// Fair coin backed by ChaCha8.
///
/// `Some(seed)` gives a reproducible sequence of tosses; `None` seeds from
/// the operating system.
pub struct RandomCoin {
    rng: Mutex<ChaCha8Rng>,
}

impl RandomCoin {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl CoinSource for RandomCoin {
    fn flip(&self) -> CoinFace {
        if self.rng.lock().random_bool(0.5) {
            CoinFace::Heads
        } else {
            CoinFace::Tails
        }
    }
}

/// Coin that always lands on the same face.
#[derive(Debug, Clone, Copy)]
pub struct FixedCoin(pub CoinFace);

impl CoinSource for FixedCoin {
    fn flip(&self) -> CoinFace {
        self.0
    }
}

/// Which participant of the challenge won the toss.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CoinflipWinner {
    Initiator,
    Opponent,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CoinflipOutcome {
    pub initiator_side: CoinFace,
    /// Always the complement of `initiator_side`.
    pub opponent_side: CoinFace,
    pub landed_on: CoinFace,
    pub winner: CoinflipWinner,
}

/// Toss the coin for a challenge where the initiator called `initiator_side`.
pub fn resolve(initiator_side: CoinFace, coin: &dyn CoinSource) -> CoinflipOutcome {
    let landed_on = coin.flip();
    let winner = if landed_on == initiator_side {
        CoinflipWinner::Initiator
    } else {
        CoinflipWinner::Opponent
    };
    CoinflipOutcome {
        initiator_side,
        opponent_side: initiator_side.opposite(),
        landed_on,
        winner,
    }
}
