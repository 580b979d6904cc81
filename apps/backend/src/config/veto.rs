//! Runtime settings read from the environment.
//!
//! | variable | default |
//! |---|---|
//! | `VETO_HOST` | `0.0.0.0` |
//! | `VETO_PORT` | `3001` |
//! | `VETO_SESSION_MAX_AGE_SECS` | `1800` |
//! | `VETO_SWEEP_INTERVAL_SECS` | `1800` |
//! | `VETO_COIN_SEED` | unset (OS entropy) |

use std::env;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
/// Idle sessions older than this are swept.
pub const DEFAULT_SESSION_MAX_AGE: Duration = Duration::from_secs(30 * 60);
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct VetoConfig {
    pub host: String,
    pub port: u16,
    pub session_max_age: Duration,
    pub sweep_interval: Duration,
    /// Seed for a reproducible coin.
    pub coin_seed: Option<u64>,
}

impl Default for VetoConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            session_max_age: DEFAULT_SESSION_MAX_AGE,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            coin_seed: None,
        }
    }
}

impl VetoConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        Ok(Self {
            host: env::var("VETO_HOST")
                .ok()
                .map(|h| h.trim().to_string())
                .filter(|h| !h.is_empty())
                .unwrap_or(defaults.host),
            port: parse_var("VETO_PORT")?.unwrap_or(defaults.port),
            session_max_age: secs_var("VETO_SESSION_MAX_AGE_SECS")?
                .unwrap_or(defaults.session_max_age),
            sweep_interval: secs_var("VETO_SWEEP_INTERVAL_SECS")?
                .unwrap_or(defaults.sweep_interval),
            coin_seed: parse_var("VETO_COIN_SEED")?,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, AppError> {
    let raw = match env::var(name) {
        Ok(raw) => raw,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|_| AppError::config(format!("{name} must be a valid number, got {raw:?}")))
}

fn secs_var(name: &str) -> Result<Option<Duration>, AppError> {
    match parse_var::<u64>(name)? {
        Some(0) => Err(AppError::config(format!("{name} must be greater than zero"))),
        other => Ok(other.map(Duration::from_secs)),
    }
}
