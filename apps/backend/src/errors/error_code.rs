//! Error codes for the veto backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the veto backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Turn ownership
    /// Actor is not expected to act on the current step
    NotYourTurn,

    // Request Validation
    /// Self-challenge or missing opponent
    InvalidOpponent,
    /// Map not in the remaining pool
    InvalidMap,
    /// Side not Attacker/Defender
    InvalidSide,
    /// Unknown match format
    InvalidFormat,
    /// Not Heads/Tails
    InvalidCoinFace,
    /// Action not valid in the session's phase
    PhaseMismatch,
    /// Submitted step kind is stale
    StepMismatch,
    /// Invalid channel id in the path
    InvalidChannelId,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// No active veto session in the channel
    NoActiveSession,
    /// No open coinflip challenge in the channel
    NoPendingCoinflip,
    /// General not found error
    NotFound,

    // Conflicts
    /// Channel already has a session
    SessionAlreadyActive,
    /// Generic conflict
    Conflict,

    // System Errors
    Internal,
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotYourTurn => "NOT_YOUR_TURN",

            Self::InvalidOpponent => "INVALID_OPPONENT",
            Self::InvalidMap => "INVALID_MAP",
            Self::InvalidSide => "INVALID_SIDE",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::InvalidCoinFace => "INVALID_COIN_FACE",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::StepMismatch => "STEP_MISMATCH",
            Self::InvalidChannelId => "INVALID_CHANNEL_ID",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::NoActiveSession => "NO_ACTIVE_SESSION",
            Self::NoPendingCoinflip => "NO_PENDING_COINFLIP",
            Self::NotFound => "NOT_FOUND",

            Self::SessionAlreadyActive => "SESSION_ALREADY_ACTIVE",
            Self::Conflict => "CONFLICT",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
