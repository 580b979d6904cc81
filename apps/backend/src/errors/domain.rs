//! Domain-level error type used across the engine, store and services.
//!
//! This error type is HTTP-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the `From<DomainError> for AppError` implementation.
//!
//! Every variant except `Internal` is a recoverable rejection of a single
//! action: no state has been mutated when one is returned.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Rejections caused by the submitted action itself.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Actor is not the one expected for the current step.
    NotYourTurn,
    /// Self-challenge or missing opponent at coinflip start.
    InvalidOpponent,
    /// Map is not in the remaining pool.
    InvalidMap,
    /// Value is not one of the side options.
    InvalidSide,
    /// Value is not one of the match formats.
    InvalidFormat,
    /// Value is not Heads or Tails.
    InvalidCoinFace,
    /// Action does not fit the session's lifecycle phase.
    PhaseMismatch,
    /// Submitted step kind differs from the current step (stale prompt).
    StepMismatch,
    Other(String),
}

/// Conflicts with existing channel state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    SessionAlreadyActive,
    Other(String),
}

/// Missing channel state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    /// No veto session in the channel.
    Session,
    /// No open Heads/Tails challenge in the channel.
    PendingCoinflip,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation or turn/business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict with existing state
    Conflict(ConflictKind, String),
    /// Missing session or challenge
    NotFound(NotFoundKind, String),
    /// Broken invariant inside the engine; a defect, not a user error
    Internal(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Internal(d) => write!(f, "internal: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal(detail.into())
    }

    pub fn not_your_turn(detail: impl Into<String>) -> Self {
        Self::validation(ValidationKind::NotYourTurn, detail)
    }

    pub fn no_active_session(channel_id: &str) -> Self {
        Self::not_found(
            NotFoundKind::Session,
            format!("There is no active veto session in channel {channel_id}"),
        )
    }

    pub fn session_already_active(channel_id: &str) -> Self {
        Self::conflict(
            ConflictKind::SessionAlreadyActive,
            format!(
                "A veto session is already in progress in channel {channel_id}; finish it or end it first"
            ),
        )
    }

    /// True when the error is the given validation kind.
    pub fn is_validation(&self, kind: &ValidationKind) -> bool {
        matches!(self, DomainError::Validation(k, _) if k == kind)
    }
}
