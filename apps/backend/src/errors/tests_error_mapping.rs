// Unit tests for error mapping - pure domain logic without HTTP wiring
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::errors::ErrorCode;
use crate::AppError;

#[test]
fn maps_turn_violations_to_403() {
    let de = DomainError::not_your_turn("It's not your turn!");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::NotYourTurn);
    assert_eq!(app.status().as_u16(), 403);
}

#[test]
fn maps_invalid_values_to_400() {
    for (kind, code) in [
        (ValidationKind::InvalidMap, ErrorCode::InvalidMap),
        (ValidationKind::InvalidSide, ErrorCode::InvalidSide),
        (ValidationKind::InvalidFormat, ErrorCode::InvalidFormat),
        (ValidationKind::InvalidOpponent, ErrorCode::InvalidOpponent),
        (ValidationKind::InvalidCoinFace, ErrorCode::InvalidCoinFace),
    ] {
        let app: AppError = DomainError::validation(kind, "bad value").into();
        assert_eq!(app.code(), code);
        assert_eq!(app.status().as_u16(), 400);
    }
}

#[test]
fn maps_stale_ui_to_409() {
    let app: AppError = DomainError::validation(ValidationKind::StepMismatch, "stale").into();
    assert_eq!(app.code().as_str(), "STEP_MISMATCH");
    assert_eq!(app.status().as_u16(), 409);

    let app: AppError = DomainError::validation(ValidationKind::PhaseMismatch, "early").into();
    assert_eq!(app.code().as_str(), "PHASE_MISMATCH");
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_conflicts() {
    let active = DomainError::session_already_active("c1");
    let app: AppError = active.into();
    assert_eq!(app.code().as_str(), "SESSION_ALREADY_ACTIVE");
    assert_eq!(app.status().as_u16(), 409);

    let other = DomainError::conflict(ConflictKind::Other("x".into()), "generic conflict");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_not_found() {
    let app: AppError = DomainError::no_active_session("c1").into();
    assert_eq!(app.code().as_str(), "NO_ACTIVE_SESSION");
    assert_eq!(app.status().as_u16(), 404);

    let app: AppError = DomainError::not_found(NotFoundKind::PendingCoinflip, "none").into();
    assert_eq!(app.code().as_str(), "NO_PENDING_COINFLIP");
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn internal_detail_is_not_leaked() {
    let app: AppError = DomainError::internal("picks[2] missing with 3 maps in pool").into();
    assert_eq!(app.code(), ErrorCode::Internal);
    assert_eq!(app.status().as_u16(), 500);
    assert!(!app.to_string().contains("picks[2]"));
}

#[test]
fn constructor_helpers() {
    let validation = DomainError::validation(ValidationKind::InvalidMap, "nope");
    assert!(matches!(
        validation,
        DomainError::Validation(ValidationKind::InvalidMap, _)
    ));
    assert!(validation.is_validation(&ValidationKind::InvalidMap));
    assert!(!validation.is_validation(&ValidationKind::InvalidSide));

    let not_found = DomainError::no_active_session("c9");
    assert!(matches!(
        not_found,
        DomainError::NotFound(NotFoundKind::Session, ref d) if d.contains("c9")
    ));
}
