// Unit tests for error mapping - pure domain logic without database dependencies
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_rule_violations_to_their_codes() {
    let cases = [
        (ValidationKind::NotYourTurn, "NOT_YOUR_TURN"),
        (ValidationKind::InvalidPhaseAction, "INVALID_PHASE_ACTION"),
        (ValidationKind::AlreadyFaceUp, "ALREADY_FACE_UP"),
        (ValidationKind::EmptyDiscardPile, "EMPTY_DISCARD_PILE"),
        (ValidationKind::Other("x".into()), "VALIDATION_ERROR"),
    ];
    for (kind, code) in cases {
        let app: AppError = DomainError::validation(kind, "rule").into();
        assert_eq!(app.code().as_str(), code);
        assert!(matches!(app, AppError::Validation { .. }));
    }
}

#[test]
fn maps_conflicts() {
    let stale = DomainError::stale_write(3, 4);
    assert!(stale.is_stale_write());
    let app: AppError = stale.into();
    assert_eq!(app.code(), ErrorCode::StaleWrite);
    assert!(app.detail().contains("expected version 3"));

    let full: AppError = DomainError::conflict(ConflictKind::RoomFull, "full").into();
    assert_eq!(full.code().as_str(), "ROOM_FULL");

    let other: AppError =
        DomainError::conflict(ConflictKind::Other("x".into()), "generic").into();
    assert_eq!(other.code().as_str(), "CONFLICT");
}

#[test]
fn maps_not_found() {
    let app: AppError = DomainError::not_found(NotFoundKind::Game, "no game").into();
    assert_eq!(app.code().as_str(), "GAME_NOT_FOUND");
    assert!(matches!(app, AppError::NotFound { .. }));
}

#[test]
fn maps_infra() {
    let app: AppError = DomainError::corrupt("grid of 5").into();
    assert_eq!(app.code().as_str(), "DATA_CORRUPTION");
    assert!(matches!(app, AppError::Internal { .. }));

    let app: AppError = DomainError::infra(InfraErrorKind::DbUnavailable, "down").into();
    assert_eq!(app.code().as_str(), "DB_UNAVAILABLE");
}
