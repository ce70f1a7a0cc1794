//! Error codes surfaced to the presentation layer.
//!
//! Add new codes here; never pass ad-hoc strings as error codes. All codes are
//! SCREAMING_SNAKE_CASE and map 1:1 to the strings clients receive.

use core::fmt;

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Rule violations
    NotYourTurn,
    InvalidPhaseAction,
    AlreadyFaceUp,
    DuplicateRankInInitialFlip,
    AlreadyHoldingDrawnCard,
    NoDrawnCard,
    EmptyDiscardPile,
    DeckExhausted,
    GameAlreadyEnded,
    InvalidCell,
    InvalidSeat,
    NotEnoughPlayers,
    PlayerNotReady,
    InvalidPlayerName,
    ParseCard,
    /// General validation error
    ValidationError,

    // Resource Not Found
    GameNotFound,
    PlayerNotFound,
    NotFound,

    // Conflicts
    /// Optimistic concurrency conflict on snapshot publish
    StaleWrite,
    RoomFull,
    AlreadySeated,
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    DataCorruption,
    ConfigError,
    InternalError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotYourTurn => "NOT_YOUR_TURN",
            Self::InvalidPhaseAction => "INVALID_PHASE_ACTION",
            Self::AlreadyFaceUp => "ALREADY_FACE_UP",
            Self::DuplicateRankInInitialFlip => "DUPLICATE_RANK_IN_INITIAL_FLIP",
            Self::AlreadyHoldingDrawnCard => "ALREADY_HOLDING_DRAWN_CARD",
            Self::NoDrawnCard => "NO_DRAWN_CARD",
            Self::EmptyDiscardPile => "EMPTY_DISCARD_PILE",
            Self::DeckExhausted => "DECK_EXHAUSTED",
            Self::GameAlreadyEnded => "GAME_ALREADY_ENDED",
            Self::InvalidCell => "INVALID_CELL",
            Self::InvalidSeat => "INVALID_SEAT",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            Self::PlayerNotReady => "PLAYER_NOT_READY",
            Self::InvalidPlayerName => "INVALID_PLAYER_NAME",
            Self::ParseCard => "PARSE_CARD",
            Self::ValidationError => "VALIDATION_ERROR",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::StaleWrite => "STALE_WRITE",
            Self::RoomFull => "ROOM_FULL",
            Self::AlreadySeated => "ALREADY_SEATED",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::ConfigError => "CONFIG_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&ValidationKind> for ErrorCode {
    fn from(kind: &ValidationKind) -> Self {
        match kind {
            ValidationKind::NotYourTurn => Self::NotYourTurn,
            ValidationKind::InvalidPhaseAction => Self::InvalidPhaseAction,
            ValidationKind::AlreadyFaceUp => Self::AlreadyFaceUp,
            ValidationKind::DuplicateRankInInitialFlip => Self::DuplicateRankInInitialFlip,
            ValidationKind::AlreadyHoldingDrawnCard => Self::AlreadyHoldingDrawnCard,
            ValidationKind::NoDrawnCard => Self::NoDrawnCard,
            ValidationKind::EmptyDiscardPile => Self::EmptyDiscardPile,
            ValidationKind::DeckExhausted => Self::DeckExhausted,
            ValidationKind::GameAlreadyEnded => Self::GameAlreadyEnded,
            ValidationKind::InvalidCell => Self::InvalidCell,
            ValidationKind::InvalidSeat => Self::InvalidSeat,
            ValidationKind::NotEnoughPlayers => Self::NotEnoughPlayers,
            ValidationKind::PlayerNotReady => Self::PlayerNotReady,
            ValidationKind::InvalidPlayerName => Self::InvalidPlayerName,
            ValidationKind::ParseCard => Self::ParseCard,
            ValidationKind::Other(_) => Self::ValidationError,
        }
    }
}

impl From<&DomainError> for ErrorCode {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Validation(kind, _) => kind.into(),
            DomainError::Conflict(kind, _) => match kind {
                ConflictKind::StaleWrite => Self::StaleWrite,
                ConflictKind::RoomFull => Self::RoomFull,
                ConflictKind::AlreadySeated => Self::AlreadySeated,
                ConflictKind::Other(_) => Self::Conflict,
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Game => Self::GameNotFound,
                NotFoundKind::Player => Self::PlayerNotFound,
                NotFoundKind::Other(_) => Self::NotFound,
            },
            DomainError::Infra(kind, _) => match kind {
                InfraErrorKind::Timeout => Self::DbTimeout,
                InfraErrorKind::DbUnavailable => Self::DbUnavailable,
                InfraErrorKind::DataCorruption => Self::DataCorruption,
                InfraErrorKind::Other(_) => Self::InternalError,
            },
        }
    }
}
