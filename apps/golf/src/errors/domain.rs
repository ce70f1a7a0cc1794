//! Domain-level error type used across the engine, stores and services.
//!
//! This error type is transport- and DB-agnostic. Every rule violation an
//! engine action can produce is a `Validation` with a specific
//! [`ValidationKind`]; the presentation layer decides how to show it.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Rule violations surfaced to the invoking player.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
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
    Other(String),
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Player,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// Snapshot publish based on a version that is no longer current.
    StaleWrite,
    RoomFull,
    AlreadySeated,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Rule violation or invalid input
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation error {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Malformed external data (bad snapshot shape, broken invariants).
    pub fn corrupt(detail: impl Into<String>) -> Self {
        Self::Infra(InfraErrorKind::DataCorruption, detail.into())
    }

    pub fn stale_write(expected: u64, actual: u64) -> Self {
        Self::Conflict(
            ConflictKind::StaleWrite,
            format!(
                "Snapshot was modified concurrently (expected version {expected}, actual version {actual}). Refresh and retry."
            ),
        )
    }

    pub fn validation_kind(&self) -> Option<&ValidationKind> {
        match self {
            DomainError::Validation(kind, _) => Some(kind),
            _ => None,
        }
    }

    pub fn is_stale_write(&self) -> bool {
        matches!(self, DomainError::Conflict(ConflictKind::StaleWrite, _))
    }
}
