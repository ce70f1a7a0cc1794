//! AI player trait definition.

use std::fmt;

use crate::domain::{Action, GameState, Seat};
use crate::error::AppError;

/// Errors that can occur during AI decision-making.
#[derive(Debug)]
pub enum AiError {
    /// AI encountered an internal error
    Internal(String),
    /// No legal action exists for the seat
    InvalidMove(String),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::Internal(msg) => write!(f, "AI internal error: {msg}"),
            AiError::InvalidMove(msg) => write!(f, "AI invalid move: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        AppError::internal(format!("AI error: {err}"))
    }
}

/// Trait for automated golf players.
///
/// Implementations see the full state and must return one of
/// [`legal_actions`](crate::domain::legal_actions) for `seat`.
pub trait AiPlayer: Send + Sync {
    fn choose_action(&self, state: &GameState, seat: Seat) -> Result<Action, AiError>;
}
