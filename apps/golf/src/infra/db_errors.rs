//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; stores convert it into
//! `crate::errors::domain::DomainError` here.

use tracing::{error, warn};

use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

/// Prefix of the structured `DbErr::Custom` payload raised on a version mismatch.
pub const OPTIMISTIC_LOCK_PREFIX: &str = "OPTIMISTIC_LOCK:";
/// Prefix of the structured `DbErr::Custom` payload raised for a missing room.
pub const GAME_NOT_FOUND_PREFIX: &str = "GAME_NOT_FOUND:";

#[derive(serde::Deserialize)]
struct LockInfo {
    expected: u64,
    actual: u64,
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(GAME_NOT_FOUND_PREFIX) => {
            let parsed = msg
                .strip_prefix(GAME_NOT_FOUND_PREFIX)
                .and_then(|id| id.parse::<i64>().ok());
            return match parsed {
                Some(game_id) => {
                    warn!(game_id, "Game not found");
                    DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
                }
                None => DomainError::not_found(NotFoundKind::Game, "Game not found"),
            };
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with(OPTIMISTIC_LOCK_PREFIX) => {
            let info = msg
                .strip_prefix(OPTIMISTIC_LOCK_PREFIX)
                .and_then(|json| serde_json::from_str::<LockInfo>(json).ok());
            if let Some(info) = info {
                warn!(
                    expected = info.expected,
                    actual = info.actual,
                    "Optimistic lock conflict detected"
                );
                return DomainError::stale_write(info.expected, info.actual);
            }
            warn!("Optimistic lock conflict detected (version info unavailable)");
            return DomainError::conflict(
                crate::errors::domain::ConflictKind::StaleWrite,
                "Snapshot was modified concurrently; refresh and retry",
            );
        }
        sea_orm::DbErr::Json(_) => {
            warn!(raw_error = %error_msg, "Stored snapshot is not valid JSON");
            return DomainError::corrupt("Stored snapshot could not be decoded");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if error_msg.contains("timeout") || error_msg.contains("pool") {
        warn!(raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

/// Payload for a version mismatch, parsed back by [`map_db_err`].
pub fn optimistic_lock_err(expected: u64, actual: u64) -> sea_orm::DbErr {
    sea_orm::DbErr::Custom(format!(
        "{OPTIMISTIC_LOCK_PREFIX}{{\"expected\":{expected},\"actual\":{actual}}}"
    ))
}

pub fn game_not_found_err(game_id: i64) -> sea_orm::DbErr {
    sea_orm::DbErr::Custom(format!("{GAME_NOT_FOUND_PREFIX}{game_id}"))
}
