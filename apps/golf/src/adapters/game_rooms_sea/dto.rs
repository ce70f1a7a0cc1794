//! DTOs for game_rooms_sea adapter.

use crate::entities::game_rooms::RoomStatus;

/// DTO for creating a new room.
#[derive(Debug, Clone)]
pub struct RoomCreate {
    pub status: RoomStatus,
    pub game_state: serde_json::Value,
}

impl RoomCreate {
    pub fn new(game_state: serde_json::Value) -> Self {
        Self {
            status: RoomStatus::Waiting,
            game_state,
        }
    }

    pub fn with_status(mut self, status: RoomStatus) -> Self {
        self.status = status;
        self
    }
}

/// Whole-document replacement guarded by `expected_version`.
#[derive(Debug, Clone)]
pub struct RoomUpdate {
    pub id: i64,
    pub status: RoomStatus,
    pub game_state: serde_json::Value,
    pub expected_version: i64,
}

/// Unconditional replacement; bumps the version without checking it.
#[derive(Debug, Clone)]
pub struct RoomOverwrite {
    pub id: i64,
    pub status: RoomStatus,
    pub game_state: serde_json::Value,
}
