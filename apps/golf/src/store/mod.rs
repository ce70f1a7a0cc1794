//! Snapshot persistence with change notification.
//!
//! A store keeps one [`GameSnapshot`] per game. Saves are compare-and-set on
//! the snapshot's `version`: the caller passes the snapshot it derived its
//! change from, and the store accepts it only if that version is still
//! current, persisting it at `version + 1` and fanning the stored copy out to
//! every subscriber, the writer included.

use async_trait::async_trait;

use crate::domain::{GameSnapshot, GameState};
use crate::errors::domain::DomainError;
use crate::realtime::Subscription;

pub mod memory;
pub mod sea;

pub use memory::MemorySnapshotStore;
pub use sea::SeaSnapshotStore;

pub type GameId = i64;

/// Version assigned to a freshly created game.
pub const INITIAL_VERSION: u64 = 1;

/// How a store treats a save whose base version is no longer current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Reject with `Conflict(StaleWrite)`.
    #[default]
    VersionChecked,
    /// Accept anyway and overwrite; reproduces unguarded peers.
    LastWriteWins,
}

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Persist `initial` as a new game at [`INITIAL_VERSION`].
    async fn create_game(&self, initial: &GameState) -> Result<(GameId, GameSnapshot), DomainError>;

    async fn load_snapshot(&self, game_id: GameId) -> Result<GameSnapshot, DomainError>;

    /// Compare-and-set on `snapshot.version`; returns the stored snapshot.
    async fn save_snapshot(
        &self,
        game_id: GameId,
        snapshot: &GameSnapshot,
    ) -> Result<GameSnapshot, DomainError>;

    /// Receive every snapshot stored for `game_id` from now on.
    async fn subscribe(&self, game_id: GameId) -> Result<Subscription, DomainError>;
}

/// Copy of `snapshot` stamped with the version it is stored at.
pub(crate) fn stamped(snapshot: &GameSnapshot, version: u64) -> GameSnapshot {
    GameSnapshot {
        version,
        ..snapshot.clone()
    }
}
