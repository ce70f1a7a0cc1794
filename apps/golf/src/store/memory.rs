//! In-process snapshot store.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, warn};

use crate::domain::{snapshot, GameSnapshot, GameState};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::realtime::{GameSessionRegistry, Subscription};
use crate::store::{stamped, GameId, SnapshotStore, WritePolicy, INITIAL_VERSION};

pub struct MemorySnapshotStore {
    games: DashMap<GameId, GameSnapshot>,
    next_id: AtomicI64,
    registry: Arc<GameSessionRegistry>,
    policy: WritePolicy,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::with_policy(WritePolicy::VersionChecked)
    }

    pub fn with_policy(policy: WritePolicy) -> Self {
        Self {
            games: DashMap::new(),
            next_id: AtomicI64::new(1),
            registry: GameSessionRegistry::new(),
            policy,
        }
    }

    pub fn registry(&self) -> Arc<GameSessionRegistry> {
        self.registry.clone()
    }
}

impl Default for MemorySnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

fn game_not_found(game_id: GameId) -> DomainError {
    DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn create_game(&self, initial: &GameState) -> Result<(GameId, GameSnapshot), DomainError> {
        let game_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let snap = snapshot(initial, INITIAL_VERSION);
        self.games.insert(game_id, snap.clone());
        debug!(game_id, "Game created");
        Ok((game_id, snap))
    }

    async fn load_snapshot(&self, game_id: GameId) -> Result<GameSnapshot, DomainError> {
        self.games
            .get(&game_id)
            .map(|s| s.clone())
            .ok_or_else(|| game_not_found(game_id))
    }

    async fn save_snapshot(
        &self,
        game_id: GameId,
        snapshot: &GameSnapshot,
    ) -> Result<GameSnapshot, DomainError> {
        snapshot.to_state()?;
        let mut current = self
            .games
            .get_mut(&game_id)
            .ok_or_else(|| game_not_found(game_id))?;

        if current.version != snapshot.version {
            match self.policy {
                WritePolicy::VersionChecked => {
                    warn!(
                        game_id,
                        expected = snapshot.version,
                        actual = current.version,
                        "Rejected stale snapshot write"
                    );
                    return Err(DomainError::stale_write(snapshot.version, current.version));
                }
                WritePolicy::LastWriteWins => {
                    warn!(
                        game_id,
                        expected = snapshot.version,
                        actual = current.version,
                        "Overwriting newer snapshot"
                    );
                }
            }
        }

        let stored = stamped(snapshot, current.version + 1);
        *current = stored.clone();
        // Still holding the entry: subscribers see versions in order.
        self.registry.broadcast(game_id, &stored);
        debug!(game_id, version = stored.version, "Snapshot saved");
        Ok(stored)
    }

    async fn subscribe(&self, game_id: GameId) -> Result<Subscription, DomainError> {
        if !self.games.contains_key(&game_id) {
            return Err(game_not_found(game_id));
        }
        Ok(self.registry.register(game_id))
    }
}
