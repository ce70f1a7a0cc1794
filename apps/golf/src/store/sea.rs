//! SeaORM-backed snapshot store over the `game_rooms` table.
//!
//! `lock_version` is the authoritative snapshot version; the copy embedded
//! in the JSON document is overwritten with it on load.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::{debug, warn};

use crate::adapters::game_rooms_sea::{self as rooms, RoomCreate, RoomOverwrite, RoomUpdate};
use crate::domain::{snapshot, GameSnapshot, GameState};
use crate::entities::game_rooms::{self, RoomStatus};
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;
use crate::realtime::{GameSessionRegistry, Subscription};
use crate::store::{stamped, GameId, SnapshotStore, WritePolicy, INITIAL_VERSION};

pub struct SeaSnapshotStore {
    conn: DatabaseConnection,
    registry: Arc<GameSessionRegistry>,
    policy: WritePolicy,
}

impl SeaSnapshotStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self::with_policy(conn, WritePolicy::VersionChecked)
    }

    pub fn with_policy(conn: DatabaseConnection, policy: WritePolicy) -> Self {
        Self {
            conn,
            registry: GameSessionRegistry::new(),
            policy,
        }
    }

    pub fn registry(&self) -> Arc<GameSessionRegistry> {
        self.registry.clone()
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Rooms currently in `status`, oldest first.
    pub async fn list_rooms(&self, status: RoomStatus) -> Result<Vec<GameId>, DomainError> {
        let rows = rooms::list_by_status(&self.conn, status)
            .await
            .map_err(map_db_err)?;
        Ok(rows.into_iter().map(|r| r.id).collect())
    }
}

fn from_row(row: game_rooms::Model) -> Result<GameSnapshot, DomainError> {
    let snap = GameSnapshot::from_json(row.game_state)?;
    let version = u64::try_from(row.lock_version)
        .map_err(|_| DomainError::corrupt(format!("Negative lock_version on room {}", row.id)))?;
    Ok(stamped(&snap, version))
}

#[async_trait]
impl SnapshotStore for SeaSnapshotStore {
    async fn create_game(&self, initial: &GameState) -> Result<(GameId, GameSnapshot), DomainError> {
        let snap = snapshot(initial, INITIAL_VERSION);
        let dto = RoomCreate::new(snap.to_json()?).with_status(RoomStatus::from(snap.phase));
        let row = rooms::create_room(&self.conn, dto)
            .await
            .map_err(map_db_err)?;
        debug!(game_id = row.id, "Game room created");
        let game_id = row.id;
        Ok((game_id, from_row(row)?))
    }

    async fn load_snapshot(&self, game_id: GameId) -> Result<GameSnapshot, DomainError> {
        let row = rooms::require_room(&self.conn, game_id)
            .await
            .map_err(map_db_err)?;
        from_row(row)
    }

    async fn save_snapshot(
        &self,
        game_id: GameId,
        snapshot: &GameSnapshot,
    ) -> Result<GameSnapshot, DomainError> {
        snapshot.to_state()?;
        let status = RoomStatus::from(snapshot.phase);
        let document = stamped(snapshot, snapshot.version + 1).to_json()?;

        let row = match self.policy {
            WritePolicy::VersionChecked => {
                let expected_version = i64::try_from(snapshot.version).map_err(|_| {
                    DomainError::corrupt(format!("Version {} out of range", snapshot.version))
                })?;
                rooms::update_room(
                    &self.conn,
                    RoomUpdate {
                        id: game_id,
                        status,
                        game_state: document,
                        expected_version,
                    },
                )
                .await
            }
            WritePolicy::LastWriteWins => {
                rooms::overwrite_room(
                    &self.conn,
                    RoomOverwrite {
                        id: game_id,
                        status,
                        game_state: document,
                    },
                )
                .await
            }
        }
        .map_err(|e| {
            let err = map_db_err(e);
            if err.is_stale_write() {
                warn!(game_id, expected = snapshot.version, "Rejected stale snapshot write");
            }
            err
        })?;

        let stored = from_row(row)?;
        self.registry.broadcast(game_id, &stored);
        debug!(game_id, version = stored.version, "Snapshot saved");
        Ok(stored)
    }

    async fn subscribe(&self, game_id: GameId) -> Result<Subscription, DomainError> {
        rooms::require_room(&self.conn, game_id)
            .await
            .map_err(map_db_err)?;
        Ok(self.registry.register(game_id))
    }
}
