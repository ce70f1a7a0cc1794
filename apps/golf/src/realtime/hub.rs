use std::sync::{Arc, Weak};

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::domain::GameSnapshot;
use crate::store::GameId;

/// A stored snapshot fanned out to every subscriber of a game.
#[derive(Debug, Clone)]
pub struct SnapshotBroadcast {
    pub game_id: GameId,
    pub snapshot: Arc<GameSnapshot>,
}

/// Per-game subscriber lists.
#[derive(Default)]
pub struct GameSessionRegistry {
    sessions: DashMap<GameId, DashMap<Uuid, mpsc::UnboundedSender<SnapshotBroadcast>>>,
}

impl GameSessionRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn register(self: &Arc<Self>, game_id: GameId) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let token = Uuid::new_v4();
        self.sessions
            .entry(game_id)
            .or_default()
            .insert(token, tx);
        debug!(game_id, %token, "Subscriber registered");
        Subscription {
            game_id,
            token,
            rx,
            registry: Arc::downgrade(self),
        }
    }

    pub fn unregister(&self, game_id: GameId, token: Uuid) {
        if let Some(entry) = self.sessions.get(&game_id) {
            entry.remove(&token);
        }
        self.sessions.remove_if(&game_id, |_, subs| subs.is_empty());
        debug!(game_id, %token, "Subscriber unregistered");
    }

    /// Deliver `snapshot` to every live subscriber; returns how many received it.
    pub fn broadcast(&self, game_id: GameId, snapshot: &GameSnapshot) -> usize {
        let Some(entry) = self.sessions.get(&game_id) else {
            return 0;
        };
        let message = SnapshotBroadcast {
            game_id,
            snapshot: Arc::new(snapshot.clone()),
        };
        let mut delivered = 0;
        entry.retain(|_, tx| match tx.send(message.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(_) => false,
        });
        trace!(game_id, version = snapshot.version, delivered, "Snapshot broadcast");
        delivered
    }

    pub fn subscriber_count(&self, game_id: GameId) -> usize {
        self.sessions.get(&game_id).map_or(0, |e| e.len())
    }
}

/// Receiving end of a game subscription; unregisters itself on drop.
pub struct Subscription {
    game_id: GameId,
    token: Uuid,
    rx: mpsc::UnboundedReceiver<SnapshotBroadcast>,
    registry: Weak<GameSessionRegistry>,
}

impl Subscription {
    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    pub fn token(&self) -> Uuid {
        self.token
    }

    pub async fn recv(&mut self) -> Option<SnapshotBroadcast> {
        self.rx.recv().await
    }

    /// Next already-delivered snapshot, without waiting.
    pub fn try_recv(&mut self) -> Option<SnapshotBroadcast> {
        self.rx.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.unregister(self.game_id, self.token);
        }
    }
}
