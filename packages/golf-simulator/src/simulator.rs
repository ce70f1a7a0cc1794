//! Headless games between two AI peers over an in-memory snapshot store.
//!
//! Every action goes through the same path a remote client uses: the acting
//! peer validates locally, publishes with compare-and-set, and both peers pick
//! the stored snapshot up from their subscriptions.

use std::sync::Arc;

use golf::ai::AiPlayer;
use golf::domain::{ActionEvent, Ruleset};
use golf::{AppError, MemorySnapshotStore, PeerClient, RoomService, SnapshotStore, WritePolicy};
use serde::Serialize;
use tracing::debug;

/// Upper bound on actions before a game is abandoned.
const MAX_ACTIONS: usize = 10_000;

#[derive(Debug, Clone, Serialize)]
pub struct GameReport {
    pub game_num: u32,
    pub seed: u64,
    pub scores: [i16; 2],
    pub winner: u8,
    pub actions: usize,
    pub reshuffles: usize,
    pub final_version: u64,
}

pub struct Simulator {
    store: Arc<dyn SnapshotStore>,
    rooms: RoomService,
}

impl Simulator {
    pub fn new(rules: Ruleset, policy: WritePolicy) -> Self {
        let store: Arc<dyn SnapshotStore> = Arc::new(MemorySnapshotStore::with_policy(policy));
        let rooms = RoomService::new(store.clone(), rules);
        Self { store, rooms }
    }

    pub async fn play(
        &self,
        game_num: u32,
        seed: u64,
        ais: &[Box<dyn AiPlayer>; 2],
    ) -> Result<GameReport, AppError> {
        let (game_id, _) = self
            .rooms
            .create_room_with_seed("sim-0", "South", seed)
            .await?;
        self.rooms.join_room(game_id, "sim-1", "North").await?;
        self.rooms.set_ready(game_id, "sim-0", true).await?;
        self.rooms.set_ready(game_id, "sim-1", true).await?;
        self.rooms.start_game(game_id).await?;

        let mut peers = [
            PeerClient::connect(self.store.clone(), game_id, 0).await?,
            PeerClient::connect(self.store.clone(), game_id, 1).await?,
        ];

        let mut actions = 0;
        let mut reshuffles = 0;
        while actions < MAX_ACTIONS {
            for peer in peers.iter_mut() {
                peer.sync()?;
            }
            let state = peers[0].state()?;
            if let Some(result) = state.result() {
                return Ok(GameReport {
                    game_num,
                    seed,
                    scores: result.scores,
                    winner: result.winner,
                    actions,
                    reshuffles,
                    final_version: peers[0].version(),
                });
            }
            let seat = state
                .current_player()
                .ok_or_else(|| AppError::internal("No seat to act in a running game"))?;
            let peer = &mut peers[usize::from(seat)];
            let action = ais[usize::from(seat)].choose_action(&peer.state()?, seat)?;
            let outcome = peer.act(action).await?;
            if matches!(outcome.event, ActionEvent::DeckReshuffled { .. }) {
                reshuffles += 1;
            }
            debug!(game_num, seat, ?action, "Action applied");
            actions += 1;
        }
        Err(AppError::internal(format!(
            "Game {game_num} did not finish within {MAX_ACTIONS} actions"
        )))
    }
}
