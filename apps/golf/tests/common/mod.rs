#![allow(dead_code)]

use std::sync::Arc;

use golf::ai::{AiPlayer, RandomPlayer};
use golf::domain::{GameSnapshot, Ruleset};
use golf::{GameId, PeerClient, RoomService, SnapshotStore};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    golf_test_support::logging::init();
}

/// Upper bound on actions in one simulated game.
pub const MAX_ACTIONS: usize = 5_000;

/// Two seated, ready players and a dealt game.
pub async fn started_game(store: Arc<dyn SnapshotStore>, rules: Ruleset) -> (GameId, GameSnapshot) {
    let rooms = RoomService::new(store, rules);
    let (game_id, _) = rooms.create_room("p0", "Alice").await.unwrap();
    rooms.join_room(game_id, "p1", "Bob").await.unwrap();
    rooms.set_ready(game_id, "p0", true).await.unwrap();
    rooms.set_ready(game_id, "p1", true).await.unwrap();
    let dealt = rooms.start_game(game_id).await.unwrap();
    (game_id, dealt)
}

pub async fn connect_pair(store: &Arc<dyn SnapshotStore>, game_id: GameId) -> [PeerClient; 2] {
    [
        PeerClient::connect(store.clone(), game_id, 0).await.unwrap(),
        PeerClient::connect(store.clone(), game_id, 1).await.unwrap(),
    ]
}

/// Drive both peers with random players until the game ends.
pub async fn play_out(peers: &mut [PeerClient; 2], seed: u64) -> GameSnapshot {
    let ais = [RandomPlayer::new(Some(seed)), RandomPlayer::new(Some(seed + 1))];
    for _ in 0..MAX_ACTIONS {
        for peer in peers.iter_mut() {
            peer.sync().unwrap();
        }
        let state = peers[0].state().unwrap();
        if state.is_over() {
            return peers[0].snapshot().clone();
        }
        let seat = state.current_player().unwrap();
        let peer = &mut peers[seat as usize];
        let action = ais[seat as usize]
            .choose_action(&peer.state().unwrap(), seat)
            .unwrap();
        peer.act(action).await.unwrap();
    }
    panic!("game did not finish within {MAX_ACTIONS} actions");
}
