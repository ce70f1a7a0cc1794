//! Lobby: seating two players, readiness and starting the deal.

use std::sync::Arc;

use tracing::{info, warn};
use unicode_normalization::UnicodeNormalization;

use crate::domain::rules::PLAYERS;
use crate::domain::{deal_new_game, shuffle_rng, snapshot, GameSnapshot, GameState, Phase, Player, Ruleset};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::store::{GameId, SnapshotStore};

/// Longest accepted display name, in characters.
pub const MAX_NAME_CHARS: usize = 32;
/// Attempts at a lobby update before a stale write is returned to the caller.
const LOBBY_WRITE_ATTEMPTS: usize = 3;

/// Trim and NFKC-normalize a display name.
pub fn normalize_player_name(raw: &str) -> Result<String, DomainError> {
    let name: String = raw.nfkc().collect::<String>().trim().to_string();
    if name.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerName,
            "Player name cannot be empty",
        ));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerName,
            format!("Player name longer than {MAX_NAME_CHARS} characters"),
        ));
    }
    Ok(name)
}

pub struct RoomService {
    store: Arc<dyn SnapshotStore>,
    rules: Ruleset,
}

impl RoomService {
    pub fn new(store: Arc<dyn SnapshotStore>, rules: Ruleset) -> Self {
        Self { store, rules }
    }

    /// Open a room with the host seated in seat 0.
    pub async fn create_room(
        &self,
        host_id: &str,
        host_name: &str,
    ) -> Result<(GameId, GameSnapshot), AppError> {
        self.create_room_with_seed(host_id, host_name, rand::random())
            .await
    }

    /// Like [`create_room`](Self::create_room) with a fixed game seed, for
    /// reproducible deals.
    pub async fn create_room_with_seed(
        &self,
        host_id: &str,
        host_name: &str,
        rng_seed: u64,
    ) -> Result<(GameId, GameSnapshot), AppError> {
        let mut lobby = GameState::new_lobby(self.rules, rng_seed);
        lobby.players.push(Player {
            id: host_id.to_string(),
            name: normalize_player_name(host_name)?,
            ready: false,
        });
        let (game_id, snap) = self.store.create_game(&lobby).await?;
        info!(game_id, host_id, rng_seed, "Room created");
        Ok((game_id, snap))
    }

    pub async fn join_room(
        &self,
        game_id: GameId,
        player_id: &str,
        name: &str,
    ) -> Result<GameSnapshot, AppError> {
        let name = normalize_player_name(name)?;
        let stored = self
            .update_lobby(game_id, |state| {
                if state.seat_of(player_id).is_some() {
                    return Err(DomainError::conflict(
                        ConflictKind::AlreadySeated,
                        format!("Player {player_id} is already seated"),
                    ));
                }
                if state.players.len() >= PLAYERS {
                    return Err(DomainError::conflict(ConflictKind::RoomFull, "Room is full"));
                }
                state.players.push(Player {
                    id: player_id.to_string(),
                    name: name.clone(),
                    ready: false,
                });
                Ok(())
            })
            .await?;
        info!(game_id, player_id, "Player joined");
        Ok(stored)
    }

    pub async fn set_ready(
        &self,
        game_id: GameId,
        player_id: &str,
        ready: bool,
    ) -> Result<GameSnapshot, AppError> {
        self.update_lobby(game_id, |state| {
            let player = state
                .players
                .iter_mut()
                .find(|p| p.id == player_id)
                .ok_or_else(|| {
                    DomainError::not_found(
                        NotFoundKind::Player,
                        format!("Player {player_id} is not seated"),
                    )
                })?;
            player.ready = ready;
            Ok(())
        })
        .await
    }

    /// Deal once both seats are filled and ready.
    pub async fn start_game(&self, game_id: GameId) -> Result<GameSnapshot, AppError> {
        let base = self.store.load_snapshot(game_id).await?;
        let lobby = base.to_state()?;
        ensure_lobby(&lobby)?;
        if lobby.players.len() < PLAYERS {
            return Err(DomainError::validation(
                ValidationKind::NotEnoughPlayers,
                format!("Need {PLAYERS} players to start"),
            )
            .into());
        }
        if let Some(p) = lobby.players.iter().find(|p| !p.ready) {
            return Err(DomainError::validation(
                ValidationKind::PlayerNotReady,
                format!("Player {} is not ready", p.id),
            )
            .into());
        }

        let mut rng = shuffle_rng(lobby.rng_seed, game_id, base.version);
        let dealt = deal_new_game(&lobby, &mut rng)?;
        let stored = self
            .store
            .save_snapshot(game_id, &snapshot(&dealt, base.version))
            .await?;
        info!(game_id, version = stored.version, "Game started");
        Ok(stored)
    }

    /// Load, mutate and save a lobby, reloading on stale writes.
    async fn update_lobby<F>(&self, game_id: GameId, mutate: F) -> Result<GameSnapshot, AppError>
    where
        F: Fn(&mut GameState) -> Result<(), DomainError>,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let base = self.store.load_snapshot(game_id).await?;
            let mut state = base.to_state()?;
            ensure_lobby(&state)?;
            mutate(&mut state)?;
            match self
                .store
                .save_snapshot(game_id, &snapshot(&state, base.version))
                .await
            {
                Ok(stored) => return Ok(stored),
                Err(e) if e.is_stale_write() && attempt < LOBBY_WRITE_ATTEMPTS => {
                    warn!(game_id, attempt, "Lobby update raced, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

fn ensure_lobby(state: &GameState) -> Result<(), DomainError> {
    match state.phase {
        Phase::Lobby => Ok(()),
        Phase::GameOver { .. } => Err(DomainError::validation(
            ValidationKind::GameAlreadyEnded,
            "The game is over",
        )),
        _ => Err(DomainError::validation(
            ValidationKind::InvalidPhaseAction,
            "Game has already started",
        )),
    }
}
