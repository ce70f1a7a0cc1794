//! Game flow orchestration - bridges the pure engine with snapshot persistence.
//!
//! The flow for every action is load -> validate -> apply -> save. The save is
//! compare-and-set on the version the action was applied to, so a concurrent
//! writer turns into a `StaleWrite` instead of a silent overwrite.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{
    apply_action, derive_game_transitions, shuffle_rng, snapshot, Action, ActionEvent,
    GameSnapshot, GameTransition, Seat,
};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::store::{GameId, SnapshotStore};

/// An action applied to a snapshot, ready to be published.
#[derive(Debug, Clone)]
pub struct PreparedAction {
    /// Next snapshot, still carrying the base version for the compare-and-set.
    pub snapshot: GameSnapshot,
    pub event: ActionEvent,
    pub transitions: Vec<GameTransition>,
}

/// Result of an action that has been stored.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    /// Snapshot as stored, at its new version.
    pub snapshot: GameSnapshot,
    pub event: ActionEvent,
    pub transitions: Vec<GameTransition>,
}

/// Validate `base`, apply `action` for `seat` and build the next snapshot.
///
/// Shuffles draw from an RNG derived from the game seed, id and base version,
/// so every peer computes the same result for the same snapshot.
pub fn prepare_action(
    game_id: GameId,
    base: &GameSnapshot,
    seat: Seat,
    action: Action,
) -> Result<PreparedAction, DomainError> {
    let before = base.to_state()?;
    let mut rng = shuffle_rng(before.rng_seed, game_id, base.version);
    let applied = apply_action(&before, seat, action, &mut rng)?;
    let transitions = derive_game_transitions(&before, &applied.state);
    Ok(PreparedAction {
        snapshot: snapshot(&applied.state, base.version),
        event: applied.event,
        transitions,
    })
}

/// Stateless load/apply/save helper over any snapshot store.
pub struct GameFlowService {
    store: Arc<dyn SnapshotStore>,
}

impl GameFlowService {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn SnapshotStore> {
        &self.store
    }

    /// Apply one action against the current stored snapshot.
    pub async fn act(
        &self,
        game_id: GameId,
        seat: Seat,
        action: Action,
    ) -> Result<ActionOutcome, AppError> {
        let base = self.store.load_snapshot(game_id).await?;
        self.act_on(game_id, &base, seat, action).await
    }

    /// Apply one action against a snapshot the caller already holds.
    pub async fn act_on(
        &self,
        game_id: GameId,
        base: &GameSnapshot,
        seat: Seat,
        action: Action,
    ) -> Result<ActionOutcome, AppError> {
        debug!(game_id, seat, ?action, version = base.version, "Applying action");
        let prepared = prepare_action(game_id, base, seat, action)?;
        let stored = self.store.save_snapshot(game_id, &prepared.snapshot).await?;
        for transition in &prepared.transitions {
            info!(game_id, version = stored.version, ?transition, "Game transition");
        }
        Ok(ActionOutcome {
            snapshot: stored,
            event: prepared.event,
            transitions: prepared.transitions,
        })
    }
}
