//! One remote player's view of a shared game.
//!
//! A peer keeps the last snapshot it has seen, validates its own player's
//! actions against it and publishes the result through the store. Writes are
//! compare-and-set, so a peer acting on an outdated view gets `StaleWrite`
//! back instead of overwriting the other player's move.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{derive_game_transitions, Action, GameSnapshot, GameState, GameTransition, Seat};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::realtime::Subscription;
use crate::services::game_flow::{prepare_action, ActionOutcome};
use crate::store::{GameId, SnapshotStore};

pub struct PeerClient {
    store: Arc<dyn SnapshotStore>,
    game_id: GameId,
    seat: Seat,
    local: GameSnapshot,
    subscription: Subscription,
}

impl PeerClient {
    /// Subscribe to `game_id` and load its current snapshot.
    ///
    /// The subscription is opened before the load so no save can slip
    /// between the two unseen.
    pub async fn connect(
        store: Arc<dyn SnapshotStore>,
        game_id: GameId,
        seat: Seat,
    ) -> Result<Self, AppError> {
        let subscription = store.subscribe(game_id).await?;
        let local = store.load_snapshot(game_id).await?;
        local.to_state()?;
        debug!(game_id, seat, version = local.version, "Peer connected");
        Ok(Self {
            store,
            game_id,
            seat,
            local,
            subscription,
        })
    }

    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    /// Last snapshot this peer accepted.
    pub fn snapshot(&self) -> &GameSnapshot {
        &self.local
    }

    pub fn version(&self) -> u64 {
        self.local.version
    }

    pub fn state(&self) -> Result<GameState, DomainError> {
        self.local.to_state()
    }

    pub fn is_my_turn(&self) -> bool {
        self.state()
            .map(|s| s.current_player() == Some(self.seat))
            .unwrap_or(false)
    }

    /// Act for this peer's own seat.
    pub async fn act(&mut self, action: Action) -> Result<ActionOutcome, AppError> {
        self.act_as(self.seat, action).await
    }

    /// Act for `seat`, which must be the seat this peer controls.
    ///
    /// Nothing is published unless the action is valid against the local
    /// snapshot. On `StaleWrite` the local view is refreshed before the error
    /// is returned.
    pub async fn act_as(&mut self, seat: Seat, action: Action) -> Result<ActionOutcome, AppError> {
        self.check_ownership(seat)?;
        let prepared = prepare_action(self.game_id, &self.local, seat, action)?;

        match self.store.save_snapshot(self.game_id, &prepared.snapshot).await {
            Ok(stored) => {
                debug!(
                    game_id = self.game_id,
                    seat,
                    version = stored.version,
                    ?action,
                    "Published action"
                );
                self.announce(&prepared.transitions);
                self.local = stored.clone();
                Ok(ActionOutcome {
                    snapshot: stored,
                    event: prepared.event,
                    transitions: prepared.transitions,
                })
            }
            Err(e) if e.is_stale_write() => {
                warn!(
                    game_id = self.game_id,
                    seat,
                    version = self.local.version,
                    "Publish rejected as stale, refreshing"
                );
                self.refresh().await?;
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Like [`act`](Self::act), re-validating against the fresh snapshot after
    /// each stale write. Rule violations on the fresh snapshot are returned
    /// as-is.
    pub async fn act_with_retry(
        &mut self,
        action: Action,
        attempts: usize,
    ) -> Result<ActionOutcome, AppError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.act(action).await {
                Err(e) if e.is_stale_write() && attempt < attempts.max(1) => {
                    debug!(game_id = self.game_id, attempt, "Retrying action");
                }
                other => return other,
            }
        }
    }

    /// Offer a snapshot delivered by the store.
    ///
    /// Returns the transitions it brought when accepted, `None` when it is
    /// older than the local view and was dropped.
    pub fn apply_incoming(
        &mut self,
        incoming: &GameSnapshot,
    ) -> Result<Option<Vec<GameTransition>>, DomainError> {
        if incoming.version < self.local.version {
            debug!(
                game_id = self.game_id,
                incoming = incoming.version,
                local = self.local.version,
                "Dropping out-of-order snapshot"
            );
            return Ok(None);
        }
        let after = incoming.to_state()?;
        let transitions = match self.local.to_state() {
            Ok(before) => derive_game_transitions(&before, &after),
            Err(_) => Vec::new(),
        };
        self.announce(&transitions);
        self.local = incoming.clone();
        Ok(Some(transitions))
    }

    /// Apply every notification already delivered. Returns how many were accepted.
    pub fn sync(&mut self) -> Result<usize, DomainError> {
        let mut accepted = 0;
        while let Some(update) = self.subscription.try_recv() {
            if self.apply_incoming(&update.snapshot)?.is_some() {
                accepted += 1;
            }
        }
        Ok(accepted)
    }

    /// Wait for the next notification and apply it.
    pub async fn next_update(&mut self) -> Result<Option<Vec<GameTransition>>, AppError> {
        match self.subscription.recv().await {
            Some(update) => Ok(self.apply_incoming(&update.snapshot)?),
            None => Err(AppError::internal(format!(
                "Notification channel for game {} closed",
                self.game_id
            ))),
        }
    }

    /// Replace the local view with the stored snapshot.
    pub async fn refresh(&mut self) -> Result<&GameSnapshot, AppError> {
        let fresh = self.store.load_snapshot(self.game_id).await?;
        self.apply_incoming(&fresh)?;
        Ok(&self.local)
    }

    fn check_ownership(&self, seat: Seat) -> Result<(), DomainError> {
        if seat != self.seat {
            return Err(DomainError::validation(
                ValidationKind::NotYourTurn,
                format!("This client plays seat {}, not seat {seat}", self.seat),
            ));
        }
        let state = self.local.to_state()?;
        match state.current_player() {
            Some(current) if current != seat => Err(DomainError::validation(
                ValidationKind::NotYourTurn,
                format!("It is seat {current}'s turn"),
            )),
            _ => Ok(()),
        }
    }

    fn announce(&self, transitions: &[GameTransition]) {
        for transition in transitions {
            match transition {
                GameTransition::TurnBecame { seat } if *seat == self.seat => {
                    info!(game_id = self.game_id, seat, "Your turn");
                }
                GameTransition::FinalRoundStarted { final_turn_player } => {
                    info!(
                        game_id = self.game_id,
                        final_turn_player, "Final round: one last turn"
                    );
                }
                GameTransition::GameEnded { winner, scores } => {
                    info!(game_id = self.game_id, winner, ?scores, "Game over");
                }
                other => debug!(game_id = self.game_id, transition = ?other, "Transition"),
            }
        }
    }
}
