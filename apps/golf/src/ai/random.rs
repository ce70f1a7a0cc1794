//! Random AI player - makes random legal moves.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{AiError, AiPlayer};
use crate::domain::{legal_actions, Action, GameState, Seat};

/// AI that picks uniformly among legal actions.
///
/// Seeded instances are reproducible, which the simulator and tests rely on.
pub struct RandomPlayer {
    rng: Mutex<StdRng>,
}

impl RandomPlayer {
    pub const NAME: &'static str = "RandomPlayer";

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl AiPlayer for RandomPlayer {
    fn choose_action(&self, state: &GameState, seat: Seat) -> Result<Action, AiError> {
        let legal = legal_actions(state, seat);
        if legal.is_empty() {
            return Err(AiError::InvalidMove(format!(
                "No legal actions for seat {seat}"
            )));
        }

        let mut rng = self
            .rng
            .lock()
            .map_err(|e| AiError::Internal(format!("RNG lock poisoned: {e}")))?;

        legal
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| AiError::Internal("Failed to choose random action".into()))
    }
}
