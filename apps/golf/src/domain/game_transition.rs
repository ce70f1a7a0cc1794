use crate::domain::rules::PLAYERS;
use crate::domain::state::{GameState, PhaseKind, Seat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTransition {
    /// Edge-triggered: the turn became a specific seat.
    TurnBecame { seat: Seat },

    /// Edge-triggered: Lobby -> InitialFlip
    InitialFlipStarted,

    /// Edge-triggered: InitialFlip -> ActivePlay
    ActivePlayStarted,

    /// Edge-triggered: a grid was fully revealed; `final_turn_player` gets one last turn.
    FinalRoundStarted { final_turn_player: Seat },

    /// Edge-triggered: the game finished.
    GameEnded {
        winner: Seat,
        scores: [i16; PLAYERS],
    },
}

/// Derive domain transitions from before/after game state.
pub fn derive_game_transitions(before: &GameState, after: &GameState) -> Vec<GameTransition> {
    let mut transitions = Vec::new();
    let (was, now) = (before.phase.kind(), after.phase.kind());

    if was != PhaseKind::InitialFlip && now == PhaseKind::InitialFlip {
        transitions.push(GameTransition::InitialFlipStarted);
    }
    if was != PhaseKind::ActivePlay && now == PhaseKind::ActivePlay {
        transitions.push(GameTransition::ActivePlayStarted);
    }
    if let (None, Some(final_turn_player)) =
        (before.final_turn_player(), after.final_turn_player())
    {
        transitions.push(GameTransition::FinalRoundStarted { final_turn_player });
    }

    if let (_, Some(seat)) = (before.current_player(), after.current_player()) {
        if before.current_player() != Some(seat) || was != now {
            transitions.push(GameTransition::TurnBecame { seat });
        }
    }

    if let (None, Some(result)) = (before.result(), after.result()) {
        transitions.push(GameTransition::GameEnded {
            winner: result.winner,
            scores: result.scores,
        });
    }

    transitions
}
