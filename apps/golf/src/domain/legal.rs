//! Enumeration of the actions the engine will accept.

use crate::domain::rules::GRID_SIZE;
use crate::domain::state::{GameState, Phase, Seat, TurnStep};
use crate::domain::turns::{Action, DrawSource};

/// Every action `seat` may submit right now. Empty when it is not their turn.
pub fn legal_actions(state: &GameState, seat: Seat) -> Vec<Action> {
    match &state.phase {
        Phase::InitialFlip { table, to_act, .. } if *to_act == seat => {
            let grid = table.grid(seat);
            grid.face_down_cells()
                .filter(|&cell| !grid.has_face_up_rank(grid.cells()[cell].rank))
                .map(|cell| Action::FlipInitial { cell })
                .collect()
        }
        Phase::ActivePlay { table, turn } | Phase::FinalRound { table, turn, .. }
            if turn.player == seat =>
        {
            match turn.step {
                TurnStep::AwaitingDraw => {
                    let mut out = Vec::with_capacity(2);
                    if !table.deck.is_empty() || table.discard_pile.len() > 1 {
                        out.push(Action::Draw {
                            source: DrawSource::Deck,
                        });
                    }
                    if !table.discard_pile.is_empty() {
                        out.push(Action::Draw {
                            source: DrawSource::Discard,
                        });
                    }
                    out
                }
                TurnStep::Holding(_) => (0..GRID_SIZE)
                    .map(|cell| Action::Swap { cell })
                    .chain(std::iter::once(Action::Discard))
                    .collect(),
                TurnStep::AwaitingFlip => table
                    .grid(seat)
                    .face_down_cells()
                    .map(|cell| Action::Flip { cell })
                    .collect(),
            }
        }
        _ => Vec::new(),
    }
}
