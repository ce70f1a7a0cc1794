//! Turn state machine.
//!
//! Every entry point is a pure reducer: it borrows the current state, works on
//! a clone and hands back the next state plus the event describing what
//! happened. A rejected action leaves the caller's state untouched.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::deck::{build_deck, deal, reshuffle_if_exhausted, shuffle};
use crate::domain::rules::{DiscardRule, INITIAL_FLIPS, PLAYERS};
use crate::domain::scoring::{determine_winner, total_score};
use crate::domain::state::{
    other_seat, require_seat, GameResult, GameState, Phase, Seat, Table, Turn, TurnStep,
};
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawSource {
    Deck,
    Discard,
}

/// How a held card is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Resolution {
    Swap { cell: usize },
    Discard,
}

/// Every action a player can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum Action {
    FlipInitial { cell: usize },
    Draw { source: DrawSource },
    Swap { cell: usize },
    Discard,
    Flip { cell: usize },
}

/// What an accepted action did, for logs and presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEvent {
    InitialCardFlipped {
        seat: Seat,
        cell: usize,
        card: Card,
    },
    CardDrawn {
        seat: Seat,
        source: DrawSource,
        card: Card,
    },
    /// Deck was empty; the discard pile was recycled and no card was drawn.
    DeckReshuffled { seat: Seat, deck_len: usize },
    CardSwapped {
        seat: Seat,
        cell: usize,
        placed: Card,
        discarded: Card,
    },
    DrawnCardDiscarded {
        seat: Seat,
        card: Card,
        /// Last face-down cell revealed as part of the discard.
        forced_flip: Option<(usize, Card)>,
    },
    CardFlipped {
        seat: Seat,
        cell: usize,
        card: Card,
    },
}

/// Successful reducer output.
#[derive(Debug, Clone)]
pub struct Applied {
    pub state: GameState,
    pub event: ActionEvent,
}

/// Build, shuffle and deal a fresh deck for a seated lobby.
///
/// The transient "dealt" moment is folded in: the returned state is already
/// in `InitialFlip` with seat 0 to act.
pub fn deal_new_game<R: Rng + ?Sized>(
    state: &GameState,
    rng: &mut R,
) -> Result<GameState, DomainError> {
    match state.phase {
        Phase::Lobby => {}
        Phase::GameOver { .. } => return Err(game_ended()),
        _ => {
            return Err(DomainError::validation(
                ValidationKind::InvalidPhaseAction,
                "Game has already been dealt",
            ))
        }
    }
    if state.players.len() != PLAYERS {
        return Err(DomainError::validation(
            ValidationKind::NotEnoughPlayers,
            format!("Need {PLAYERS} seated players, have {}", state.players.len()),
        ));
    }

    let deck = shuffle(&build_deck(state.rules.jokers), rng);
    let dealt = deal(deck)?;
    let mut next = state.clone();
    next.phase = Phase::InitialFlip {
        table: Table {
            grids: dealt.grids,
            deck: dealt.deck,
            discard_pile: dealt.discard_pile,
        },
        to_act: 0,
        flips_remaining: [INITIAL_FLIPS; PLAYERS],
    };
    info!(deck_size = state.rules.deck_size(), "Dealt new game");
    Ok(next)
}

/// Reveal one of the acting player's two opening cards.
pub fn flip_initial_card(
    state: &GameState,
    seat: Seat,
    cell: usize,
) -> Result<Applied, DomainError> {
    let seat = require_seat(seat)?;
    let mut next = state.clone();
    let Phase::InitialFlip {
        table,
        to_act,
        flips_remaining,
    } = &mut next.phase
    else {
        return Err(wrong_phase(&state.phase, "Initial flips are over"));
    };
    ensure_turn(*to_act, seat)?;

    let grid = table.grid_mut(seat);
    let target = *grid.card(cell)?;
    if target.face_up {
        return Err(DomainError::validation(
            ValidationKind::AlreadyFaceUp,
            format!("Cell {cell} is already face-up"),
        ));
    }
    if grid.has_face_up_rank(target.rank) {
        return Err(DomainError::validation(
            ValidationKind::DuplicateRankInInitialFlip,
            "Both opening cards cannot share a rank",
        ));
    }
    let card = grid.flip(cell)?;

    let idx = seat as usize;
    flips_remaining[idx] = flips_remaining[idx].saturating_sub(1);
    let other = other_seat(seat);
    let all_done = flips_remaining.iter().all(|&n| n == 0);
    if !all_done && flips_remaining[other as usize] > 0 {
        *to_act = other;
    }
    if all_done {
        if let Phase::InitialFlip { table, .. } = std::mem::replace(&mut next.phase, Phase::Lobby) {
            next.phase = Phase::ActivePlay {
                table,
                turn: Turn::start(0),
            };
        }
        info!("Initial flips complete, active play begins");
    }

    debug!(seat, cell, "Initial card flipped");
    Ok(Applied {
        state: next,
        event: ActionEvent::InitialCardFlipped { seat, cell, card },
    })
}

/// Take a card into hand from the deck or the discard pile.
///
/// Drawing from an empty deck recycles the discard pile instead and returns
/// [`ActionEvent::DeckReshuffled`]; the player then draws again.
pub fn draw_card<R: Rng + ?Sized>(
    state: &GameState,
    seat: Seat,
    source: DrawSource,
    rng: &mut R,
) -> Result<Applied, DomainError> {
    let seat = require_seat(seat)?;
    let mut next = state.clone();
    let (table, turn) = active_turn(&mut next.phase)?;
    ensure_turn(turn.player, seat)?;
    match turn.step {
        TurnStep::AwaitingDraw => {}
        TurnStep::Holding(_) => {
            return Err(DomainError::validation(
                ValidationKind::AlreadyHoldingDrawnCard,
                "A drawn card is already held this turn",
            ))
        }
        TurnStep::AwaitingFlip => {
            return Err(DomainError::validation(
                ValidationKind::InvalidPhaseAction,
                "Flip a face-down card to finish the turn",
            ))
        }
    }

    let card = match source {
        DrawSource::Discard => table.discard_pile.pop().ok_or_else(|| {
            DomainError::validation(ValidationKind::EmptyDiscardPile, "Discard pile is empty")
        })?,
        DrawSource::Deck => match table.deck.pop() {
            Some(card) => card,
            None => {
                let (deck, pile) = reshuffle_if_exhausted(
                    std::mem::take(&mut table.deck),
                    std::mem::take(&mut table.discard_pile),
                    rng,
                )?;
                table.deck = deck;
                table.discard_pile = pile;
                let deck_len = table.deck.len();
                info!(seat, deck_len, "Deck exhausted, discard pile reshuffled");
                return Ok(Applied {
                    state: next,
                    event: ActionEvent::DeckReshuffled { seat, deck_len },
                });
            }
        },
    }
    .revealed();

    turn.step = TurnStep::Holding(card);
    debug!(seat, ?source, "Card drawn");
    Ok(Applied {
        state: next,
        event: ActionEvent::CardDrawn { seat, source, card },
    })
}

/// Commit the held card by swapping it into the grid or discarding it.
pub fn resolve_draw(
    state: &GameState,
    seat: Seat,
    resolution: Resolution,
) -> Result<Applied, DomainError> {
    let seat = require_seat(seat)?;
    let discard_rule = state.rules.discard;
    let mut next = state.clone();
    let (table, turn) = active_turn(&mut next.phase)?;
    ensure_turn(turn.player, seat)?;
    let Some(held) = turn.held_card() else {
        return Err(DomainError::validation(
            ValidationKind::NoDrawnCard,
            "No drawn card to resolve",
        ));
    };

    let (event, ends_turn) = match resolution {
        Resolution::Swap { cell } => {
            let previous = table.grid_mut(seat).replace(cell, held)?;
            let discarded = previous.revealed();
            table.discard_pile.push(discarded);
            (
                ActionEvent::CardSwapped {
                    seat,
                    cell,
                    placed: held.revealed(),
                    discarded,
                },
                true,
            )
        }
        Resolution::Discard => {
            table.discard_pile.push(held.revealed());
            let grid = table.grid_mut(seat);
            let face_down: Vec<usize> = grid.face_down_cells().collect();
            let (forced_flip, ends_turn) = match (discard_rule, face_down.as_slice()) {
                (DiscardRule::EndsTurn, _) | (DiscardRule::RequireFlip, []) => (None, true),
                (DiscardRule::RequireFlip, [only]) => {
                    let card = grid.flip(*only)?;
                    (Some((*only, card)), true)
                }
                (DiscardRule::RequireFlip, _) => (None, false),
            };
            (
                ActionEvent::DrawnCardDiscarded {
                    seat,
                    card: held.revealed(),
                    forced_flip,
                },
                ends_turn,
            )
        }
    };

    if ends_turn {
        end_turn(&mut next)?;
    } else {
        turn.step = TurnStep::AwaitingFlip;
    }
    debug!(seat, ?resolution, "Drawn card resolved");
    Ok(Applied { state: next, event })
}

/// Flip a face-down cell to finish a turn that ended in a Discard.
pub fn flip_card(state: &GameState, seat: Seat, cell: usize) -> Result<Applied, DomainError> {
    let seat = require_seat(seat)?;
    let mut next = state.clone();
    let (table, turn) = active_turn(&mut next.phase)?;
    ensure_turn(turn.player, seat)?;
    if turn.step != TurnStep::AwaitingFlip {
        return Err(DomainError::validation(
            ValidationKind::InvalidPhaseAction,
            "No flip is pending this turn",
        ));
    }
    let card = table.grid_mut(seat).flip(cell)?;
    end_turn(&mut next)?;
    debug!(seat, cell, "Card flipped");
    Ok(Applied {
        state: next,
        event: ActionEvent::CardFlipped { seat, cell, card },
    })
}

/// Dispatch an [`Action`] to its reducer.
pub fn apply_action<R: Rng + ?Sized>(
    state: &GameState,
    seat: Seat,
    action: Action,
    rng: &mut R,
) -> Result<Applied, DomainError> {
    match action {
        Action::FlipInitial { cell } => flip_initial_card(state, seat, cell),
        Action::Draw { source } => draw_card(state, seat, source, rng),
        Action::Swap { cell } => resolve_draw(state, seat, Resolution::Swap { cell }),
        Action::Discard => resolve_draw(state, seat, Resolution::Discard),
        Action::Flip { cell } => flip_card(state, seat, cell),
    }
}

/// Rotate the turn, entering the final round or ending the game as needed.
fn end_turn(state: &mut GameState) -> Result<(), DomainError> {
    let phase = std::mem::replace(&mut state.phase, Phase::Lobby);
    state.phase = match phase {
        Phase::ActivePlay { table, turn } => {
            let next = other_seat(turn.player);
            if table.grid(turn.player).all_face_up() {
                info!(
                    seat = turn.player,
                    final_turn_player = next,
                    "Grid fully revealed, final round begins"
                );
                Phase::FinalRound {
                    table,
                    turn: Turn::start(next),
                    final_turn_player: next,
                }
            } else {
                Phase::ActivePlay {
                    table,
                    turn: Turn::start(next),
                }
            }
        }
        Phase::FinalRound {
            table,
            turn,
            final_turn_player,
        } if turn.player == final_turn_player => finish_game(table)?,
        other => {
            state.phase = other;
            return Err(DomainError::validation_other(
                "Turn cannot end outside of active play",
            ));
        }
    };
    Ok(())
}

fn finish_game(mut table: Table) -> Result<Phase, DomainError> {
    for grid in table.grids.iter_mut() {
        grid.reveal_all();
    }
    let mut scores = [0i16; PLAYERS];
    for (score, grid) in scores.iter_mut().zip(table.grids.iter()) {
        *score = total_score(grid)
            .ok_or_else(|| DomainError::validation_other("Grid not fully revealed at game end"))?;
    }
    let winner = determine_winner(&scores);
    info!(?scores, winner, "Game over");
    Ok(Phase::GameOver {
        table,
        result: GameResult { scores, winner },
    })
}

fn active_turn(phase: &mut Phase) -> Result<(&mut Table, &mut Turn), DomainError> {
    match phase {
        Phase::ActivePlay { table, turn } | Phase::FinalRound { table, turn, .. } => {
            Ok((table, turn))
        }
        other => Err(wrong_phase(other, "Only allowed during play")),
    }
}

fn ensure_turn(expected: Seat, seat: Seat) -> Result<(), DomainError> {
    if expected == seat {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::NotYourTurn,
            format!("It is seat {expected}'s turn"),
        ))
    }
}

fn wrong_phase(phase: &Phase, detail: &str) -> DomainError {
    match phase {
        Phase::GameOver { .. } => game_ended(),
        _ => DomainError::validation(
            ValidationKind::InvalidPhaseAction,
            format!("{detail} (phase {:?})", phase.kind()),
        ),
    }
}

fn game_ended() -> DomainError {
    DomainError::validation(ValidationKind::GameAlreadyEnded, "The game is over")
}
