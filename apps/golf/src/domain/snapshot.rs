//! The synchronized snapshot: the one document peers exchange.
//!
//! [`snapshot`] flattens a [`GameState`] into the wire shape. Going the other
//! way, [`GameState::try_from`] re-checks every structural invariant so a
//! malformed document fails fast with `DataCorruption` instead of reaching the
//! engine.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::deck::build_deck;
use crate::domain::grid::Grid;
use crate::domain::rules::{Ruleset, INITIAL_FLIPS, PLAYERS};
use crate::domain::scoring::{determine_winner, total_score};
use crate::domain::state::{
    other_seat, GameResult, GameState, Phase, PhaseKind, Player, Seat, Table, Turn, TurnStep,
};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::DomainError;

/// A seated player and their grid (empty before the deal).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub cards: Vec<Card>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Store-assigned version; bumped on every accepted save.
    pub version: u64,
    pub rules: Ruleset,
    pub rng_seed: u64,
    pub players: Vec<PlayerSnapshot>,
    pub deck: Vec<Card>,
    pub discard_pile: Vec<Card>,
    pub current_player_index: Seat,
    pub drawn_card: Option<Card>,
    /// Set after a Discard while a face-down flip is still owed.
    #[serde(default)]
    pub awaiting_flip: bool,
    pub initial_flips_remaining: [u8; PLAYERS],
    pub phase: PhaseKind,
    pub game_started: bool,
    pub game_ended: bool,
    pub final_turn_player: Option<Seat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<[i16; PLAYERS]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Seat>,
}

/// Flatten `state` into its wire form at `version`.
pub fn snapshot(state: &GameState, version: u64) -> GameSnapshot {
    let table = state.table();
    let players = state
        .players
        .iter()
        .enumerate()
        .map(|(seat, p)| PlayerSnapshot {
            id: p.id.clone(),
            name: p.name.clone(),
            ready: p.ready,
            cards: table
                .and_then(|t| t.grids.get(seat))
                .map(|g| g.cells().to_vec())
                .unwrap_or_default(),
        })
        .collect();

    let initial_flips_remaining = match &state.phase {
        Phase::InitialFlip {
            flips_remaining, ..
        } => *flips_remaining,
        Phase::Lobby => [INITIAL_FLIPS; PLAYERS],
        _ => [0; PLAYERS],
    };
    let turn = state.turn();
    let result = state.result();

    GameSnapshot {
        version,
        rules: state.rules,
        rng_seed: state.rng_seed,
        players,
        deck: table.map(|t| t.deck.clone()).unwrap_or_default(),
        discard_pile: table.map(|t| t.discard_pile.clone()).unwrap_or_default(),
        current_player_index: state.current_player().unwrap_or(0),
        drawn_card: state.drawn_card(),
        awaiting_flip: turn.is_some_and(|t| t.step == TurnStep::AwaitingFlip),
        initial_flips_remaining,
        phase: state.phase.kind(),
        game_started: !matches!(state.phase, Phase::Lobby),
        game_ended: state.is_over(),
        final_turn_player: state.final_turn_player(),
        scores: result.map(|r| r.scores),
        winner: result.map(|r| r.winner),
    }
}

impl GameSnapshot {
    /// Decode and validate a stored JSON document.
    pub fn from_json(value: serde_json::Value) -> Result<Self, DomainError> {
        let snap: GameSnapshot = serde_json::from_value(value)
            .map_err(|e| DomainError::corrupt(format!("Malformed snapshot: {e}")))?;
        GameState::try_from(&snap)?;
        Ok(snap)
    }

    pub fn to_json(&self) -> Result<serde_json::Value, DomainError> {
        serde_json::to_value(self)
            .map_err(|e| DomainError::corrupt(format!("Snapshot serialization failed: {e}")))
    }

    /// Validate and convert into an engine state.
    pub fn to_state(&self) -> Result<GameState, DomainError> {
        GameState::try_from(self)
    }
}

impl TryFrom<&GameSnapshot> for GameState {
    type Error = DomainError;

    fn try_from(snap: &GameSnapshot) -> Result<Self, Self::Error> {
        check(snap.players.len() <= PLAYERS, || {
            format!("At most {PLAYERS} players, got {}", snap.players.len())
        })?;
        check(snap.game_ended == (snap.phase == PhaseKind::GameOver), || {
            "gameEnded disagrees with phase".to_string()
        })?;
        check(snap.game_started == (snap.phase != PhaseKind::Lobby), || {
            "gameStarted disagrees with phase".to_string()
        })?;
        check(snap.drawn_card.is_none() || !snap.awaiting_flip, || {
            "drawnCard and awaitingFlip are mutually exclusive".to_string()
        })?;

        let players = snap
            .players
            .iter()
            .map(|p| Player {
                id: p.id.clone(),
                name: p.name.clone(),
                ready: p.ready,
            })
            .collect();

        let phase = if snap.phase == PhaseKind::Lobby {
            check(
                snap.players.iter().all(|p| p.cards.is_empty())
                    && snap.deck.is_empty()
                    && snap.discard_pile.is_empty()
                    && snap.drawn_card.is_none()
                    && !snap.awaiting_flip
                    && snap.final_turn_player.is_none(),
                || "Lobby snapshot carries dealt cards".to_string(),
            )?;
            Phase::Lobby
        } else {
            phase_from_snapshot(snap, restore_table(snap)?)?
        };

        let state = GameState {
            players,
            rules: snap.rules,
            rng_seed: snap.rng_seed,
            phase,
        };
        if state.table().is_some() {
            let expected = snap.rules.deck_size();
            check(state.card_count() == expected, || {
                format!(
                    "Card count {} does not match deck size {expected}",
                    state.card_count()
                )
            })?;
            check_card_identities(&state)?;
        }
        Ok(state)
    }
}

/// Every card of the ruleset's deck appears exactly once.
fn check_card_identities(state: &GameState) -> Result<(), DomainError> {
    let mut counts: HashMap<(Rank, Option<Suit>), i32> = HashMap::new();
    for card in build_deck(state.rules.jokers) {
        *counts.entry((card.rank, card.suit)).or_default() += 1;
    }
    for card in state.all_cards() {
        let slot = counts.entry((card.rank, card.suit)).or_default();
        *slot -= 1;
        check(*slot >= 0, || {
            let suit = card.suit.as_ref().map_or("", Suit::as_token);
            format!("Card {}{suit} appears too often", card.rank.as_token())
        })?;
    }
    Ok(())
}

fn restore_table(snap: &GameSnapshot) -> Result<Table, DomainError> {
    check(snap.players.len() == PLAYERS, || {
        format!("Dealt game needs {PLAYERS} players, got {}", snap.players.len())
    })?;
    check(snap.discard_pile.iter().all(|c| c.face_up), || {
        "Discard pile holds a face-down card".to_string()
    })?;
    let mut grids = Vec::with_capacity(PLAYERS);
    for p in &snap.players {
        grids.push(Grid::try_from(p.cards.clone())?);
    }
    let grids: [Grid; PLAYERS] = grids
        .try_into()
        .map_err(|_| DomainError::corrupt("Wrong number of grids"))?;
    Ok(Table {
        grids,
        deck: snap.deck.clone(),
        discard_pile: snap.discard_pile.clone(),
    })
}

fn phase_from_snapshot(snap: &GameSnapshot, table: Table) -> Result<Phase, DomainError> {
    let seat = snap.current_player_index;
    check((seat as usize) < PLAYERS, || {
        format!("currentPlayerIndex {seat} out of range")
    })?;
    if snap.phase != PhaseKind::InitialFlip {
        check(snap.initial_flips_remaining == [0; PLAYERS], || {
            "Initial flips still owed after the opening".to_string()
        })?;
    }
    if snap.phase != PhaseKind::FinalRound {
        check(snap.final_turn_player.is_none(), || {
            "finalTurnPlayer set outside the final round".to_string()
        })?;
    }

    match snap.phase {
        PhaseKind::InitialFlip => {
            check(snap.drawn_card.is_none() && !snap.awaiting_flip, || {
                "No card may be held during initial flips".to_string()
            })?;
            let remaining = snap.initial_flips_remaining;
            for (grid, left) in table.grids.iter().zip(remaining) {
                check(
                    left <= INITIAL_FLIPS
                        && grid.face_up_count() == usize::from(INITIAL_FLIPS - left),
                    || "initialFlipsRemaining disagrees with revealed cards".to_string(),
                )?;
            }
            check(remaining[seat as usize] > 0, || {
                "Seat to act has no initial flips left".to_string()
            })?;
            Ok(Phase::InitialFlip {
                table,
                to_act: seat,
                flips_remaining: remaining,
            })
        }
        PhaseKind::ActivePlay => {
            check(table.grids.iter().all(|g| !g.all_face_up()), || {
                "Fully revealed grid outside the final round".to_string()
            })?;
            let turn = restore_turn(snap, &table, seat)?;
            Ok(Phase::ActivePlay { table, turn })
        }
        PhaseKind::FinalRound => {
            let final_turn_player = snap
                .final_turn_player
                .ok_or_else(|| DomainError::corrupt("Final round without finalTurnPlayer"))?;
            check(final_turn_player == seat, || {
                "Only the final-turn player acts in the final round".to_string()
            })?;
            check(
                table.grid(other_seat(final_turn_player)).all_face_up()
                    && !table.grid(final_turn_player).all_face_up(),
                || "Final round without exactly one fully revealed grid".to_string(),
            )?;
            let turn = restore_turn(snap, &table, seat)?;
            Ok(Phase::FinalRound {
                table,
                turn,
                final_turn_player,
            })
        }
        PhaseKind::GameOver => {
            check(snap.drawn_card.is_none() && !snap.awaiting_flip, || {
                "Finished game still has a turn in progress".to_string()
            })?;
            let mut scores = [0i16; PLAYERS];
            for (score, grid) in scores.iter_mut().zip(table.grids.iter()) {
                *score = total_score(grid)
                    .ok_or_else(|| DomainError::corrupt("Finished game has face-down cards"))?;
            }
            let winner = determine_winner(&scores);
            check(
                snap.scores.map_or(true, |s| s == scores)
                    && snap.winner.map_or(true, |w| w == winner),
                || "Stored result disagrees with the grids".to_string(),
            )?;
            Ok(Phase::GameOver {
                table,
                result: GameResult { scores, winner },
            })
        }
        PhaseKind::Lobby => Err(DomainError::corrupt("Lobby has no table")),
    }
}

fn restore_turn(snap: &GameSnapshot, table: &Table, seat: Seat) -> Result<Turn, DomainError> {
    let step = match (snap.drawn_card, snap.awaiting_flip) {
        (Some(card), _) => {
            check(card.face_up, || "Held card must be face-up".to_string())?;
            TurnStep::Holding(card)
        }
        (None, true) => {
            check(table.grid(seat).face_down_count() > 0, || {
                "Flip owed but no face-down cell remains".to_string()
            })?;
            TurnStep::AwaitingFlip
        }
        (None, false) => TurnStep::AwaitingDraw,
    };
    Ok(Turn { player: seat, step })
}

fn check(ok: bool, detail: impl FnOnce() -> String) -> Result<(), DomainError> {
    if ok {
        Ok(())
    } else {
        Err(DomainError::corrupt(detail()))
    }
}
