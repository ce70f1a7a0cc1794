use serde::{Deserialize, Serialize};

use crate::domain::grid::Grid;
use crate::domain::rules::{Ruleset, GRID_SIZE, PLAYERS};
use crate::domain::Card;
use crate::errors::domain::{DomainError, ValidationKind};

pub type Seat = u8; // 0..=1

/// A seated participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Opaque identifier chosen by the client.
    pub id: String,
    pub name: String,
    pub ready: bool,
}

/// Cards in play once the game has been dealt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub grids: [Grid; PLAYERS],
    /// Face-down draw pile; draws take the last element.
    pub deck: Vec<Card>,
    /// Face-up pile; the last element is the top.
    pub discard_pile: Vec<Card>,
}

impl Table {
    pub fn top_discard(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    pub fn card_count(&self) -> usize {
        PLAYERS * GRID_SIZE + self.deck.len() + self.discard_pile.len()
    }

    pub fn grid(&self, seat: Seat) -> &Grid {
        &self.grids[seat as usize]
    }

    pub fn grid_mut(&mut self, seat: Seat) -> &mut Grid {
        &mut self.grids[seat as usize]
    }
}

/// Where the acting player is within their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStep {
    AwaitingDraw,
    /// Drawn card held in hand, waiting for Swap or Discard.
    Holding(Card),
    /// Discarded the drawn card; one face-down cell must be flipped.
    AwaitingFlip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub player: Seat,
    pub step: TurnStep,
}

impl Turn {
    pub fn start(player: Seat) -> Self {
        Self {
            player,
            step: TurnStep::AwaitingDraw,
        }
    }

    pub fn held_card(&self) -> Option<Card> {
        match self.step {
            TurnStep::Holding(card) => Some(card),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub scores: [i16; PLAYERS],
    pub winner: Seat,
}

/// Game progression. Data that only exists in some phases lives in the
/// variant, so a held card outside a turn or scores before the end cannot be
/// represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Seating players; nothing dealt yet.
    Lobby,
    /// Each player reveals two cards, alternating one flip at a time.
    InitialFlip {
        table: Table,
        to_act: Seat,
        flips_remaining: [u8; PLAYERS],
    },
    ActivePlay {
        table: Table,
        turn: Turn,
    },
    /// Someone revealed their whole grid; `final_turn_player` gets one last turn.
    FinalRound {
        table: Table,
        turn: Turn,
        final_turn_player: Seat,
    },
    GameOver {
        table: Table,
        result: GameResult,
    },
}

/// Phase discriminant as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhaseKind {
    Lobby,
    InitialFlip,
    ActivePlay,
    FinalRound,
    GameOver,
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Lobby => PhaseKind::Lobby,
            Phase::InitialFlip { .. } => PhaseKind::InitialFlip,
            Phase::ActivePlay { .. } => PhaseKind::ActivePlay,
            Phase::FinalRound { .. } => PhaseKind::FinalRound,
            Phase::GameOver { .. } => PhaseKind::GameOver,
        }
    }
}

/// Entire game container, sufficient for pure domain operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Seated players in seat order (at most two).
    pub players: Vec<Player>,
    pub rules: Ruleset,
    /// Base seed every shuffle of this game derives from.
    pub rng_seed: u64,
    pub phase: Phase,
}

impl GameState {
    pub fn new_lobby(rules: Ruleset, rng_seed: u64) -> Self {
        Self {
            players: Vec::with_capacity(PLAYERS),
            rules,
            rng_seed,
            phase: Phase::Lobby,
        }
    }

    pub fn table(&self) -> Option<&Table> {
        match &self.phase {
            Phase::Lobby => None,
            Phase::InitialFlip { table, .. }
            | Phase::ActivePlay { table, .. }
            | Phase::FinalRound { table, .. }
            | Phase::GameOver { table, .. } => Some(table),
        }
    }

    pub fn turn(&self) -> Option<&Turn> {
        match &self.phase {
            Phase::ActivePlay { turn, .. } | Phase::FinalRound { turn, .. } => Some(turn),
            _ => None,
        }
    }

    /// Seat expected to act next, if anyone.
    pub fn current_player(&self) -> Option<Seat> {
        match &self.phase {
            Phase::InitialFlip { to_act, .. } => Some(*to_act),
            Phase::ActivePlay { turn, .. } | Phase::FinalRound { turn, .. } => Some(turn.player),
            Phase::Lobby | Phase::GameOver { .. } => None,
        }
    }

    pub fn drawn_card(&self) -> Option<Card> {
        self.turn().and_then(Turn::held_card)
    }

    pub fn final_turn_player(&self) -> Option<Seat> {
        match &self.phase {
            Phase::FinalRound {
                final_turn_player, ..
            } => Some(*final_turn_player),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&GameResult> {
        match &self.phase {
            Phase::GameOver { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    /// Every physical card in the game, including one held in hand.
    pub fn card_count(&self) -> usize {
        self.table().map_or(0, Table::card_count) + usize::from(self.drawn_card().is_some())
    }

    /// Every card in play: grids, deck, discard pile and the held card.
    pub fn all_cards(&self) -> Vec<Card> {
        let mut out = Vec::with_capacity(self.card_count());
        if let Some(table) = self.table() {
            for grid in &table.grids {
                out.extend_from_slice(grid.cells());
            }
            out.extend_from_slice(&table.deck);
            out.extend_from_slice(&table.discard_pile);
        }
        out.extend(self.drawn_card());
        out
    }

    pub fn seat_of(&self, player_id: &str) -> Option<Seat> {
        self.players
            .iter()
            .position(|p| p.id == player_id)
            .map(|i| i as Seat)
    }
}

/// The opponent's seat.
#[inline]
pub fn other_seat(seat: Seat) -> Seat {
    (seat + 1) % PLAYERS as Seat
}

pub fn require_seat(seat: Seat) -> Result<Seat, DomainError> {
    if (seat as usize) < PLAYERS {
        Ok(seat)
    } else {
        Err(DomainError::validation(
            ValidationKind::InvalidSeat,
            format!("Seat {seat} out of range 0..{PLAYERS}"),
        ))
    }
}
