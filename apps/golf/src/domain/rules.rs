use serde::{Deserialize, Serialize};

use crate::domain::Suit;

pub const PLAYERS: usize = 2;
pub const GRID_SIZE: usize = 6;
pub const GRID_COLS: usize = 3;
pub const INITIAL_FLIPS: u8 = 2;
pub const STANDARD_DECK_SIZE: usize = 52;
/// Cards dealt face-down to each player.
pub const CARDS_PER_PLAYER: usize = GRID_SIZE;

/// How jokers enter the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JokerRules {
    /// Plain 52-card deck.
    None,
    /// Two jokers without a suit.
    Suitless,
    /// Two jokers, one paired with hearts and one with spades.
    #[default]
    TwoSuits,
    /// One joker per suit.
    AllSuits,
}

impl JokerRules {
    /// Suits carried by the jokers this ruleset appends (`None` = suit-less joker).
    pub fn joker_suits(self) -> Vec<Option<Suit>> {
        match self {
            JokerRules::None => Vec::new(),
            JokerRules::Suitless => vec![None, None],
            JokerRules::TwoSuits => vec![Some(Suit::Hearts), Some(Suit::Spades)],
            JokerRules::AllSuits => Suit::DECK_ORDER.iter().copied().map(Some).collect(),
        }
    }

    pub fn joker_count(self) -> usize {
        match self {
            JokerRules::None => 0,
            JokerRules::Suitless | JokerRules::TwoSuits => 2,
            JokerRules::AllSuits => 4,
        }
    }
}

/// What a Discard resolution does to the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardRule {
    /// The player must flip one face-down cell before the turn rotates.
    /// With a single face-down cell left the flip happens as part of the discard.
    #[default]
    RequireFlip,
    /// Discarding always ends the turn.
    EndsTurn,
}

/// Rules both peers must agree on; carried inside every snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ruleset {
    pub jokers: JokerRules,
    pub discard: DiscardRule,
}

impl Ruleset {
    pub fn deck_size(&self) -> usize {
        STANDARD_DECK_SIZE + self.jokers.joker_count()
    }
}
