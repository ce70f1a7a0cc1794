//! Core card-related types: Card, Rank, Suit

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Spades,
    Clubs,
    Hearts,
    Diamonds,
}

impl Suit {
    /// Order used when building a fresh deck.
    pub const DECK_ORDER: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Joker,
}

impl Rank {
    /// Every rank dealt once per suit.
    pub const STANDARD: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];
}

/// A physical card. Orientation is the only state that changes, and only
/// ever from face-down to face-up.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub rank: Rank,
    /// `None` only for suit-less jokers.
    pub suit: Option<Suit>,
    pub face_up: bool,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit: Some(suit),
            face_up: false,
        }
    }

    pub const fn joker(suit: Option<Suit>) -> Self {
        Self {
            rank: Rank::Joker,
            suit,
            face_up: false,
        }
    }

    /// The same card turned face-up.
    pub const fn revealed(self) -> Self {
        Self {
            face_up: true,
            ..self
        }
    }

    /// Rank and suit equality, ignoring orientation.
    pub fn same_face(&self, other: &Card) -> bool {
        self.rank == other.rank && self.suit == other.suit
    }
}
