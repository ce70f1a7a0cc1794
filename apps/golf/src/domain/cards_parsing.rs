//! Parsing of the rank and suit tokens used in snapshots.

use std::str::FromStr;

use crate::domain::{Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

impl Rank {
    pub const fn as_token(&self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Joker => "JOKER",
        }
    }
}

impl Suit {
    pub const fn as_token(&self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Clubs => "♣",
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
        }
    }
}

impl FromStr for Rank {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s {
            "A" => Rank::Ace,
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "JOKER" => Rank::Joker,
            _ => {
                return Err(DomainError::validation(
                    ValidationKind::ParseCard,
                    format!("Invalid rank: {s}"),
                ))
            }
        };
        Ok(rank)
    }
}

impl FromStr for Suit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "♠" => Ok(Suit::Spades),
            "♣" => Ok(Suit::Clubs),
            "♥" => Ok(Suit::Hearts),
            "♦" => Ok(Suit::Diamonds),
            _ => Err(DomainError::validation(
                ValidationKind::ParseCard,
                format!("Invalid suit: {s}"),
            )),
        }
    }
}

/// Parse an optional suit token; the empty string marks a suit-less joker.
pub fn parse_optional_suit(s: &str) -> Result<Option<Suit>, DomainError> {
    if s.is_empty() {
        return Ok(None);
    }
    s.parse().map(Some)
}
