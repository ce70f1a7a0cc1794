//! Deck construction, shuffling, dealing and discard recycling.

use rand::Rng;
use tracing::debug;

use crate::domain::grid::Grid;
use crate::domain::rules::{JokerRules, CARDS_PER_PLAYER, PLAYERS};
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// Fresh face-down deck: every suit A..K, then the jokers the ruleset calls for.
pub fn build_deck(jokers: JokerRules) -> Vec<Card> {
    let mut deck = Vec::with_capacity(Rank::STANDARD.len() * Suit::DECK_ORDER.len() + 4);
    for suit in Suit::DECK_ORDER {
        for rank in Rank::STANDARD {
            deck.push(Card::new(rank, suit));
        }
    }
    deck.extend(jokers.joker_suits().into_iter().map(Card::joker));
    deck
}

/// Fisher-Yates shuffle into a new vector; the input is left untouched.
pub fn shuffle<R: Rng + ?Sized>(cards: &[Card], rng: &mut R) -> Vec<Card> {
    let mut out = cards.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// Result of dealing a shuffled deck.
#[derive(Debug, Clone)]
pub struct Deal {
    pub grids: [Grid; PLAYERS],
    pub deck: Vec<Card>,
    pub discard_pile: Vec<Card>,
}

/// Deal six cards to each seat from the front of `deck`, then turn the next
/// card face-up to start the discard pile. Draws later come from the tail.
pub fn deal(mut deck: Vec<Card>) -> Result<Deal, DomainError> {
    let needed = CARDS_PER_PLAYER * PLAYERS + 1;
    if deck.len() < needed {
        return Err(DomainError::validation(
            ValidationKind::DeckExhausted,
            format!("Need {needed} cards to deal, deck has {}", deck.len()),
        ));
    }

    let mut grids = Vec::with_capacity(PLAYERS);
    for _ in 0..PLAYERS {
        let cells: Vec<Card> = deck
            .drain(..CARDS_PER_PLAYER)
            .map(|c| Card { face_up: false, ..c })
            .collect();
        grids.push(Grid::try_from(cells)?);
    }
    let starter = deck.remove(0).revealed();
    let grids: [Grid; PLAYERS] = grids
        .try_into()
        .map_err(|_| DomainError::validation_other("Dealt wrong number of grids"))?;

    Ok(Deal {
        grids,
        deck,
        discard_pile: vec![starter],
    })
}

/// Refill an empty deck from the discard pile.
///
/// The top discard stays put and everything beneath it is shuffled into the
/// new deck. Recycled cards keep their orientation; nothing is turned back down,
/// so after a reshuffle the deck holds face-up cards and presentation code must
/// not assume deck cards are hidden. A non-empty deck is returned unchanged.
pub fn reshuffle_if_exhausted<R: Rng + ?Sized>(
    deck: Vec<Card>,
    mut discard_pile: Vec<Card>,
    rng: &mut R,
) -> Result<(Vec<Card>, Vec<Card>), DomainError> {
    if !deck.is_empty() {
        return Ok((deck, discard_pile));
    }
    if discard_pile.len() <= 1 {
        return Err(DomainError::validation(
            ValidationKind::DeckExhausted,
            "Deck is empty and the discard pile cannot be recycled",
        ));
    }
    let top = discard_pile.split_off(discard_pile.len() - 1);
    let new_deck = shuffle(&discard_pile, rng);
    debug!(recycled = new_deck.len(), "Reshuffled discard pile into deck");
    Ok((new_deck, top))
}
