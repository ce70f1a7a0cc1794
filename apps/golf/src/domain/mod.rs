//! Domain layer: pure game logic types and helpers.

pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod deck;
pub mod game_transition;
pub mod grid;
pub mod legal;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod snapshot;
pub mod state;
pub mod turns;

#[cfg(test)]
pub(crate) mod test_state_helpers;
#[cfg(test)]
mod tests_game_transition;
#[cfg(test)]
mod tests_initial_flip;
#[cfg(test)]
mod tests_props_consistency;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_turns;

// Re-exports for ergonomics
pub use cards_types::{Card, Rank, Suit};
pub use deck::{build_deck, deal, reshuffle_if_exhausted, shuffle};
pub use game_transition::{derive_game_transitions, GameTransition};
pub use grid::Grid;
pub use legal::legal_actions;
pub use rules::{DiscardRule, JokerRules, Ruleset};
pub use scoring::{card_value, column_score, determine_winner, square_bonus, total_score};
pub use seed_derivation::{derive_shuffle_seed, shuffle_rng};
pub use snapshot::{snapshot, GameSnapshot, PlayerSnapshot};
pub use state::{GameState, Phase, PhaseKind, Player, Seat};
pub use turns::{
    apply_action, deal_new_game, draw_card, flip_card, flip_initial_card, resolve_draw, Action,
    ActionEvent, Applied, DrawSource, Resolution,
};
