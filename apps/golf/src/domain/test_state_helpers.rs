//! Test-only game state builders for domain unit tests.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::domain::grid::Grid;
use crate::domain::legal::legal_actions;
use crate::domain::rules::{Ruleset, PLAYERS};
use crate::domain::state::{GameState, Phase, Player, Seat, Table, Turn, TurnStep};
use crate::domain::turns::{apply_action, deal_new_game};
use crate::domain::{Card, Rank, Suit};

pub fn rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Card from a rank token; suits only matter for identity, so callers pick any.
pub fn card(rank: &str, suit: Suit) -> Card {
    let rank: Rank = rank.parse().unwrap();
    if rank == Rank::Joker {
        Card::joker(Some(suit))
    } else {
        Card::new(rank, suit)
    }
}

/// Grid from six rank tokens. A trailing `+` marks the card face-up
/// (`"K+"`), otherwise it is face-down. Suits cycle so cards stay distinct.
pub fn grid(tokens: [&str; 6]) -> Grid {
    let cells: Vec<Card> = tokens
        .iter()
        .enumerate()
        .map(|(i, tok)| {
            let (rank, up) = match tok.strip_suffix('+') {
                Some(r) => (r, true),
                None => (*tok, false),
            };
            let c = card(rank, Suit::DECK_ORDER[i % 4]);
            if up {
                c.revealed()
            } else {
                c
            }
        })
        .collect();
    Grid::try_from(cells).unwrap()
}

/// Same ranks, every card face-up.
pub fn revealed_grid(ranks: [&str; 6]) -> Grid {
    let mut g = grid(ranks);
    g.reveal_all();
    g
}

pub fn players() -> Vec<Player> {
    (0..PLAYERS)
        .map(|i| Player {
            id: format!("p{i}"),
            name: format!("Player {i}"),
            ready: true,
        })
        .collect()
}

pub fn seated_lobby(rules: Ruleset) -> GameState {
    let mut state = GameState::new_lobby(rules, 42);
    state.players = players();
    state
}

/// Freshly dealt game in InitialFlip.
pub fn dealt_game(seed: u64) -> GameState {
    deal_new_game(&seated_lobby(Ruleset::default()), &mut rng(seed)).unwrap()
}

/// Dealt game with both players' opening flips done by always taking the
/// first legal flip.
pub fn active_game(seed: u64) -> GameState {
    let mut state = dealt_game(seed);
    let mut r = rng(seed);
    while let Phase::InitialFlip { to_act, .. } = state.phase {
        let action = legal_actions(&state, to_act)[0];
        state = apply_action(&state, to_act, action, &mut r).unwrap().state;
    }
    state
}

/// Hand-built ActivePlay state for targeted tests.
pub fn active_state(
    grids: [Grid; PLAYERS],
    deck: Vec<Card>,
    discard_pile: Vec<Card>,
    player: Seat,
    step: TurnStep,
) -> GameState {
    let mut state = seated_lobby(Ruleset::default());
    state.phase = Phase::ActivePlay {
        table: Table {
            grids,
            deck,
            discard_pile,
        },
        turn: Turn { player, step },
    };
    state
}

pub fn face_up(rank: &str, suit: Suit) -> Card {
    card(rank, suit).revealed()
}
