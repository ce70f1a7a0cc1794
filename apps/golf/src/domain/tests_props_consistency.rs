//! Property-based tests for engine-wide invariants, driven by random legal play.

use proptest::prelude::*;

use crate::domain::legal::legal_actions;
use crate::domain::snapshot::{snapshot, GameSnapshot};
use crate::domain::state::{GameState, Phase};
use crate::domain::test_state_helpers::{players, rng};
use crate::domain::turns::{apply_action, deal_new_game};
use crate::domain::{test_gens, test_prelude, Ruleset};

/// Play up to `choices.len()` legal actions, returning every state visited.
fn random_game(rules: Ruleset, seed: u64, choices: &[usize]) -> Vec<GameState> {
    let mut lobby = GameState::new_lobby(rules, seed);
    lobby.players = players();
    let mut r = rng(seed);
    let mut state = deal_new_game(&lobby, &mut r).unwrap();
    let mut visited = vec![state.clone()];
    for choice in choices {
        let Some(seat) = state.current_player() else {
            break;
        };
        let legal = legal_actions(&state, seat);
        if legal.is_empty() {
            break;
        }
        let action = legal[choice % legal.len()];
        state = apply_action(&state, seat, action, &mut r).unwrap().state;
        visited.push(state.clone());
    }
    visited
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: no card is created, destroyed or duplicated.
    #[test]
    fn prop_card_conservation(
        rules in test_gens::ruleset(),
        seed in any::<u64>(),
        choices in test_gens::action_choices(),
    ) {
        for state in random_game(rules, seed, &choices) {
            prop_assert_eq!(state.card_count(), rules.deck_size());
        }
    }

    /// Property: grid cells that are face-up stay face-up.
    #[test]
    fn prop_monotonic_reveal(
        rules in test_gens::ruleset(),
        seed in any::<u64>(),
        choices in test_gens::action_choices(),
    ) {
        let states = random_game(rules, seed, &choices);
        for pair in states.windows(2) {
            let (Some(before), Some(after)) = (pair[0].table(), pair[1].table()) else {
                continue;
            };
            for (gb, ga) in before.grids.iter().zip(after.grids.iter()) {
                for (cb, ca) in gb.cells().iter().zip(ga.cells().iter()) {
                    prop_assert!(!cb.face_up || ca.face_up);
                }
            }
            prop_assert!(after.discard_pile.iter().all(|c| c.face_up));
        }
    }

    /// Property: opening flips never reveal two cards of one rank in the same grid.
    #[test]
    fn prop_initial_flip_exclusivity(
        seed in any::<u64>(),
        choices in test_gens::action_choices(),
    ) {
        let states = random_game(Ruleset::default(), seed, &choices);
        let opening = states
            .iter()
            .take_while(|s| matches!(s.phase, Phase::InitialFlip { .. }))
            .count();
        // The first ActivePlay state still shows exactly the opening flips.
        for state in states.iter().take(opening + 1) {
            let Some(table) = state.table() else {
                continue;
            };
            for grid in &table.grids {
                let up: Vec<_> = grid.cells().iter().filter(|c| c.face_up).collect();
                prop_assert!(up.len() <= 2);
                if let [a, b] = up.as_slice() {
                    prop_assert_ne!(a.rank, b.rank);
                }
            }
        }
    }

    /// Property: once play starts, the seat to act changes only when a turn
    /// ends, and always to the other seat.
    #[test]
    fn prop_turn_alternation(
        rules in test_gens::ruleset(),
        seed in any::<u64>(),
        choices in test_gens::action_choices(),
    ) {
        let states = random_game(rules, seed, &choices);
        for pair in states.windows(2) {
            let (Some(tb), Some(ta)) = (pair[0].turn(), pair[1].turn()) else {
                continue;
            };
            if tb.player != ta.player {
                prop_assert_eq!(ta.player, 1 - tb.player);
                prop_assert_eq!(ta.step, crate::domain::state::TurnStep::AwaitingDraw);
            }
        }
    }

    /// Property: snapshots of reachable states validate and round-trip losslessly.
    #[test]
    fn prop_snapshot_roundtrip(
        rules in test_gens::ruleset(),
        seed in any::<u64>(),
        choices in test_gens::action_choices(),
    ) {
        for (version, state) in random_game(rules, seed, &choices).into_iter().enumerate() {
            let snap = snapshot(&state, version as u64 + 1);
            let json = snap.to_json().unwrap();
            let decoded = GameSnapshot::from_json(json.clone()).unwrap();
            prop_assert_eq!(&decoded, &snap);
            prop_assert_eq!(decoded.to_json().unwrap(), json);
            prop_assert_eq!(decoded.to_state().unwrap(), state);
        }
    }
}
