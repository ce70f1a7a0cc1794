use crate::domain::game_transition::{derive_game_transitions, GameTransition};
use crate::domain::rules::Ruleset;
use crate::domain::state::TurnStep;
use crate::domain::test_state_helpers::{active_state, card, dealt_game, face_up, grid, seated_lobby};
use crate::domain::turns::{flip_initial_card, resolve_draw, Resolution};
use crate::domain::Suit;

#[test]
fn deal_announces_initial_flip_and_first_turn() {
    let lobby = seated_lobby(Ruleset::default());
    let dealt = dealt_game(5);
    let t = derive_game_transitions(&lobby, &dealt);
    assert_eq!(
        t,
        vec![
            GameTransition::InitialFlipStarted,
            GameTransition::TurnBecame { seat: 0 }
        ]
    );
}

#[test]
fn no_transitions_when_nothing_changes() {
    let dealt = dealt_game(5);
    assert!(derive_game_transitions(&dealt, &dealt).is_empty());
}

#[test]
fn initial_flip_hands_turn_to_other_seat() {
    let dealt = dealt_game(5);
    let after = flip_initial_card(&dealt, 0, 0).unwrap().state;
    assert_eq!(
        derive_game_transitions(&dealt, &after),
        vec![GameTransition::TurnBecame { seat: 1 }]
    );
}

#[test]
fn final_round_and_game_end_are_edge_triggered() {
    let before = active_state(
        [
            grid(["K+", "K+", "2+", "K+", "K+", "2"]),
            grid(["A+", "3", "4", "5+", "6", "8"]),
        ],
        vec![card("9", Suit::Clubs)],
        vec![face_up("J", Suit::Spades)],
        0,
        TurnStep::Holding(face_up("7", Suit::Hearts)),
    );
    let final_round = resolve_draw(&before, 0, Resolution::Swap { cell: 5 }).unwrap().state;
    assert_eq!(
        derive_game_transitions(&before, &final_round),
        vec![
            GameTransition::FinalRoundStarted {
                final_turn_player: 1
            },
            GameTransition::TurnBecame { seat: 1 }
        ]
    );

    let mut held = final_round.clone();
    if let crate::domain::Phase::FinalRound { turn, .. } = &mut held.phase {
        turn.step = TurnStep::Holding(face_up("Q", Suit::Hearts));
    }
    let over = resolve_draw(&held, 1, Resolution::Swap { cell: 1 }).unwrap().state;
    let result = *over.result().unwrap();
    assert_eq!(
        derive_game_transitions(&held, &over),
        vec![GameTransition::GameEnded {
            winner: result.winner,
            scores: result.scores
        }]
    );
}
