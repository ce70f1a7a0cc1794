use crate::domain::rules::{Ruleset, INITIAL_FLIPS, PLAYERS};
use crate::domain::state::{GameState, Phase, Table, TurnStep};
use crate::domain::test_state_helpers::{dealt_game, face_up, grid, rng, seated_lobby};
use crate::domain::turns::{deal_new_game, draw_card, flip_initial_card, DrawSource};
use crate::domain::Suit;
use crate::errors::domain::ValidationKind;

fn opening_state() -> GameState {
    let mut state = seated_lobby(Ruleset::default());
    state.phase = Phase::InitialFlip {
        table: Table {
            grids: [
                grid(["7", "7", "K", "2", "9", "Q"]),
                grid(["A", "3", "4", "5", "6", "8"]),
            ],
            deck: Vec::new(),
            discard_pile: vec![face_up("J", Suit::Spades)],
        },
        to_act: 0,
        flips_remaining: [INITIAL_FLIPS; PLAYERS],
    };
    state
}

fn kind_of(err: crate::errors::domain::DomainError) -> ValidationKind {
    err.validation_kind().cloned().unwrap()
}

#[test]
fn deal_starts_initial_flip_with_seat_zero() {
    let state = dealt_game(3);
    let Phase::InitialFlip {
        table,
        to_act,
        flips_remaining,
    } = &state.phase
    else {
        panic!("expected InitialFlip, got {:?}", state.phase.kind());
    };
    assert_eq!(*to_act, 0);
    assert_eq!(*flips_remaining, [2, 2]);
    assert_eq!(table.discard_pile.len(), 1);
    assert!(table.discard_pile[0].face_up);
    assert_eq!(table.deck.len(), 54 - 13);
    assert!(table.grids.iter().all(|g| g.face_down_count() == 6));
    assert_eq!(state.card_count(), 54);
}

#[test]
fn deal_requires_two_players() {
    let mut lobby = seated_lobby(Ruleset::default());
    lobby.players.pop();
    let err = deal_new_game(&lobby, &mut rng(1)).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::NotEnoughPlayers);
}

#[test]
fn flips_alternate_then_active_play_starts_at_seat_zero() {
    let s0 = opening_state();
    let s1 = flip_initial_card(&s0, 0, 0).unwrap().state;
    assert_eq!(s1.current_player(), Some(1));
    let s2 = flip_initial_card(&s1, 1, 0).unwrap().state;
    assert_eq!(s2.current_player(), Some(0));
    let s3 = flip_initial_card(&s2, 0, 2).unwrap().state;
    assert_eq!(s3.current_player(), Some(1));
    let s4 = flip_initial_card(&s3, 1, 5).unwrap().state;

    let Phase::ActivePlay { table, turn } = &s4.phase else {
        panic!("expected ActivePlay, got {:?}", s4.phase.kind());
    };
    assert_eq!(turn.player, 0);
    assert_eq!(turn.step, TurnStep::AwaitingDraw);
    assert_eq!(table.grid(0).face_up_count(), 2);
    assert_eq!(table.grid(1).face_up_count(), 2);
}

#[test]
fn out_of_turn_flip_is_rejected() {
    let err = flip_initial_card(&opening_state(), 1, 0).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::NotYourTurn);
}

#[test]
fn already_face_up_cell_is_rejected() {
    let s1 = flip_initial_card(&opening_state(), 0, 2).unwrap().state;
    let s2 = flip_initial_card(&s1, 1, 0).unwrap().state;
    let err = flip_initial_card(&s2, 0, 2).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::AlreadyFaceUp);
}

#[test]
fn second_flip_cannot_match_first_rank() {
    let s1 = flip_initial_card(&opening_state(), 0, 0).unwrap().state;
    let s2 = flip_initial_card(&s1, 1, 0).unwrap().state;
    let before = s2.clone();
    let err = flip_initial_card(&s2, 0, 1).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::DuplicateRankInInitialFlip);
    assert_eq!(s2, before);
}

#[test]
fn duplicate_rank_rule_is_per_player() {
    // Player 0's face-up seven does not restrict player 1.
    let mut state = opening_state();
    if let Phase::InitialFlip { table, .. } = &mut state.phase {
        table.grids[1] = grid(["7", "3", "4", "5", "6", "8"]);
    }
    let s1 = flip_initial_card(&state, 0, 0).unwrap().state;
    assert!(flip_initial_card(&s1, 1, 0).is_ok());
}

#[test]
fn invalid_cell_and_seat() {
    let err = flip_initial_card(&opening_state(), 0, 6).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::InvalidCell);
    let err = flip_initial_card(&opening_state(), 2, 0).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::InvalidSeat);
}

#[test]
fn drawing_during_initial_flip_is_a_phase_error() {
    let err = draw_card(&opening_state(), 0, DrawSource::Discard, &mut rng(0)).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::InvalidPhaseAction);
}
