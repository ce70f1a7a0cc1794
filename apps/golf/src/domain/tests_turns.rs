use crate::domain::rules::{DiscardRule, Ruleset};
use crate::domain::state::{GameState, Phase, TurnStep};
use crate::domain::test_state_helpers::{active_game, active_state, card, face_up, grid, rng};
use crate::domain::turns::{
    draw_card, flip_card, resolve_draw, ActionEvent, DrawSource, Resolution,
};
use crate::domain::{Card, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

fn kind_of(err: DomainError) -> ValidationKind {
    err.validation_kind().cloned().unwrap()
}

fn deck_of(ranks: &[&str]) -> Vec<Card> {
    ranks.iter().map(|r| card(r, Suit::Clubs)).collect()
}

fn basic_state(step: TurnStep) -> GameState {
    active_state(
        [
            grid(["7+", "3", "K", "2", "9+", "Q"]),
            grid(["A+", "3", "4", "5+", "6", "8"]),
        ],
        deck_of(&["2", "10"]),
        vec![face_up("J", Suit::Spades)],
        0,
        step,
    )
}

fn step_of(state: &GameState) -> TurnStep {
    state.turn().unwrap().step
}

#[test]
fn draw_from_deck_reveals_tail_card() {
    let applied = draw_card(&basic_state(TurnStep::AwaitingDraw), 0, DrawSource::Deck, &mut rng(0))
        .unwrap();
    let drawn = card("10", Suit::Clubs).revealed();
    assert_eq!(step_of(&applied.state), TurnStep::Holding(drawn));
    assert_eq!(applied.state.table().unwrap().deck.len(), 1);
    assert_eq!(applied.state.drawn_card(), Some(drawn));
    assert_eq!(applied.state.card_count(), basic_state(TurnStep::AwaitingDraw).card_count());
}

#[test]
fn draw_from_discard_takes_top() {
    let applied = draw_card(&basic_state(TurnStep::AwaitingDraw), 0, DrawSource::Discard, &mut rng(0))
        .unwrap();
    assert_eq!(applied.state.drawn_card(), Some(face_up("J", Suit::Spades)));
    assert!(applied.state.table().unwrap().discard_pile.is_empty());
}

#[test]
fn empty_discard_pile_is_rejected() {
    let mut state = basic_state(TurnStep::AwaitingDraw);
    if let Phase::ActivePlay { table, .. } = &mut state.phase {
        table.discard_pile.clear();
    }
    let err = draw_card(&state, 0, DrawSource::Discard, &mut rng(0)).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::EmptyDiscardPile);
}

#[test]
fn cannot_draw_twice() {
    let held = TurnStep::Holding(face_up("4", Suit::Hearts));
    let err = draw_card(&basic_state(held), 0, DrawSource::Deck, &mut rng(0)).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::AlreadyHoldingDrawnCard);
}

#[test]
fn only_current_player_may_draw() {
    let err = draw_card(&basic_state(TurnStep::AwaitingDraw), 1, DrawSource::Deck, &mut rng(0))
        .unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::NotYourTurn);
}

#[test]
fn resolving_without_a_card_is_rejected() {
    let state = basic_state(TurnStep::AwaitingDraw);
    let err = resolve_draw(&state, 0, Resolution::Discard).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::NoDrawnCard);
    let err = resolve_draw(&state, 0, Resolution::Swap { cell: 1 }).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::NoDrawnCard);
}

#[test]
fn swap_replaces_cell_and_discards_old_card_face_up() {
    let held = face_up("4", Suit::Hearts);
    let state = basic_state(TurnStep::Holding(held));
    let applied = resolve_draw(&state, 0, Resolution::Swap { cell: 1 }).unwrap();

    let table = applied.state.table().unwrap();
    assert_eq!(table.grid(0).cells()[1], held);
    let old = table.top_discard().copied().unwrap();
    assert_eq!(old.rank, crate::domain::Rank::Three);
    assert!(old.face_up);
    assert_eq!(applied.state.current_player(), Some(1));
    assert_eq!(step_of(&applied.state), TurnStep::AwaitingDraw);
    assert!(matches!(applied.event, ActionEvent::CardSwapped { cell: 1, .. }));
}

#[test]
fn swap_over_face_up_card_works() {
    let held = face_up("4", Suit::Hearts);
    let state = basic_state(TurnStep::Holding(held));
    let applied = resolve_draw(&state, 0, Resolution::Swap { cell: 0 }).unwrap();
    let table = applied.state.table().unwrap();
    assert_eq!(table.top_discard().unwrap().rank, crate::domain::Rank::Seven);
}

#[test]
fn discard_with_several_face_down_requires_flip() {
    let held = face_up("4", Suit::Hearts);
    let state = basic_state(TurnStep::Holding(held));
    let applied = resolve_draw(&state, 0, Resolution::Discard).unwrap();
    assert_eq!(step_of(&applied.state), TurnStep::AwaitingFlip);
    assert_eq!(applied.state.current_player(), Some(0));
    assert_eq!(applied.state.table().unwrap().top_discard(), Some(&held));

    let err = draw_card(&applied.state, 0, DrawSource::Deck, &mut rng(0)).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::InvalidPhaseAction);
    let err = flip_card(&applied.state, 0, 0).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::AlreadyFaceUp);

    let flipped = flip_card(&applied.state, 0, 1).unwrap();
    assert!(flipped.state.table().unwrap().grid(0).cells()[1].face_up);
    assert_eq!(flipped.state.current_player(), Some(1));
    assert_eq!(step_of(&flipped.state), TurnStep::AwaitingDraw);
}

#[test]
fn discard_with_one_face_down_folds_the_flip() {
    let held = face_up("4", Suit::Hearts);
    let state = active_state(
        [
            grid(["7+", "3+", "K+", "2+", "9", "Q+"]),
            grid(["A+", "3", "4", "5+", "6", "8"]),
        ],
        deck_of(&["2", "10"]),
        vec![face_up("J", Suit::Spades)],
        0,
        TurnStep::Holding(held),
    );
    let applied = resolve_draw(&state, 0, Resolution::Discard).unwrap();
    assert!(matches!(
        applied.event,
        ActionEvent::DrawnCardDiscarded {
            forced_flip: Some((4, _)),
            ..
        }
    ));
    // The folded flip revealed the whole grid.
    assert_eq!(applied.state.final_turn_player(), Some(1));
    assert_eq!(applied.state.current_player(), Some(1));
}

#[test]
fn discard_under_ends_turn_rule_rotates_immediately() {
    let held = face_up("4", Suit::Hearts);
    let mut state = basic_state(TurnStep::Holding(held));
    state.rules = Ruleset {
        discard: DiscardRule::EndsTurn,
        ..Ruleset::default()
    };
    let applied = resolve_draw(&state, 0, Resolution::Discard).unwrap();
    assert_eq!(applied.state.current_player(), Some(1));
    assert_eq!(applied.state.table().unwrap().grid(0).face_down_count(), 4);
}

#[test]
fn flip_without_pending_discard_is_rejected() {
    let err = flip_card(&basic_state(TurnStep::AwaitingDraw), 0, 1).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::InvalidPhaseAction);
}

#[test]
fn empty_deck_reshuffles_then_next_draw_succeeds() {
    let discard: Vec<Card> = ["2", "3", "4", "6", "9"]
        .iter()
        .map(|r| face_up(r, Suit::Diamonds))
        .collect();
    let top = discard[4];
    let state = active_state(
        [
            grid(["7+", "3", "K", "2", "9+", "Q"]),
            grid(["A+", "3", "4", "5+", "6", "8"]),
        ],
        Vec::new(),
        discard,
        0,
        TurnStep::AwaitingDraw,
    );

    let reshuffled = draw_card(&state, 0, DrawSource::Deck, &mut rng(9)).unwrap();
    assert_eq!(
        reshuffled.event,
        ActionEvent::DeckReshuffled {
            seat: 0,
            deck_len: 4
        }
    );
    let table = reshuffled.state.table().unwrap();
    assert_eq!(table.deck.len(), 4);
    assert_eq!(table.discard_pile, vec![top]);
    assert_eq!(step_of(&reshuffled.state), TurnStep::AwaitingDraw);

    let drawn = draw_card(&reshuffled.state, 0, DrawSource::Deck, &mut rng(9)).unwrap();
    assert!(drawn.state.drawn_card().is_some());
    assert_eq!(drawn.state.table().unwrap().deck.len(), 3);
}

#[test]
fn deck_exhausted_when_nothing_to_recycle() {
    let mut state = basic_state(TurnStep::AwaitingDraw);
    if let Phase::ActivePlay { table, .. } = &mut state.phase {
        table.deck.clear();
    }
    let err = draw_card(&state, 0, DrawSource::Deck, &mut rng(0)).unwrap_err();
    assert_eq!(kind_of(err), ValidationKind::DeckExhausted);
}

#[test]
fn rejected_actions_leave_state_untouched() {
    let state = active_game(11);
    let before = state.clone();
    assert!(draw_card(&state, 1, DrawSource::Deck, &mut rng(0)).is_err());
    assert!(resolve_draw(&state, 0, Resolution::Discard).is_err());
    assert_eq!(state, before);
}
