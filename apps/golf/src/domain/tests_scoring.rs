use crate::domain::rules::PLAYERS;
use crate::domain::scoring::{card_value, column_score, determine_winner, square_bonus, total_score};
use crate::domain::test_state_helpers::{grid, revealed_grid};
use crate::domain::Rank;

#[test]
fn card_values() {
    let expected = [
        (Rank::King, 0),
        (Rank::Five, -5),
        (Rank::Joker, -5),
        (Rank::Jack, 10),
        (Rank::Queen, 10),
        (Rank::Ace, 1),
        (Rank::Two, 2),
        (Rank::Seven, 7),
        (Rank::Ten, 10),
    ];
    for (rank, value) in expected {
        assert_eq!(card_value(rank), value, "{rank:?}");
    }
}

#[test]
fn all_fives_scores_minus_twenty() {
    let g = revealed_grid(["5", "5", "5", "5", "5", "5"]);
    for col in 0..3 {
        assert_eq!(column_score(&g, col), Some(0));
    }
    assert_eq!(square_bonus(&g, 0), Some(-10));
    assert_eq!(square_bonus(&g, 1), Some(-10));
    assert_eq!(total_score(&g), Some(-20));
}

#[test]
fn kings_over_aces_scores_three() {
    let g = revealed_grid(["K", "K", "K", "A", "A", "A"]);
    assert_eq!(column_score(&g, 1), Some(1));
    assert_eq!(square_bonus(&g, 0), Some(0));
    assert_eq!(total_score(&g), Some(3));
}

#[test]
fn matched_column_cancels_even_high_cards() {
    let g = revealed_grid(["Q", "2", "3", "Q", "4", "9"]);
    assert_eq!(column_score(&g, 0), Some(0));
    assert_eq!(column_score(&g, 1), Some(6));
    assert_eq!(column_score(&g, 2), Some(12));
    assert_eq!(total_score(&g), Some(18));
}

#[test]
fn right_square_bonus_stacks_with_matched_columns() {
    let g = revealed_grid(["J", "8", "8", "3", "8", "8"]);
    assert_eq!(square_bonus(&g, 0), Some(0));
    assert_eq!(square_bonus(&g, 1), Some(-10));
    // 10 + 3, then two cancelled columns, then the square
    assert_eq!(total_score(&g), Some(3));
}

#[test]
fn mixed_jokers_and_fives_do_not_match() {
    let g = revealed_grid(["JOKER", "5", "K", "5", "JOKER", "K"]);
    assert_eq!(column_score(&g, 0), Some(-10));
    assert_eq!(column_score(&g, 1), Some(-10));
    assert_eq!(column_score(&g, 2), Some(0));
    assert_eq!(total_score(&g), Some(-20));
}

#[test]
fn face_down_cards_are_not_scorable() {
    let g = grid(["5+", "5", "5+", "5+", "5+", "5+"]);
    assert_eq!(column_score(&g, 0), Some(0));
    assert_eq!(column_score(&g, 1), None);
    assert_eq!(square_bonus(&g, 0), None);
    assert_eq!(total_score(&g), None);
}

#[test]
fn out_of_range_columns() {
    let g = revealed_grid(["K", "K", "K", "K", "K", "K"]);
    assert_eq!(column_score(&g, 3), None);
    assert_eq!(square_bonus(&g, 2), None);
}

#[test]
fn scoring_is_a_function_of_ranks() {
    let a = revealed_grid(["7", "2", "Q", "7", "K", "A"]);
    let b = revealed_grid(["7", "2", "Q", "7", "K", "A"]);
    assert_eq!(total_score(&a), total_score(&b));
}

#[test]
fn lowest_score_wins_and_ties_favor_seat_zero() {
    let cases: [([i16; PLAYERS], u8); 4] = [([3, 10], 0), ([12, -4], 1), ([7, 7], 0), ([-20, -20], 0)];
    for (scores, winner) in cases {
        assert_eq!(determine_winner(&scores), winner, "{scores:?}");
    }
}
