//! Golf scoring: lower is better.

use crate::domain::grid::Grid;
use crate::domain::rules::{GRID_COLS, PLAYERS};
use crate::domain::state::Seat;
use crate::domain::Rank;

/// Bonus for two adjacent columns whose four cards share one rank.
pub const SQUARE_BONUS: i16 = -10;

pub fn card_value(rank: Rank) -> i16 {
    match rank {
        Rank::King => 0,
        Rank::Five | Rank::Joker => -5,
        Rank::Jack | Rank::Queen => 10,
        Rank::Ace => 1,
        Rank::Two => 2,
        Rank::Three => 3,
        Rank::Four => 4,
        Rank::Six => 6,
        Rank::Seven => 7,
        Rank::Eight => 8,
        Rank::Nine => 9,
        Rank::Ten => 10,
    }
}

/// Score of one column; a matching pair cancels to zero.
///
/// `None` while either card is still face-down or `col` is out of range.
pub fn column_score(grid: &Grid, col: usize) -> Option<i16> {
    if col >= GRID_COLS {
        return None;
    }
    let (top, bottom) = Grid::column_cells(col);
    let cells = grid.cells();
    let (a, b) = (cells[top], cells[bottom]);
    if !a.face_up || !b.face_up {
        return None;
    }
    if a.rank == b.rank {
        Some(0)
    } else {
        Some(card_value(a.rank) + card_value(b.rank))
    }
}

/// Square bonus for columns `col` and `col + 1`.
///
/// `Some(0)` when the square does not match, `None` if any of its cards is
/// face-down or the pair of columns does not exist.
pub fn square_bonus(grid: &Grid, col: usize) -> Option<i16> {
    if col + 1 >= GRID_COLS {
        return None;
    }
    let (a_top, a_bottom) = Grid::column_cells(col);
    let (b_top, b_bottom) = Grid::column_cells(col + 1);
    let cells = grid.cells();
    let square = [cells[a_top], cells[a_bottom], cells[b_top], cells[b_bottom]];
    if square.iter().any(|c| !c.face_up) {
        return None;
    }
    let rank = square[0].rank;
    if square.iter().all(|c| c.rank == rank) {
        Some(SQUARE_BONUS)
    } else {
        Some(0)
    }
}

/// Column scores plus every square bonus; `None` until the grid is fully revealed.
pub fn total_score(grid: &Grid) -> Option<i16> {
    let mut total = 0;
    for col in 0..GRID_COLS {
        total += column_score(grid, col)?;
    }
    for col in 0..GRID_COLS - 1 {
        total += square_bonus(grid, col)?;
    }
    Some(total)
}

/// Lowest score wins; a tie goes to seat 0.
pub fn determine_winner(scores: &[i16; PLAYERS]) -> Seat {
    if scores[1] < scores[0] {
        1
    } else {
        0
    }
}
