//! The 2x3 card grid each player owns.
//!
//! Cells are indexed 0..6: top row 0,1,2 and bottom row 3,4,5, so column
//! `c` pairs cells `c` and `c + 3`.

use crate::domain::rules::{GRID_COLS, GRID_SIZE};
use crate::domain::{Card, Rank};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [Card; GRID_SIZE],
}

impl Grid {
    pub fn new(cells: [Card; GRID_SIZE]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Card; GRID_SIZE] {
        &self.cells
    }

    /// Cell pair forming column `col` (top, bottom).
    pub fn column_cells(col: usize) -> (usize, usize) {
        (col, col + GRID_COLS)
    }

    pub fn card(&self, cell: usize) -> Result<&Card, DomainError> {
        self.cells.get(cell).ok_or_else(|| invalid_cell(cell))
    }

    pub fn face_down_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.face_up)
            .map(|(i, _)| i)
    }

    pub fn face_down_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.face_up).count()
    }

    pub fn face_up_count(&self) -> usize {
        GRID_SIZE - self.face_down_count()
    }

    pub fn all_face_up(&self) -> bool {
        self.cells.iter().all(|c| c.face_up)
    }

    pub fn has_face_up_rank(&self, rank: Rank) -> bool {
        self.cells.iter().any(|c| c.face_up && c.rank == rank)
    }

    /// Turn a face-down cell up and return the revealed card.
    pub fn flip(&mut self, cell: usize) -> Result<Card, DomainError> {
        let slot = self.cells.get_mut(cell).ok_or_else(|| invalid_cell(cell))?;
        if slot.face_up {
            return Err(DomainError::validation(
                ValidationKind::AlreadyFaceUp,
                format!("Cell {cell} is already face-up"),
            ));
        }
        *slot = slot.revealed();
        Ok(*slot)
    }

    /// Put `card` face-up into `cell`, returning what was there.
    pub fn replace(&mut self, cell: usize, card: Card) -> Result<Card, DomainError> {
        let slot = self.cells.get_mut(cell).ok_or_else(|| invalid_cell(cell))?;
        Ok(std::mem::replace(slot, card.revealed()))
    }

    pub fn reveal_all(&mut self) {
        for c in self.cells.iter_mut() {
            *c = c.revealed();
        }
    }
}

impl TryFrom<Vec<Card>> for Grid {
    type Error = DomainError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        let len = cards.len();
        let cells: [Card; GRID_SIZE] = cards
            .try_into()
            .map_err(|_| DomainError::corrupt(format!("Grid must hold {GRID_SIZE} cards, got {len}")))?;
        Ok(Self { cells })
    }
}

fn invalid_cell(cell: usize) -> DomainError {
    DomainError::validation(
        ValidationKind::InvalidCell,
        format!("Cell index {cell} out of range 0..{GRID_SIZE}"),
    )
}
