use core::time::Duration;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer may show for one cell. Content is only exposed once revealed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Open(u8),
    Mine,
}

impl CellView {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl From<Cell> for CellView {
    fn from(cell: Cell) -> Self {
        match (cell.visibility, cell.mine) {
            (Visibility::Hidden, _) => Self::Hidden,
            (Visibility::Flagged, _) => Self::Flagged,
            (Visibility::Revealed, true) => Self::Mine,
            (Visibility::Revealed, false) => Self::Open(cell.adjacent),
        }
    }
}

/// Immutable view of a session after an intent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// `(height, width)`
    pub size: Coord2,
    pub phase: Phase,
    pub cells: Array2<CellView>,
    pub total_mines: CellCount,
    pub remaining_mines: isize,
    pub revealed: CellCount,
    pub flagged: CellCount,
    pub elapsed: Duration,
    pub triggered_mine: Option<Coord2>,
    /// Cells newly revealed by the intent that produced this snapshot, sorted
    pub changed: Vec<Coord2>,
}

impl Snapshot {
    pub(crate) fn from_session(session: &GameSession, changed: Vec<Coord2>) -> Self {
        let grid = session.grid();
        let size = grid.size();
        let mut cells = Array2::from_elem(size.to_nd_index(), CellView::Hidden);

        for (coords, &cell) in grid.iter() {
            cells[coords.to_nd_index()] = cell.into();
        }

        Self {
            size,
            phase: session.phase(),
            cells,
            total_mines: session.config().mines,
            remaining_mines: session.remaining_mines(),
            revealed: session.revealed_count(),
            flagged: session.flagged_count(),
            elapsed: session.elapsed(),
            triggered_mine: session.triggered_mine(),
            changed,
        }
    }

    pub fn cell(&self, coords: Coord2) -> Result<CellView> {
        self.cells
            .get(coords.to_nd_index())
            .copied()
            .ok_or(GameError::OutOfBounds)
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }
}
