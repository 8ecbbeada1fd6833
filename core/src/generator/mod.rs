use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Places mines on a mine-free grid and fills in the adjacency counts.
///
/// Exactly `mines` distinct cells outside `excluded` end up as mines. Any mines
/// already on the grid are cleared first.
pub trait MineGenerator {
    fn place(self, grid: &mut Grid, mines: CellCount, excluded: &BTreeSet<Coord2>) -> Result<()>;
}

/// How much of the board around the first revealed cell is kept free of mines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartTile {
    /// Only the first cell is guaranteed safe.
    #[default]
    SimpleSafe,
    /// The first cell and its neighbors are safe, so the first reveal cascades.
    AlwaysZero,
}

impl StartTile {
    /// Cells to exclude from placement when the game starts at `start`.
    pub fn exclusion(self, grid: &Grid, start: Coord2, mines: CellCount) -> BTreeSet<Coord2> {
        match self {
            Self::SimpleSafe => BTreeSet::from([start]),
            Self::AlwaysZero => {
                let zone: BTreeSet<Coord2> = core::iter::once(start)
                    .chain(grid.neighbors(start))
                    .collect();
                if usize::from(mines) + zone.len() > usize::from(grid.total_cells()) {
                    log::warn!("Cannot make start tile zero, fallback to simple safe");
                    BTreeSet::from([start])
                } else {
                    zone
                }
            }
        }
    }
}

/// Number of in-bounds cells that are not excluded.
fn eligible_count(grid: &Grid, excluded: &BTreeSet<Coord2>) -> usize {
    grid.coords()
        .filter(|coords| !excluded.contains(coords))
        .count()
}
