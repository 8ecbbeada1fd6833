//! Visibility changes on a [`Grid`]: single reveals with flood fill, chords,
//! flag toggling and the end-of-game mine reveal.
//!
//! These functions only touch cell visibility. Phase bookkeeping belongs to
//! [`GameSession`].

use std::collections::{BTreeSet, VecDeque};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Reveals a hidden cell and returns every coordinate it newly revealed.
///
/// Revealed and flagged targets are left alone and yield an empty set. A mine
/// yields just its own coordinate. A zero cell floods outward through other
/// zero cells, stopping at numbered cells, flags and mines.
pub fn reveal(grid: &mut Grid, coords: Coord2) -> Result<BTreeSet<Coord2>> {
    let coords = grid.validate_coords(coords)?;
    let mut revealed = BTreeSet::new();

    if grid[coords].is_hidden() {
        open_cell(grid, coords, &mut revealed);
    }

    Ok(revealed)
}

/// Reveals all hidden neighbors of a numbered cell once it has as many flagged
/// neighbors as its count. Anything else is a no-op.
pub fn chord(grid: &mut Grid, coords: Coord2) -> Result<BTreeSet<Coord2>> {
    let coords = grid.validate_coords(coords)?;
    let cell = grid[coords];
    let mut revealed = BTreeSet::new();

    if !cell.is_revealed() || cell.mine || cell.adjacent == 0 {
        return Ok(revealed);
    }

    if count_flagged_neighbors(grid, coords) != cell.adjacent {
        return Ok(revealed);
    }

    let targets: Vec<Coord2> = grid
        .neighbors(coords)
        .filter(|&pos| grid[pos].is_hidden())
        .collect();
    for pos in targets {
        // an earlier neighbor's flood may already have opened this one
        if grid[pos].is_hidden() {
            open_cell(grid, pos, &mut revealed);
        }
    }

    Ok(revealed)
}

/// Flips `Hidden` and `Flagged`. Revealed cells are not affected.
pub fn toggle_flag(grid: &mut Grid, coords: Coord2) -> Result<MarkOutcome> {
    use MarkOutcome::*;
    use Visibility::*;

    let cell = grid.at_mut(coords)?;

    Ok(match cell.visibility {
        Hidden => {
            cell.visibility = Flagged;
            Changed
        }
        Flagged => {
            cell.visibility = Hidden;
            Changed
        }
        Revealed => NoChange,
    })
}

/// Reveals every mine that is still hidden. Flags stay where the player put them.
pub fn reveal_mines(grid: &mut Grid) -> BTreeSet<Coord2> {
    let hidden_mines: BTreeSet<Coord2> = grid
        .mine_coords()
        .filter(|&coords| grid[coords].is_hidden())
        .collect();

    for &coords in &hidden_mines {
        grid[coords].visibility = Visibility::Revealed;
    }

    hidden_mines
}

fn count_flagged_neighbors(grid: &Grid, coords: Coord2) -> u8 {
    // never more than eight neighbors
    grid.neighbors(coords)
        .filter(|&pos| grid[pos].is_flagged())
        .count() as u8
}

/// Opens a hidden cell and floods through zero cells with a worklist.
fn open_cell(grid: &mut Grid, coords: Coord2, revealed: &mut BTreeSet<Coord2>) {
    grid[coords].visibility = Visibility::Revealed;
    revealed.insert(coords);

    let cell = grid[coords];
    if cell.mine {
        log::debug!("Revealed mine at {:?}", coords);
        return;
    }
    log::debug!("Open cell at {:?}, mine count: {}", coords, cell.adjacent);

    if cell.adjacent != 0 {
        return;
    }

    let mut visited = BTreeSet::from([coords]);
    let mut to_visit: VecDeque<Coord2> = grid
        .neighbors(coords)
        .filter(|&pos| grid[pos].is_hidden())
        .collect();
    log::trace!(
        "Starting flood-fill from {:?}, initial neighbors: {:?}",
        coords,
        to_visit
    );

    while let Some(visit_coords) = to_visit.pop_front() {
        if !visited.insert(visit_coords) {
            continue;
        }

        let visit_cell = grid[visit_coords];
        if !visit_cell.is_hidden() || visit_cell.mine {
            log::trace!("Skipping cell at {:?}", visit_coords);
            continue;
        }

        grid[visit_coords].visibility = Visibility::Revealed;
        revealed.insert(visit_coords);
        log::trace!(
            "Flood opened cell at {:?}, mine count: {}",
            visit_coords,
            visit_cell.adjacent
        );

        if visit_cell.adjacent == 0 {
            to_visit.extend(
                grid.neighbors(visit_coords)
                    .filter(|&pos| grid[pos].is_hidden())
                    .filter(|pos| !visited.contains(pos)),
            );
        }
    }
}
