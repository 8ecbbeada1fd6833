use super::*;

/// Places mines at an explicit list of coordinates, for puzzles, replays and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    mines: Vec<Coord2>,
}

impl FixedMineGenerator {
    pub fn new(mines: Vec<Coord2>) -> Self {
        Self { mines }
    }
}

impl MineGenerator for FixedMineGenerator {
    fn place(self, grid: &mut Grid, mines: CellCount, excluded: &BTreeSet<Coord2>) -> Result<()> {
        if usize::from(mines) > eligible_count(grid, excluded) {
            return Err(GameError::InsufficientSpace);
        }

        let mut unique = BTreeSet::new();
        for &coords in &self.mines {
            grid.validate_coords(coords)?;
            if !unique.insert(coords) || excluded.contains(&coords) {
                return Err(GameError::InvalidLayout);
            }
        }
        if unique.len() != usize::from(mines) {
            return Err(GameError::InvalidLayout);
        }

        grid.clear_mines();
        for coords in unique {
            grid[coords].mine = true;
        }
        grid.recount_adjacent();

        log::debug!("Placed {} fixed mines", mines);
        Ok(())
    }
}
