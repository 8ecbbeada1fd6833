use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Dense `height × width` array of cells, indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Creates a mine-free grid with every cell hidden.
    pub fn new(height: Coord, width: Coord) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(GameError::InvalidConfig);
        }

        Ok(Self {
            cells: Array2::default((height, width).to_nd_index()),
        })
    }

    /// `(height, width)`.
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // both axes come from `Coord` values in `new`
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let (rows, cols) = self.size();
        coords.0 < rows && coords.1 < cols
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn at(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self[coords])
    }

    pub(crate) fn at_mut(&mut self, coords: Coord2) -> Result<&mut Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&mut self[coords])
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Every coordinate of the grid in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.coords().map(|coords| (coords, &self[coords]))
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_where(|cell| cell.mine)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_where(Cell::is_revealed)
    }

    pub(crate) fn mine_coords(&self) -> impl Iterator<Item = Coord2> {
        self.iter()
            .filter(|(_, cell)| cell.mine)
            .map(|(coords, _)| coords)
    }

    fn count_where(&self, pred: impl Fn(&Cell) -> bool) -> CellCount {
        // at most 255 * 255 cells, always fits
        self.cells.iter().filter(|&cell| pred(cell)).count() as CellCount
    }

    pub(crate) fn clear_mines(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.mine = false;
            cell.adjacent = 0;
        }
    }

    /// Recomputes every cell's adjacency count from the current mine bitmap.
    pub(crate) fn recount_adjacent(&mut self) {
        for coords in self.coords() {
            let adjacent = self
                .neighbors(coords)
                .filter(|&pos| self[pos].mine)
                .count();
            // never more than eight neighbors
            self[coords].adjacent = adjacent as u8;
        }
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty_dimensions() {
        assert_eq!(Grid::new(0, 3), Err(GameError::InvalidConfig));
        assert_eq!(Grid::new(3, 0), Err(GameError::InvalidConfig));
    }

    #[test]
    fn at_checks_bounds() {
        let grid = Grid::new(2, 3).unwrap();

        assert_eq!(grid.size(), (2, 3));
        assert!(grid.at((1, 2)).is_ok());
        assert_eq!(grid.at((2, 0)), Err(GameError::OutOfBounds));
        assert_eq!(grid.at((0, 3)), Err(GameError::OutOfBounds));
    }

    #[test]
    fn every_coordinate_has_one_cell() {
        let grid = Grid::new(3, 4).unwrap();
        let coords: Vec<_> = grid.coords().collect();

        assert_eq!(coords.len(), 12);
        assert_eq!(coords.first(), Some(&(0, 0)));
        assert_eq!(coords.last(), Some(&(2, 3)));
        assert!(grid.iter().all(|(_, cell)| *cell == Cell::default()));
    }

    #[test]
    fn neighbors_follow_board_edges() {
        let grid = Grid::new(3, 3).unwrap();

        assert_eq!(grid.neighbors((0, 0)).count(), 3);
        assert_eq!(grid.neighbors((0, 1)).count(), 5);
        assert_eq!(grid.neighbors((1, 1)).count(), 8);
    }

    #[test]
    fn recount_adjacent_counts_mine_neighbors() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid[(0, 0)].mine = true;
        grid[(2, 2)].mine = true;

        grid.recount_adjacent();

        assert_eq!(grid[(1, 1)].adjacent, 2);
        assert_eq!(grid[(0, 1)].adjacent, 1);
        assert_eq!(grid[(0, 2)].adjacent, 0);
        assert_eq!(grid.mine_count(), 2);
    }
}
