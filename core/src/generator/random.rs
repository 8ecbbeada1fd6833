use super::*;

/// Uniform random placement driven by a seeded [`rand::rngs::SmallRng`].
///
/// The same seed and exclusion set always produce the same layout.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn place(self, grid: &mut Grid, mines: CellCount, excluded: &BTreeSet<Coord2>) -> Result<()> {
        use rand::prelude::*;

        let mut eligible: Vec<Coord2> = grid
            .coords()
            .filter(|coords| !excluded.contains(coords))
            .collect();
        let mines = usize::from(mines);

        if mines > eligible.len() {
            log::warn!(
                "Cannot place {} mines, only {} cells are eligible",
                mines,
                eligible.len()
            );
            return Err(GameError::InsufficientSpace);
        }

        grid.clear_mines();

        // partial Fisher-Yates, the first `mines` slots are a uniform sample
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for i in 0..mines {
            let pick = rng.random_range(i..eligible.len());
            eligible.swap(i, pick);
        }

        for &coords in &eligible[..mines] {
            grid[coords].mine = true;
        }
        grid.recount_adjacent();

        log::debug!(
            "Placed {} mines with seed {}, {} cells excluded",
            mines,
            self.seed,
            excluded.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(seed: u64, size: Coord2, mines: CellCount, excluded: &[Coord2]) -> Grid {
        let mut grid = Grid::new(size.0, size.1).unwrap();
        let excluded = excluded.iter().copied().collect();
        RandomMineGenerator::new(seed)
            .place(&mut grid, mines, &excluded)
            .unwrap();
        grid
    }

    #[test]
    fn places_exact_count_outside_exclusion() {
        for seed in 0..32 {
            let grid = placed(seed, (5, 7), 20, &[(2, 3), (0, 0)]);

            assert_eq!(grid.mine_count(), 20);
            assert!(!grid[(2, 3)].mine);
            assert!(!grid[(0, 0)].mine);
        }
    }

    #[test]
    fn fills_every_eligible_cell() {
        let grid = placed(7, (3, 3), 8, &[(1, 1)]);

        assert_eq!(grid.mine_count(), 8);
        assert!(!grid[(1, 1)].mine);
        assert_eq!(grid[(1, 1)].adjacent, 8);
    }

    #[test]
    fn same_seed_same_layout() {
        let a = placed(42, (9, 9), 10, &[(4, 4)]);
        let b = placed(42, (9, 9), 10, &[(4, 4)]);

        assert_eq!(a, b);
    }

    #[test]
    fn adjacency_matches_neighbors() {
        let grid = placed(3, (6, 6), 9, &[]);

        for (coords, cell) in grid.iter() {
            let expected = grid.neighbors(coords).filter(|&pos| grid[pos].mine).count();
            assert_eq!(usize::from(cell.adjacent), expected);
        }
    }

    #[test]
    fn rejects_when_exclusion_leaves_too_little_room() {
        let mut grid = Grid::new(2, 2).unwrap();
        let excluded = BTreeSet::from([(0, 0), (1, 1)]);

        let result = RandomMineGenerator::new(1).place(&mut grid, 3, &excluded);

        assert_eq!(result, Err(GameError::InsufficientSpace));
        assert_eq!(grid.mine_count(), 0);
    }

    #[test]
    fn every_eligible_cell_can_be_chosen() {
        let mut hits = BTreeSet::new();
        for seed in 0..200 {
            let grid = placed(seed, (3, 3), 1, &[(0, 0)]);
            hits.extend(grid.mine_coords());
        }

        assert_eq!(hits.len(), 8);
        assert!(!hits.contains(&(0, 0)));
    }

    #[test]
    fn picks_are_uniform_over_eligible_cells() {
        const SEEDS: u64 = 40_000;
        let mut hits = ndarray::Array2::<u32>::zeros((4, 4));
        for seed in 0..SEEDS {
            let grid = placed(seed, (4, 4), 3, &[(0, 0)]);
            for coords in grid.mine_coords() {
                hits[coords.to_nd_index()] += 1;
            }
        }

        // 3 of 15 eligible cells per layout
        let expected = SEEDS as u32 * 3 / 15;
        assert_eq!(hits[[0, 0]], 0);
        for (index, &count) in hits.indexed_iter() {
            if index != (0, 0) {
                assert!(
                    count.abs_diff(expected) < expected / 10,
                    "cell {index:?} hit {count} times, expected about {expected}"
                );
            }
        }
    }
}
