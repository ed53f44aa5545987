use super::*;

/// Fills every cell with a mine except one, picked uniformly before any click.
#[derive(Clone, Debug, PartialEq)]
pub struct OneShotGenerator {
    seed: u64,
}

impl OneShotGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for OneShotGenerator {
    fn lay_mines(self, grid: &mut Grid) -> Result<CellCount> {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let total = grid.total_cells();
        let safe_index = usize::from(rng.random_range(0..total));

        for (index, coords) in grid.positions().enumerate() {
            grid[coords].mine = index != safe_index;
        }
        grid.recount_adjacent();
        log::debug!("One-shot board laid, {} mines", total - 1);
        Ok(total - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn safe_cells(grid: &Grid) -> Vec<Coord2> {
        grid.iter()
            .filter(|(_, cell)| !cell.is_mine())
            .map(|(coords, _)| coords)
            .collect()
    }

    #[test]
    fn leaves_exactly_one_safe_cell() {
        for seed in 0..32 {
            let mut grid = Grid::new((5, 5));
            let placed = OneShotGenerator::new(seed).lay_mines(&mut grid).unwrap();

            assert_eq!(placed, 24);
            assert_eq!(grid.mine_count(), 24);
            let safe = safe_cells(&grid);
            assert_eq!(safe.len(), 1);
            let expected = grid.iter_neighbors(safe[0]).count() as u8;
            assert_eq!(grid[safe[0]].adjacent_mines(), expected);
        }
    }

    #[test]
    fn safe_cell_moves_with_seed() {
        let positions: std::collections::BTreeSet<_> = (0..64)
            .map(|seed| {
                let mut grid = Grid::new((5, 5));
                OneShotGenerator::new(seed).lay_mines(&mut grid).unwrap();
                safe_cells(&grid)[0]
            })
            .collect();

        assert!(positions.len() > 1);
    }

    #[test]
    fn single_cell_board_is_safe() {
        let mut grid = Grid::new((1, 1));
        assert_eq!(OneShotGenerator::new(9).lay_mines(&mut grid).unwrap(), 0);
        assert!(!grid[(0, 0)].is_mine());
    }
}
