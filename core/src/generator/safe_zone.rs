use super::*;

/// Random draws allowed per mine before switching to sampling from the remaining cells.
const ATTEMPTS_PER_MINE: usize = 64;

/// Uniform placement that keeps the first-clicked cell and its neighbors free of mines.
#[derive(Clone, Debug, PartialEq)]
pub struct SafeZoneGenerator {
    seed: u64,
    origin: Coord2,
    mines: CellCount,
}

impl SafeZoneGenerator {
    pub fn new(seed: u64, origin: Coord2, mines: CellCount) -> Self {
        Self {
            seed,
            origin,
            mines,
        }
    }
}

fn is_eligible(grid: &Grid, origin: Coord2, coords: Coord2) -> bool {
    chebyshev(coords, origin) > 1 && !grid[coords].is_mine()
}

impl MineGenerator for SafeZoneGenerator {
    fn lay_mines(self, grid: &mut Grid) -> Result<CellCount> {
        use rand::prelude::*;

        let origin = grid.validate_coords(self.origin)?;
        let (rows, cols) = grid.size();

        let eligible = grid
            .positions()
            .filter(|&pos| is_eligible(grid, origin, pos))
            .count();
        if usize::from(self.mines) > eligible {
            log::warn!(
                "Cannot keep {:?} safe, requested {} mines but only {} cells are eligible",
                origin,
                self.mines,
                eligible
            );
            return Err(GameError::TooManyMines);
        }

        log::debug!("Laying {} mines around safe origin {:?}", self.mines, origin);
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed: CellCount = 0;
        let mut attempts = 0;
        let budget = usize::from(self.mines) * ATTEMPTS_PER_MINE;

        while placed < self.mines && attempts < budget {
            attempts += 1;
            let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
            if is_eligible(grid, origin, coords) {
                grid[coords].mine = true;
                placed += 1;
            }
        }

        if placed < self.mines {
            let missing = usize::from(self.mines - placed);
            log::warn!(
                "Rejection sampling gave up after {} draws, picking the last {} mines directly",
                attempts,
                missing
            );
            let remaining: Vec<Coord2> = grid
                .positions()
                .filter(|&pos| is_eligible(grid, origin, pos))
                .collect();
            for &coords in remaining.choose_multiple(&mut rng, missing) {
                grid[coords].mine = true;
                placed += 1;
            }
        }

        grid.recount_adjacent();
        Ok(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn easy_board_keeps_center_block_clear() {
        let mut grid = Grid::new((9, 9));
        let placed = SafeZoneGenerator::new(7, (4, 4), 10)
            .lay_mines(&mut grid)
            .unwrap();

        assert_eq!(placed, 10);
        assert_eq!(grid.mine_count(), 10);
        for row in 3..=5 {
            for col in 3..=5 {
                assert!(!grid[(row, col)].is_mine(), "mine at ({row}, {col})");
            }
        }
        assert_eq!(grid[(4, 4)].adjacent_mines(), 0);
    }

    #[test]
    fn same_seed_same_layout() {
        let mut a = Grid::new((16, 30));
        let mut b = Grid::new((16, 30));
        SafeZoneGenerator::new(42, (0, 0), 99).lay_mines(&mut a).unwrap();
        SafeZoneGenerator::new(42, (0, 0), 99).lay_mines(&mut b).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn fully_packed_board_terminates() {
        // 81 - 9 eligible cells, all of them must become mines
        let mut grid = Grid::new((9, 9));
        let placed = SafeZoneGenerator::new(3, (4, 4), 72)
            .lay_mines(&mut grid)
            .unwrap();

        assert_eq!(placed, 72);
        assert_eq!(grid.mine_count(), 72);
        assert_eq!(grid[(4, 4)].adjacent_mines(), 0);
        assert_eq!(grid[(3, 3)].adjacent_mines(), 5);
    }

    #[test]
    fn overfull_request_is_rejected() {
        let mut grid = Grid::new((3, 3));
        let result = SafeZoneGenerator::new(0, (1, 1), 1).lay_mines(&mut grid);

        assert_eq!(result, Err(GameError::TooManyMines));
        assert_eq!(grid.mine_count(), 0);
    }

    #[test]
    fn origin_out_of_range_is_rejected() {
        let mut grid = Grid::new((3, 3));
        let result = SafeZoneGenerator::new(0, (3, 0), 0).lay_mines(&mut grid);

        assert_eq!(result, Err(GameError::InvalidCoords));
    }

    proptest! {
        #[test]
        fn placement_respects_count_and_safe_zone(
            seed in any::<u64>(),
            rows in 3u8..20,
            cols in 3u8..20,
            origin_row in 0u8..20,
            origin_col in 0u8..20,
            density in 0.0f64..1.0,
        ) {
            let origin = (origin_row % rows, origin_col % cols);
            let max = max_mines(rows, cols);
            let mines = (f64::from(max) * density) as CellCount;
            let mut grid = Grid::new((rows, cols));

            let placed = SafeZoneGenerator::new(seed, origin, mines).lay_mines(&mut grid).unwrap();

            prop_assert_eq!(placed, mines);
            prop_assert_eq!(grid.mine_count(), mines);
            for (coords, cell) in grid.iter() {
                if chebyshev(coords, origin) <= 1 {
                    prop_assert!(!cell.is_mine());
                }
                if !cell.is_mine() {
                    let expected = grid
                        .iter_neighbors(coords)
                        .filter(|&pos| grid[pos].is_mine())
                        .count();
                    prop_assert_eq!(usize::from(cell.adjacent_mines()), expected);
                }
            }
        }
    }
}
