use crate::*;
pub use one_shot::*;
pub use safe_zone::*;

mod one_shot;
mod safe_zone;

/// Lays mines onto a mine-free grid and fills in the adjacency counts.
pub trait MineGenerator {
    /// Returns the number of mines placed.
    fn lay_mines(self, grid: &mut Grid) -> Result<CellCount>;
}
