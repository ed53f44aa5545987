//! Minesweeper game core: board model, mine placement, flood reveal, win/loss detection and
//! the per-game session that a presentation layer drives.

pub use cell::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use session::*;
pub use settings::*;
pub use stats::*;
pub use storage::*;
pub use timer::*;
pub use types::*;

mod cell;
mod difficulty;
mod engine;
mod error;
mod generator;
mod grid;
mod session;
mod settings;
mod stats;
mod storage;
mod timer;
mod types;
