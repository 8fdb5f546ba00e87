use rand::Rng;

use super::grid::GridGeometry;
use super::state::Position;

/// The single food item on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Position,
}

impl Food {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Move to a uniformly random interior cell.
    ///
    /// Cells are drawn from `[1, width_cells - 1] x [1, height_cells - 1]`.
    /// Snake-occupied cells are not excluded. A board one cell wide or tall
    /// has no interior on that axis, so cell 1 is used.
    pub fn relocate<R: Rng + ?Sized>(&mut self, rng: &mut R, grid: &GridGeometry) {
        let cx = rng.gen_range(1..grid.width_cells.max(2));
        let cy = rng.gen_range(1..grid.height_cells.max(2));
        self.position = grid.cell(cx, cy);
    }
}
