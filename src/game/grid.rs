use super::state::Position;

/// Fixed board dimensions measured in cells, plus the pixel size of one cell
///
/// Positions on the board are pixel coordinates aligned to `cell_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub width_cells: i32,
    pub height_cells: i32,
    pub cell_size: i32,
}

impl GridGeometry {
    pub fn new(width_cells: i32, height_cells: i32, cell_size: i32) -> Self {
        Self {
            width_cells,
            height_cells,
            cell_size,
        }
    }

    /// Board width in pixels
    pub fn width(&self) -> i32 {
        self.width_cells * self.cell_size
    }

    /// Board height in pixels
    pub fn height(&self) -> i32 {
        self.height_cells * self.cell_size
    }

    /// Pixel position of the top-left corner of a cell
    pub fn cell(&self, cx: i32, cy: i32) -> Position {
        Position::new(cx * self.cell_size, cy * self.cell_size)
    }

    /// Cell coordinates of a pixel position
    pub fn to_cell(&self, pos: Position) -> (i32, i32) {
        (
            pos.x.div_euclid(self.cell_size),
            pos.y.div_euclid(self.cell_size),
        )
    }

    /// Whether a position lies inside the playable rectangle.
    ///
    /// Both edges are inclusive: `[0, width] x [0, height]`.
    pub fn contains(&self, pos: Position) -> bool {
        (0..=self.width()).contains(&pos.x) && (0..=self.height()).contains(&pos.y)
    }

    /// Position scaled into board-relative units
    pub fn normalize(&self, pos: Position) -> (f32, f32) {
        (
            pos.x as f32 / self.width() as f32,
            pos.y as f32 / self.height() as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_dimensions() {
        let grid = GridGeometry::new(18, 12, 40);
        assert_eq!(grid.width(), 720);
        assert_eq!(grid.height(), 480);
    }

    #[test]
    fn test_cell_conversion() {
        let grid = GridGeometry::new(18, 12, 40);
        assert_eq!(grid.cell(3, 2), Position::new(120, 80));
        assert_eq!(grid.to_cell(Position::new(120, 80)), (3, 2));
        assert_eq!(grid.to_cell(Position::new(-40, 0)), (-1, 0));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let grid = GridGeometry::new(18, 12, 40);
        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(720, 480)));
        assert!(!grid.contains(Position::new(-40, 0)));
        assert!(!grid.contains(Position::new(760, 0)));
        assert!(!grid.contains(Position::new(0, 520)));
    }

    #[test]
    fn test_normalize() {
        let grid = GridGeometry::new(18, 12, 40);
        let (x, y) = grid.normalize(Position::new(360, 120));
        assert!((x - 0.5).abs() < 1e-6);
        assert!((y - 0.25).abs() < 1e-6);
    }
}
