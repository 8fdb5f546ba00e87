/// Direction the snake's head moves on the next step
///
/// Declaration order is the fixed action order: Up, Down, Left, Right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    /// All headings in action-index order
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    /// Map a discrete action index to a heading
    pub fn from_index(idx: usize) -> Option<Heading> {
        Self::ALL.get(idx).copied()
    }

    /// Discrete action index of this heading
    pub fn index(&self) -> usize {
        match self {
            Heading::Up => 0,
            Heading::Down => 1,
            Heading::Left => 2,
            Heading::Right => 3,
        }
    }

    /// Returns the delta (dx, dy) in cells for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }

    /// Indicator vector with a single 1.0 at this heading's index
    pub fn one_hot(&self) -> [f32; 4] {
        let mut v = [0.0; 4];
        v[self.index()] = 1.0;
        v
    }
}
