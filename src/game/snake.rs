use super::action::Heading;
use super::state::Position;

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
    /// Heading applied on the next move
    heading: Heading,
}

impl Snake {
    /// Create a one-segment snake at `head`
    pub fn new(head: Position, heading: Heading) -> Self {
        Self {
            body: vec![head],
            heading,
        }
    }

    /// Create a snake from explicit segments. Returns `None` for an empty body.
    pub fn from_segments(body: Vec<Position>, heading: Heading) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Self { body, heading })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// All segments, head first
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Record the heading for the next move. Reversal is not rejected.
    pub fn set_heading(&mut self, heading: Heading) {
        self.heading = heading;
    }

    /// Advance one cell of `cell_size` pixels.
    ///
    /// Each segment takes its predecessor's old position (tail first) before
    /// the head moves, so segment 1 always receives the head's previous cell.
    pub fn move_step(&mut self, cell_size: i32) {
        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }

        let (dx, dy) = self.heading.delta();
        self.body[0] = self.body[0].moved_by(dx * cell_size, dy * cell_size);
    }

    /// Append one segment at the off-board placeholder
    pub fn grow(&mut self) {
        self.body.push(Position::OFF_BOARD);
    }

    /// Indicator vector for the current heading in Up, Down, Left, Right order
    pub fn direction_one_hot(&self) -> [f32; 4] {
        self.heading.one_hot()
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
