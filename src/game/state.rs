use super::food::Food;
use super::snake::Snake;

/// A grid-aligned pixel position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Placeholder for a freshly grown segment that has not been moved yet
    pub const OFF_BOARD: Position = Position { x: -1, y: -1 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Type of collision that ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head left the board
    Wall,
    /// Head ran into the body
    SelfCollision,
}

/// Lifecycle of one game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    Terminated,
}

/// Complete game state owned by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub status: GameStatus,
    pub steps: u32,
}

impl GameState {
    pub fn new(snake: Snake, food: Food) -> Self {
        Self {
            snake,
            food,
            status: GameStatus::Running,
            steps: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.status == GameStatus::Running
    }

    /// Score shown to players: the snake's length
    pub fn score(&self) -> usize {
        self.snake.len()
    }
}
