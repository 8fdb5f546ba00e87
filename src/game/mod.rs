//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! It is driven the same way by keyboard play and by RL training.

pub mod action;
pub mod collision;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use action::Heading;
pub use collision::cells_overlap;
pub use config::GameConfig;
pub use engine::{GameEngine, GameEvent, StepInfo, StepResult};
pub use food::Food;
pub use grid::GridGeometry;
pub use snake::Snake;
pub use state::{CollisionType, GameState, GameStatus, Position};
