//! Keyboard input mapping for interactive play

pub mod handler;

pub use handler::{InputHandler, KeyAction};
