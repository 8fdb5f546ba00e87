//! Terminal rendering of game state

pub mod renderer;

pub use renderer::Renderer;
