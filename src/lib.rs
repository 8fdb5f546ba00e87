//! Snake RL - A Snake game with a reinforcement-learning environment
//!
//! This library provides:
//! - Core game simulation (game module)
//! - Agent-facing environment, replay memory and agents (rl module)
//! - TUI rendering (render module) and keyboard input (input module)
//! - Session and training statistics (metrics module)
//! - Execution modes: human play, training, agent visualization (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod rl;
