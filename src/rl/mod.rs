//! Reinforcement learning interface for the Snake game
//!
//! Provides:
//! - Fixed-length vector observations
//! - A 4-action environment with reset/step
//! - The agent contract plus a replay memory
//! - A linear epsilon-greedy Q-learning agent and a random baseline

pub mod agent;
pub mod config;
pub mod environment;
pub mod error;
pub mod memory;
pub mod observation;
pub mod q_agent;

pub use agent::{Agent, RandomAgent, Transition};
pub use config::AgentConfig;
pub use environment::SnakeEnvironment;
pub use error::EnvError;
pub use memory::ReplayMemory;
pub use observation::{encode_observation, observation_size};
pub use q_agent::LinearQAgent;
