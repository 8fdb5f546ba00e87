//! Q-learning agent hyperparameter configuration

use serde::{Deserialize, Serialize};

/// Configuration for the epsilon-greedy Q-learning agent
///
/// # Example
///
/// ```rust
/// use snake_rl::rl::AgentConfig;
///
/// // Use default hyperparameters
/// let config = AgentConfig::default();
///
/// // Or customize specific parameters
/// let config = AgentConfig {
///     learning_rate: 1e-2,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Discount factor for future rewards (gamma)
    ///
    /// Default: 0.95
    pub gamma: f32,

    /// Starting probability of taking a random action
    ///
    /// Default: 1.0
    pub epsilon: f32,

    /// Floor for the exploration rate
    ///
    /// Default: 0.01
    pub epsilon_min: f32,

    /// Multiplier applied to epsilon after every replay
    ///
    /// Default: 0.995
    pub epsilon_decay: f32,

    /// Step size for the SGD update of the action-value weights
    ///
    /// Default: 0.001
    pub learning_rate: f32,

    /// Number of transitions kept for replay
    ///
    /// Default: 2000
    pub memory_capacity: usize,

    /// Seed for exploration and minibatch sampling
    pub seed: Option<u64>,
}

impl AgentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// `Ok(())` if all parameters are valid, `Err(String)` with an error message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(format!("gamma must be in [0, 1], got {}", self.gamma));
        }

        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(format!("epsilon must be in [0, 1], got {}", self.epsilon));
        }

        if !(0.0..=1.0).contains(&self.epsilon_min) || self.epsilon_min > self.epsilon {
            return Err(format!(
                "epsilon_min must be in [0, epsilon], got {}",
                self.epsilon_min
            ));
        }

        if self.epsilon_decay <= 0.0 || self.epsilon_decay > 1.0 {
            return Err(format!(
                "epsilon_decay must be in (0, 1], got {}",
                self.epsilon_decay
            ));
        }

        if self.learning_rate <= 0.0 {
            return Err(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            ));
        }

        if self.memory_capacity == 0 {
            return Err("memory_capacity must be at least 1".to_string());
        }

        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            gamma: 0.95,
            epsilon: 1.0,
            epsilon_min: 0.01,
            epsilon_decay: 0.995,
            learning_rate: 0.001,
            memory_capacity: 2000,
            seed: None,
        }
    }
}
