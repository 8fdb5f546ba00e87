//! Training mode
//!
//! Runs episodes in the Snake environment, feeding every transition to the
//! agent's replay memory and replaying minibatches once enough experience has
//! been collected.
//!
//! # Example
//!
//! ```rust
//! use snake_rl::game::GameConfig;
//! use snake_rl::modes::{TrainConfig, TrainMode};
//! use snake_rl::rl::RandomAgent;
//!
//! let mut config = TrainConfig::new(2);
//! config.game_config = GameConfig::seeded(7);
//!
//! let mut train_mode = TrainMode::new(config, RandomAgent::new(Some(7)));
//! train_mode.run()?;
//! assert_eq!(train_mode.stats().total_episodes(), 2);
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::game::GameConfig;
use crate::metrics::TrainingStats;
use crate::rl::{Agent, AgentConfig, SnakeEnvironment, Transition};

/// Configuration for training mode
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Number of episodes to train
    pub num_episodes: usize,

    /// Minibatch size for replay; replay starts once memory holds more
    pub batch_size: usize,

    /// Log a stats summary every N episodes
    pub log_frequency: usize,

    /// Game configuration (board, rewards, seed)
    pub game_config: GameConfig,

    /// Agent hyperparameters
    pub agent_config: AgentConfig,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            num_episodes: 1000,
            batch_size: 32,
            log_frequency: 100,
            game_config: GameConfig::default(),
            agent_config: AgentConfig::default(),
        }
    }
}

impl TrainConfig {
    /// Create a new training configuration with defaults
    pub fn new(num_episodes: usize) -> Self {
        Self {
            num_episodes,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be positive".to_string());
        }
        if self.log_frequency == 0 {
            return Err("log_frequency must be positive".to_string());
        }
        self.game_config.validate()?;
        self.agent_config.validate()
    }
}

/// Episode loop driving any [`Agent`] against the environment
pub struct TrainMode<A: Agent> {
    agent: A,
    env: SnakeEnvironment,
    stats: TrainingStats,
    config: TrainConfig,
}

impl<A: Agent> TrainMode<A> {
    pub fn new(config: TrainConfig, agent: A) -> Self {
        let env = SnakeEnvironment::new(config.game_config.clone());

        // 100-episode rolling window
        let stats = TrainingStats::new(100);

        Self {
            agent,
            env,
            stats,
            config,
        }
    }

    /// Run the training loop for the configured number of episodes
    pub fn run(&mut self) -> Result<()> {
        self.log_header();

        let total = self.config.num_episodes;
        for episode in 1..=total {
            let (episode_reward, episode_steps, episode_score) = self
                .run_episode()
                .with_context(|| format!("Episode {} failed", episode))?;

            self.stats
                .record_episode(episode_reward, episode_steps, episode_score);
            self.stats.record_epsilon(self.agent.epsilon());

            tracing::info!(
                episode,
                total,
                score = episode_score,
                total_reward = episode_reward,
                "episode {}/{}, score: {}, total reward: {}",
                episode,
                total,
                episode_score,
                episode_reward
            );

            if episode % self.config.log_frequency == 0 {
                tracing::info!("{}", self.stats.format_summary());
            }
        }

        tracing::info!(summary = %self.stats.format_summary(), "training complete");

        Ok(())
    }

    /// Run a single training episode
    ///
    /// Returns the total reward, the number of steps and the final snake
    /// length.
    pub fn run_episode(&mut self) -> Result<(f32, usize, usize)> {
        let mut obs = self.env.reset();
        let mut episode_reward = 0.0;
        let mut episode_steps = 0;
        let mut done = false;

        while !done {
            let action = self.agent.act(&obs, true)?;
            let (next_obs, reward, terminated) = self.env.step(action)?;

            for event in self.env.last_info().events() {
                tracing::debug!(event = event.name(), step = episode_steps + 1, "game event");
            }

            self.agent.remember(Transition {
                state: obs,
                action,
                reward,
                next_state: next_obs.clone(),
                done: terminated,
            })?;

            episode_reward += reward;
            episode_steps += 1;
            done = terminated;
            obs = next_obs;

            if self.agent.memory_len() > self.config.batch_size {
                if let Some(loss) = self.agent.replay(self.config.batch_size) {
                    self.stats.record_update(loss);
                }
            }
        }

        Ok((episode_reward, episode_steps, self.env.score()))
    }

    fn log_header(&self) {
        let game = &self.config.game_config;
        let agent = &self.config.agent_config;
        tracing::info!(
            episodes = self.config.num_episodes,
            board = %format!("{}x{}", game.board_width_cells, game.board_height_cells),
            state_size = self.env.state_size(),
            batch_size = self.config.batch_size,
            gamma = agent.gamma,
            learning_rate = agent.learning_rate,
            epsilon_decay = agent.epsilon_decay,
            memory_capacity = agent.memory_capacity,
            "starting training"
        );
    }

    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    /// Hand back the trained agent
    pub fn into_agent(self) -> A {
        self.agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::{LinearQAgent, RandomAgent, observation_size};

    fn small_config(episodes: usize) -> TrainConfig {
        let mut config = TrainConfig::new(episodes);
        config.game_config = GameConfig {
            seed: Some(9),
            ..GameConfig::new(6, 6)
        };
        config.agent_config.seed = Some(9);
        config.batch_size = 8;
        config
    }

    fn q_agent(config: &TrainConfig) -> LinearQAgent {
        LinearQAgent::new(
            observation_size(config.game_config.max_snake_length),
            config.agent_config.clone(),
        )
    }

    #[test]
    fn test_train_config_defaults() {
        let config = TrainConfig::default();
        assert_eq!(config.num_episodes, 1000);
        assert_eq!(config.batch_size, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_train_config_rejects_zero_batch() {
        let mut config = TrainConfig::new(10);
        config.batch_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_run_single_episode() {
        let config = small_config(1);
        let mut train_mode = TrainMode::new(config, RandomAgent::new(Some(1)));

        let (reward, steps, score) = train_mode.run_episode().unwrap();
        assert!(steps > 0);
        assert!(score >= 1);
        // One food reward per growth, then the crash penalty
        assert_eq!(reward, 10.0 * (score - 1) as f32 - 10.0);
    }

    #[test]
    fn test_run_records_every_episode() {
        let config = small_config(5);
        let agent = q_agent(&config);
        let mut train_mode = TrainMode::new(config, agent);

        train_mode.run().unwrap();

        let stats = train_mode.stats();
        assert_eq!(stats.total_episodes(), 5);
        assert!(stats.best_score() >= 1);
        assert!(stats.epsilon().is_some());
    }

    #[test]
    fn test_replay_waits_for_batch() {
        let mut config = small_config(1);
        config.batch_size = 10_000;
        let agent = q_agent(&config);
        let mut train_mode = TrainMode::new(config, agent);

        train_mode.run().unwrap();

        // No replay ran, so epsilon never decayed
        assert_eq!(train_mode.agent().epsilon(), Some(1.0));
        assert!(train_mode.agent().memory_len() > 0);
    }

    #[test]
    fn test_replay_decays_epsilon() {
        let config = small_config(20);
        let agent = q_agent(&config);
        let mut train_mode = TrainMode::new(config, agent);

        train_mode.run().unwrap();

        let agent = train_mode.into_agent();
        assert!(agent.epsilon().unwrap_or(1.0) < 1.0);
    }
}
