use super::error::EnvError;
use super::observation::{encode_observation, observation_size};
use crate::game::{GameConfig, GameEngine, GameState, Heading, StepInfo};

/// Snake environment for reinforcement learning
///
/// Wraps the game engine and provides:
/// - Flat `f32` observations of constant length
/// - Discrete action space (4 actions: Up, Down, Left, Right)
/// - Standard RL interface (reset, step)
pub struct SnakeEnvironment {
    engine: GameEngine,
    max_snake_length: usize,
    last_info: StepInfo,
}

impl SnakeEnvironment {
    /// Number of discrete actions
    pub const ACTION_SPACE: usize = 4;

    /// Create a new Snake environment
    pub fn new(config: GameConfig) -> Self {
        let max_snake_length = config.max_snake_length;
        Self {
            engine: GameEngine::new(config),
            max_snake_length,
            last_info: StepInfo::default(),
        }
    }

    /// Reset the environment and return initial observation
    pub fn reset(&mut self) -> Vec<f32> {
        self.engine.reset();
        self.last_info = StepInfo::default();
        self.observation()
    }

    /// Step the environment with a discrete action
    ///
    /// Actions:
    /// - 0: Move Up
    /// - 1: Move Down
    /// - 2: Move Left
    /// - 3: Move Right
    ///
    /// Returns: (observation, reward, terminated)
    ///
    /// Reward is the death penalty on termination, the food reward when this
    /// step grew the snake, and 0 otherwise. An out-of-range action is rejected
    /// before anything changes.
    pub fn step(&mut self, action: usize) -> Result<(Vec<f32>, f32, bool), EnvError> {
        let heading = Heading::from_index(action).ok_or(EnvError::InvalidAction {
            action,
            action_space: Self::ACTION_SPACE,
        })?;
        self.engine.set_heading(heading);

        let step_result = self.engine.step();
        let config = self.engine.config();
        let reward = if step_result.terminated {
            config.death_penalty
        } else if step_result.info.ate_food {
            config.food_reward
        } else {
            0.0
        };
        let done = step_result.terminated;
        self.last_info = step_result.info;

        Ok((self.observation(), reward, done))
    }

    /// Get current observation without stepping
    pub fn observation(&self) -> Vec<f32> {
        encode_observation(self.engine.state(), self.engine.grid(), self.max_snake_length)
    }

    /// Length of every observation this environment produces
    pub fn state_size(&self) -> usize {
        observation_size(self.max_snake_length)
    }

    pub fn action_space(&self) -> usize {
        Self::ACTION_SPACE
    }

    /// Current score (snake length)
    pub fn score(&self) -> usize {
        self.engine.state().score()
    }

    /// Outcome details of the most recent step
    pub fn last_info(&self) -> &StepInfo {
        &self.last_info
    }

    /// Get reference to current game state (for rendering and inspection)
    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    #[cfg(test)]
    pub(crate) fn engine_mut(&mut self) -> &mut GameEngine {
        &mut self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Food, GameEvent, Position, Snake};

    fn env() -> SnakeEnvironment {
        SnakeEnvironment::new(GameConfig::seeded(17))
    }

    #[test]
    fn test_environment_creation() {
        let env = env();
        assert!(env.state().is_alive());
        assert_eq!(env.score(), 1);
        assert_eq!(env.state_size(), 440);
        assert_eq!(env.action_space(), 4);
    }

    #[test]
    fn test_reset_returns_valid_observation() {
        let mut env = env();
        env.step(3).unwrap();
        env.step(3).unwrap();

        let obs = env.reset();
        assert_eq!(obs.len(), env.state_size());
        assert_eq!(env.score(), 1);
        assert_eq!(env.state().snake.head(), Position::new(40, 40));
        assert_eq!(env.state().snake.heading(), Heading::Down);
        assert!(env.state().is_alive());
        // Heading one-hot reports Down
        assert_eq!(&obs[4..8], &[0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_step_with_directional_actions() {
        for action in 0..4 {
            let mut env = env();
            let (obs, _reward, _done) = env.step(action).unwrap();
            assert_eq!(obs.len(), 440);
            assert_eq!(env.state().snake.heading(), Heading::ALL[action]);
        }
    }

    #[test]
    fn test_invalid_action_leaves_state_unchanged() {
        let mut env = env();
        env.step(3).unwrap();
        let before = env.state().clone();

        let err = env.step(7).unwrap_err();

        assert_eq!(
            err,
            EnvError::InvalidAction {
                action: 7,
                action_space: 4
            }
        );
        assert_eq!(env.state(), &before);
    }

    #[test]
    fn test_moving_down_without_reaching_food() {
        let mut env = env();

        // Head walks (40,40) -> (40,120); food sits at (120,120)
        for expected_y in [80, 120] {
            let (_obs, reward, done) = env.step(1).unwrap();
            assert_eq!(reward, 0.0);
            assert!(!done);
            assert_eq!(env.state().snake.head(), Position::new(40, expected_y));
        }
        assert_eq!(env.score(), 1);
        assert_eq!(env.state().food.position(), Position::new(120, 120));
    }

    #[test]
    fn test_food_reward() {
        let mut env = env();
        env.engine_mut().state_mut().food = Food::new(Position::new(40, 80));
        let food_before = env.state().food.position();

        let (obs, reward, done) = env.step(1).unwrap();

        assert_eq!(reward, 10.0);
        assert!(!done);
        assert_eq!(env.score(), 2);
        assert_ne!(env.state().food.position(), food_before);
        assert_eq!(env.last_info().events(), vec![GameEvent::Eat]);
        // Fresh segment still carries the off-board placeholder
        assert!((obs[8] - (-1.0 / 720.0)).abs() < 1e-6);
    }

    #[test]
    fn test_no_reward_on_step_after_eating() {
        let mut env = env();
        env.engine_mut().state_mut().food = Food::new(Position::new(40, 80));
        env.step(1).unwrap();

        // Park the new food far away
        env.engine_mut().state_mut().food = Food::new(Position::new(680, 440));
        let (_obs, reward, _done) = env.step(1).unwrap();
        assert_eq!(reward, 0.0);
    }

    #[test]
    fn test_terminal_state_handling() {
        let mut env = env();

        // Up twice: y = 0 is on the board, y = -40 is not
        let (_obs, reward, done) = env.step(0).unwrap();
        assert!(!done);
        assert_eq!(reward, 0.0);

        let (obs, reward, done) = env.step(0).unwrap();
        assert!(done);
        assert_eq!(reward, -10.0);
        assert_eq!(obs.len(), 440);
        assert!(!env.state().is_alive());
        assert_eq!(env.last_info().events(), vec![GameEvent::Crash]);
    }

    #[test]
    fn test_self_collision_penalty() {
        let mut env = env();
        let snake = Snake::from_segments(
            vec![
                Position::new(200, 200),
                Position::new(160, 200),
                Position::new(120, 200),
            ],
            Heading::Right,
        )
        .unwrap();
        env.engine_mut().state_mut().snake = snake;

        let (_obs, reward, done) = env.step(2).unwrap();
        assert!(done);
        assert_eq!(reward, -10.0);
    }

    #[test]
    fn test_crash_outweighs_food_reward() {
        let mut env = env();
        let snake = Snake::from_segments(
            vec![
                Position::new(200, 200),
                Position::new(160, 200),
                Position::new(120, 200),
            ],
            Heading::Right,
        )
        .unwrap();
        env.engine_mut().state_mut().snake = snake;
        env.engine_mut().state_mut().food = Food::new(Position::new(160, 200));

        let (_obs, reward, done) = env.step(2).unwrap();

        assert!(done);
        assert_eq!(reward, -10.0);
        assert_eq!(env.score(), 4);
        assert_eq!(
            env.last_info().events(),
            vec![GameEvent::Eat, GameEvent::Crash]
        );
    }

    #[test]
    fn test_multiple_episodes() {
        let mut env = env();

        for _ in 0..2 {
            env.reset();
            let mut steps = 0;
            let mut done = false;

            // Walking right from x=40 leaves the 720px board after 18 steps
            while !done && steps < 100 {
                let (_obs, _reward, terminated) = env.step(3).unwrap();
                done = terminated;
                steps += 1;
            }

            assert!(done);
            assert_eq!(steps, 18);
        }
    }
}
