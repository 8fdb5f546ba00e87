use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::environment::SnakeEnvironment;
use super::error::EnvError;

/// One experience tuple (s, a, r, s', done)
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: Vec<f32>,
    pub action: usize,
    pub reward: f32,
    pub next_state: Vec<f32>,
    pub done: bool,
}

/// Contract between the environment loop and a learning agent
pub trait Agent {
    /// Pick an action index for `observation`. With `explore` false the
    /// agent acts greedily.
    fn act(&mut self, observation: &[f32], explore: bool) -> Result<usize, EnvError>;

    /// Store an experience for later replay
    fn remember(&mut self, transition: Transition) -> Result<(), EnvError>;

    /// Learn from a minibatch of stored experience. Returns the mean loss
    /// when an update happened.
    fn replay(&mut self, batch_size: usize) -> Option<f32>;

    /// Number of stored experiences
    fn memory_len(&self) -> usize;

    /// Current exploration rate, if the agent has one
    fn epsilon(&self) -> Option<f32> {
        None
    }
}

/// Baseline agent that picks actions uniformly at random and never learns
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl Agent for RandomAgent {
    fn act(&mut self, _observation: &[f32], _explore: bool) -> Result<usize, EnvError> {
        Ok(self.rng.gen_range(0..SnakeEnvironment::ACTION_SPACE))
    }

    fn remember(&mut self, _transition: Transition) -> Result<(), EnvError> {
        Ok(())
    }

    fn replay(&mut self, _batch_size: usize) -> Option<f32> {
        None
    }

    fn memory_len(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_agent_actions_in_range() {
        let mut agent = RandomAgent::new(Some(4));
        let mut seen = [false; 4];
        for _ in 0..200 {
            let action = agent.act(&[], true).unwrap();
            assert!(action < 4);
            seen[action] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_random_agent_does_not_learn() {
        let mut agent = RandomAgent::new(Some(4));
        agent
            .remember(Transition {
                state: vec![],
                action: 0,
                reward: 1.0,
                next_state: vec![],
                done: true,
            })
            .unwrap();
        assert_eq!(agent.memory_len(), 0);
        assert_eq!(agent.replay(32), None);
        assert_eq!(agent.epsilon(), None);
    }
}
