//! Epsilon-greedy Q-learning agent with a linear action-value model
//!
//! Each action owns a weight vector over the observation plus a bias.
//! `replay` draws a minibatch from replay memory, bootstraps targets
//! `r + gamma * max_a' Q(s', a')` (just `r` on terminal transitions) and
//! applies one SGD step per transition.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::agent::{Agent, Transition};
use super::config::AgentConfig;
use super::environment::SnakeEnvironment;
use super::error::EnvError;
use super::memory::ReplayMemory;

/// Bound on the TD error used for the weight update
const TD_CLIP: f32 = 1.0;

pub struct LinearQAgent {
    config: AgentConfig,
    state_size: usize,
    /// Per-action weights [action][state_size]
    weights: Vec<Vec<f32>>,
    biases: Vec<f32>,
    memory: ReplayMemory,
    epsilon: f32,
    rng: StdRng,
}

impl LinearQAgent {
    /// Create an agent for observations of `state_size` values
    pub fn new(state_size: usize, config: AgentConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let actions = SnakeEnvironment::ACTION_SPACE;
        let weights: Vec<Vec<f32>> = (0..actions)
            .map(|_| {
                (0..state_size)
                    .map(|_| rng.gen_range(-0.01f32..0.01))
                    .collect::<Vec<f32>>()
            })
            .collect();

        Self {
            state_size,
            weights,
            biases: vec![0.0; actions],
            memory: ReplayMemory::new(config.memory_capacity),
            epsilon: config.epsilon,
            rng,
            config,
        }
    }

    /// Action values for an observation
    pub fn q_values(&self, observation: &[f32]) -> Result<Vec<f32>, EnvError> {
        self.check_size(observation)?;
        Ok(self.predict(observation))
    }

    fn predict(&self, observation: &[f32]) -> Vec<f32> {
        self.weights
            .iter()
            .zip(&self.biases)
            .map(|(w, b)| b + w.iter().zip(observation).map(|(wi, xi)| wi * xi).sum::<f32>())
            .collect()
    }

    fn check_size(&self, observation: &[f32]) -> Result<(), EnvError> {
        if observation.len() != self.state_size {
            return Err(EnvError::ObservationSize {
                expected: self.state_size,
                actual: observation.len(),
            });
        }
        Ok(())
    }

    fn learn(&mut self, transition: &Transition) -> f32 {
        let q = self.predict(&transition.state)[transition.action];
        let target = if transition.done {
            transition.reward
        } else {
            let next_max = argmax(&self.predict(&transition.next_state)).1;
            transition.reward + self.config.gamma * next_max
        };

        let td = target - q;
        let step = self.config.learning_rate * td.clamp(-TD_CLIP, TD_CLIP);
        for (w, x) in self.weights[transition.action]
            .iter_mut()
            .zip(&transition.state)
        {
            *w += step * x;
        }
        self.biases[transition.action] += step;

        0.5 * td * td
    }

    pub fn state_size(&self) -> usize {
        self.state_size
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}

impl Agent for LinearQAgent {
    fn act(&mut self, observation: &[f32], explore: bool) -> Result<usize, EnvError> {
        self.check_size(observation)?;
        if explore && self.rng.gen_range(0.0..1.0) < self.epsilon {
            return Ok(self.rng.gen_range(0..SnakeEnvironment::ACTION_SPACE));
        }
        Ok(argmax(&self.predict(observation)).0)
    }

    fn remember(&mut self, transition: Transition) -> Result<(), EnvError> {
        self.check_size(&transition.state)?;
        self.check_size(&transition.next_state)?;
        if transition.action >= SnakeEnvironment::ACTION_SPACE {
            return Err(EnvError::InvalidAction {
                action: transition.action,
                action_space: SnakeEnvironment::ACTION_SPACE,
            });
        }
        self.memory.push(transition);
        Ok(())
    }

    fn replay(&mut self, batch_size: usize) -> Option<f32> {
        if batch_size == 0 || self.memory.len() < batch_size {
            return None;
        }

        let batch: Vec<Transition> = self
            .memory
            .sample(&mut self.rng, batch_size)
            .into_iter()
            .cloned()
            .collect();

        let total: f32 = batch.iter().map(|t| self.learn(t)).sum();
        let loss = total / batch.len() as f32;

        if self.epsilon > self.config.epsilon_min {
            self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.epsilon_min);
        }

        tracing::trace!(loss, epsilon = self.epsilon, "replay");
        Some(loss)
    }

    fn memory_len(&self) -> usize {
        self.memory.len()
    }

    fn epsilon(&self) -> Option<f32> {
        Some(self.epsilon)
    }
}

/// Index and value of the largest entry; first wins on ties
fn argmax(values: &[f32]) -> (usize, f32) {
    values
        .iter()
        .copied()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |best, (i, v)| {
            if v > best.1 { (i, v) } else { best }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AgentConfig {
        AgentConfig {
            seed: Some(21),
            ..Default::default()
        }
    }

    fn transition(action: usize, reward: f32) -> Transition {
        Transition {
            state: vec![1.0, 0.0],
            action,
            reward,
            next_state: vec![0.0, 1.0],
            done: true,
        }
    }

    #[test]
    fn test_argmax() {
        assert_eq!(argmax(&[0.1, 0.6, 0.2, 0.1]), (1, 0.6));
        assert_eq!(argmax(&[0.5, 0.5]).0, 0);
    }

    #[test]
    fn test_rejects_wrong_observation_size() {
        let mut agent = LinearQAgent::new(4, config());
        assert_eq!(
            agent.act(&[0.0; 3], false),
            Err(EnvError::ObservationSize {
                expected: 4,
                actual: 3
            })
        );
        assert!(agent.q_values(&[0.0; 5]).is_err());
        assert!(agent.remember(transition(0, 0.0)).is_err());
    }

    #[test]
    fn test_remember_rejects_bad_action() {
        let mut agent = LinearQAgent::new(2, config());
        assert!(agent.remember(transition(4, 0.0)).is_err());
        assert_eq!(agent.memory_len(), 0);
    }

    #[test]
    fn test_replay_needs_full_batch() {
        let mut agent = LinearQAgent::new(2, config());
        agent.remember(transition(0, 0.0)).unwrap();
        assert_eq!(agent.replay(2), None);
        assert_eq!(agent.replay(0), None);
        assert_eq!(agent.epsilon(), Some(1.0));
    }

    #[test]
    fn test_epsilon_decays_to_floor() {
        let mut agent = LinearQAgent::new(2, config());
        for _ in 0..4 {
            agent.remember(transition(0, 0.0)).unwrap();
        }

        agent.replay(4).unwrap();
        assert!((agent.epsilon().unwrap() - 0.995).abs() < 1e-6);

        for _ in 0..2000 {
            agent.replay(4);
        }
        assert!((agent.epsilon().unwrap() - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_learns_best_action() {
        let mut agent = LinearQAgent::new(
            2,
            AgentConfig {
                learning_rate: 0.1,
                ..config()
            },
        );
        for action in 0..4 {
            let reward = if action == 2 { 1.0 } else { -1.0 };
            agent.remember(transition(action, reward)).unwrap();
        }

        for _ in 0..300 {
            agent.replay(4);
        }

        assert_eq!(agent.act(&[1.0, 0.0], false).unwrap(), 2);
        let q = agent.q_values(&[1.0, 0.0]).unwrap();
        assert!((q[2] - 1.0).abs() < 0.05);
        assert!((q[0] + 1.0).abs() < 0.05);
    }

    #[test]
    fn test_bootstraps_from_next_state() {
        let mut agent = LinearQAgent::new(
            2,
            AgentConfig {
                learning_rate: 0.1,
                gamma: 0.5,
                ..config()
            },
        );
        // Terminal reward in state B, zero reward stepping from A into B
        agent
            .remember(Transition {
                state: vec![0.0, 1.0],
                action: 1,
                reward: 1.0,
                next_state: vec![0.0, 1.0],
                done: true,
            })
            .unwrap();
        agent
            .remember(Transition {
                state: vec![1.0, 0.0],
                action: 3,
                reward: 0.0,
                next_state: vec![0.0, 1.0],
                done: false,
            })
            .unwrap();

        for _ in 0..1000 {
            agent.replay(2);
        }

        let q_a = agent.q_values(&[1.0, 0.0]).unwrap();
        assert!(q_a[3] > 0.3, "q_a = {q_a:?}");
    }

    #[test]
    fn test_greedy_act_is_deterministic() {
        let mut agent = LinearQAgent::new(6, config());
        let obs = [0.2, 0.1, 0.4, 0.3, 1.0, 0.0];
        let first = agent.act(&obs, false).unwrap();
        for _ in 0..10 {
            assert_eq!(agent.act(&obs, false).unwrap(), first);
        }
    }
}
