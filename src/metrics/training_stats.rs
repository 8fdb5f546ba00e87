//! Training statistics tracking
//!
//! Rolling-window statistics over episode rewards, lengths and scores, plus
//! replay losses and the agent's exploration rate.

use std::collections::VecDeque;

/// Training statistics tracker with rolling averages
///
/// # Example
///
/// ```rust
/// use snake_rl::metrics::TrainingStats;
///
/// let mut stats = TrainingStats::new(100);
///
/// // Record an episode
/// stats.record_episode(15.5, 150, 5);
///
/// // Record a replay update
/// stats.record_update(0.02);
///
/// assert_eq!(stats.total_episodes(), 1);
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct TrainingStats {
    /// Episode rewards (rolling window)
    episode_rewards: VecDeque<f32>,

    /// Episode lengths in steps (rolling window)
    episode_lengths: VecDeque<usize>,

    /// Final snake lengths (rolling window)
    episode_scores: VecDeque<usize>,

    /// Replay losses (rolling window)
    losses: VecDeque<f32>,

    /// Most recent exploration rate reported by the agent
    epsilon: Option<f32>,

    /// Best final snake length seen so far
    best_score: usize,

    /// Total number of episodes completed
    total_episodes: usize,

    /// Total number of environment steps taken
    total_steps: usize,

    /// Window size for rolling averages
    window_size: usize,
}

impl TrainingStats {
    /// Create a new training statistics tracker
    ///
    /// * `window_size` - Number of recent values to keep for rolling averages
    pub fn new(window_size: usize) -> Self {
        Self {
            episode_rewards: VecDeque::with_capacity(window_size),
            episode_lengths: VecDeque::with_capacity(window_size),
            episode_scores: VecDeque::with_capacity(window_size),
            losses: VecDeque::with_capacity(window_size),
            epsilon: None,
            best_score: 0,
            total_episodes: 0,
            total_steps: 0,
            window_size,
        }
    }

    /// Record the completion of an episode
    ///
    /// * `reward` - Total reward accumulated during the episode
    /// * `length` - Number of steps taken in the episode
    /// * `score` - Final snake length
    pub fn record_episode(&mut self, reward: f32, length: usize, score: usize) {
        Self::push_deque(&mut self.episode_rewards, reward, self.window_size);
        Self::push_deque(&mut self.episode_lengths, length, self.window_size);
        Self::push_deque(&mut self.episode_scores, score, self.window_size);
        self.best_score = self.best_score.max(score);
        self.total_episodes += 1;
        self.total_steps += length;
    }

    /// Record the loss of one replay update
    pub fn record_update(&mut self, loss: f32) {
        Self::push_deque(&mut self.losses, loss, self.window_size);
    }

    pub fn record_epsilon(&mut self, epsilon: Option<f32>) {
        self.epsilon = epsilon;
    }

    /// Get the mean episode reward over the rolling window
    pub fn mean_episode_reward(&self) -> f32 {
        self.mean(&self.episode_rewards)
    }

    /// Get the mean episode length over the rolling window
    pub fn mean_episode_length(&self) -> f32 {
        Self::mean_usize(&self.episode_lengths)
    }

    /// Get the mean final snake length over the rolling window
    pub fn mean_episode_score(&self) -> f32 {
        Self::mean_usize(&self.episode_scores)
    }

    /// Get the mean replay loss over the rolling window
    pub fn mean_loss(&self) -> f32 {
        self.mean(&self.losses)
    }

    pub fn epsilon(&self) -> Option<f32> {
        self.epsilon
    }

    pub fn best_score(&self) -> usize {
        self.best_score
    }

    /// Get the total number of episodes completed
    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    /// Get the total number of environment steps taken
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Get the window size for rolling averages
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Format a summary of the current statistics
    ///
    /// Output looks like:
    /// `Episodes: 1 | Steps: 150 | Reward: 15.50 | Score: 5.00 | Best: 5 | Len: 150.0 | Loss: 0.0200 | Eps: 0.995`
    pub fn format_summary(&self) -> String {
        let epsilon = self
            .epsilon
            .map(|e| format!("{:.3}", e))
            .unwrap_or_else(|| "-".to_string());
        format!(
            "Episodes: {} | Steps: {} | Reward: {:.2} | Score: {:.2} | Best: {} | Len: {:.1} | Loss: {:.4} | Eps: {}",
            self.total_episodes,
            self.total_steps,
            self.mean_episode_reward(),
            self.mean_episode_score(),
            self.best_score,
            self.mean_episode_length(),
            self.mean_loss(),
            epsilon,
        )
    }

    /// Helper function to compute mean of a VecDeque<f32>
    fn mean(&self, deque: &VecDeque<f32>) -> f32 {
        if deque.is_empty() {
            0.0
        } else {
            deque.iter().sum::<f32>() / deque.len() as f32
        }
    }

    fn mean_usize(deque: &VecDeque<usize>) -> f32 {
        if deque.is_empty() {
            0.0
        } else {
            deque.iter().sum::<usize>() as f32 / deque.len() as f32
        }
    }

    /// Helper function to push to a deque with size limit
    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
