//! Experience replay memory
//!
//! Bounded FIFO store of transitions. When full, the oldest transition is
//! evicted. Minibatches are drawn uniformly without replacement.

use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;

use super::agent::Transition;

/// Replay memory with a fixed capacity
///
/// # Example
///
/// ```rust
/// use snake_rl::rl::{ReplayMemory, Transition};
///
/// let mut memory = ReplayMemory::new(2);
/// for reward in [1.0, 2.0, 3.0] {
///     memory.push(Transition {
///         state: vec![0.0],
///         action: 0,
///         reward,
///         next_state: vec![0.0],
///         done: false,
///     });
/// }
///
/// assert_eq!(memory.len(), 2);
/// assert!(memory.is_full());
/// ```
#[derive(Debug, Clone)]
pub struct ReplayMemory {
    transitions: VecDeque<Transition>,
    capacity: usize,
}

impl ReplayMemory {
    pub fn new(capacity: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Store a transition, evicting the oldest when at capacity
    pub fn push(&mut self, transition: Transition) {
        if self.capacity == 0 {
            return;
        }
        if self.transitions.len() >= self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Sample up to `batch_size` distinct transitions
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, batch_size: usize) -> Vec<&Transition> {
        let mut indices: Vec<usize> = (0..self.transitions.len()).collect();
        indices.shuffle(rng);
        indices
            .into_iter()
            .take(batch_size)
            .map(|i| &self.transitions[i])
            .collect()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.transitions.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}
