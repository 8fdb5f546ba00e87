/// Errors raised at the agent-facing boundary
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    #[error("invalid action {action}: expected 0..{action_space}")]
    InvalidAction { action: usize, action_space: usize },
    #[error("observation has {actual} values, expected {expected}")]
    ObservationSize { expected: usize, actual: usize },
}
