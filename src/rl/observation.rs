use crate::game::{GameState, GridGeometry};

/// Length of the observation vector for a given body capacity
///
/// 2 for head position, 2 for food position, 4 for heading, 2 per body slot.
pub fn observation_size(max_snake_length: usize) -> usize {
    8 + 2 * max_snake_length
}

/// Encode game state into a fixed-length vector
///
/// Layout:
/// - head x, head y (board-relative)
/// - food x, food y (board-relative)
/// - heading one-hot in Up, Down, Left, Right order
/// - body segments 1..=max_snake_length as (x, y) pairs, zero-padded
///
/// Segments beyond `max_snake_length` are dropped.
pub fn encode_observation(
    state: &GameState,
    grid: &GridGeometry,
    max_snake_length: usize,
) -> Vec<f32> {
    let mut obs = Vec::with_capacity(observation_size(max_snake_length));

    let (hx, hy) = grid.normalize(state.snake.head());
    let (fx, fy) = grid.normalize(state.food.position());
    obs.extend_from_slice(&[hx, hy, fx, fy]);
    obs.extend_from_slice(&state.snake.direction_one_hot());

    let segments = state.snake.segments();
    for i in 1..=max_snake_length {
        match segments.get(i) {
            Some(&pos) => {
                let (x, y) = grid.normalize(pos);
                obs.push(x);
                obs.push(y);
            }
            None => obs.extend_from_slice(&[0.0, 0.0]),
        }
    }

    obs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Food, Heading, Position, Snake};

    fn grid() -> GridGeometry {
        GridGeometry::new(18, 12, 40)
    }

    fn state_with(segments: Vec<Position>, heading: Heading) -> GameState {
        GameState::new(
            Snake::from_segments(segments, heading).unwrap(),
            Food::new(Position::new(360, 240)),
        )
    }

    #[test]
    fn test_observation_size() {
        assert_eq!(observation_size(216), 440);
        assert_eq!(observation_size(1), 10);
    }

    #[test]
    fn test_head_food_and_heading() {
        let state = state_with(vec![Position::new(72, 48)], Heading::Left);
        let obs = encode_observation(&state, &grid(), 4);

        assert_eq!(obs.len(), 16);
        assert!((obs[0] - 0.1).abs() < 1e-6);
        assert!((obs[1] - 0.1).abs() < 1e-6);
        assert!((obs[2] - 0.5).abs() < 1e-6);
        assert!((obs[3] - 0.5).abs() < 1e-6);
        assert_eq!(&obs[4..8], &[0.0, 0.0, 1.0, 0.0]);
        assert!(obs[8..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_body_segments_then_padding() {
        let state = state_with(
            vec![
                Position::new(120, 120),
                Position::new(80, 120),
                Position::new(40, 120),
            ],
            Heading::Right,
        );
        let obs = encode_observation(&state, &grid(), 4);

        assert_eq!(obs.len(), 16);
        assert!((obs[8] - 80.0 / 720.0).abs() < 1e-6);
        assert!((obs[9] - 0.25).abs() < 1e-6);
        assert!((obs[10] - 40.0 / 720.0).abs() < 1e-6);
        assert!((obs[11] - 0.25).abs() < 1e-6);
        assert!(obs[12..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_constant_length_across_snake_lengths() {
        for len in 1..30 {
            let segments = (0..len).map(|i| Position::new(40 * i, 40)).collect();
            let state = state_with(segments, Heading::Down);
            assert_eq!(encode_observation(&state, &grid(), 216).len(), 440);
        }
    }

    #[test]
    fn test_truncates_long_bodies() {
        let segments = (0..10).map(|i| Position::new(40 * i, 40)).collect();
        let state = state_with(segments, Heading::Down);
        let obs = encode_observation(&state, &grid(), 3);

        assert_eq!(obs.len(), observation_size(3));
        // Last slot holds segment 3
        assert!((obs[12] - 120.0 / 720.0).abs() < 1e-6);
    }
}
