use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{
    action::Heading,
    collision::{cells_overlap, self_collision_index},
    config::GameConfig,
    food::Food,
    grid::GridGeometry,
    snake::Snake,
    state::{CollisionType, GameState, GameStatus},
};

/// Discrete events raised by a step, for sound or UI feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The snake ate the food
    Eat,
    /// The snake hit a wall or itself
    Crash,
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::Eat => "eat",
            GameEvent::Crash => "crash",
        }
    }
}

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

impl StepInfo {
    /// Events raised by this step, eat before crash
    pub fn events(&self) -> Vec<GameEvent> {
        let mut events = Vec::with_capacity(2);
        if self.ate_food {
            events.push(GameEvent::Eat);
        }
        if self.collision_type.is_some() {
            events.push(GameEvent::Crash);
        }
        events
    }
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that owns the snake and food and applies time steps
pub struct GameEngine {
    config: GameConfig,
    grid: GridGeometry,
    state: GameState,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    ///
    /// The configuration is used as given; call [`GameConfig::validate`]
    /// first when it comes from user input.
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let grid = config.geometry();
        let state = Self::initial_state(&config, &grid);

        Self {
            config,
            grid,
            state,
            rng,
        }
    }

    fn initial_state(config: &GameConfig, grid: &GridGeometry) -> GameState {
        let (sx, sy) = config.start_cell;
        let (fx, fy) = config.food_start_cell;
        GameState::new(
            Snake::new(grid.cell(sx, sy), Heading::Down),
            Food::new(grid.cell(fx, fy)),
        )
    }

    /// Replace the snake and food with fresh ones and resume running
    pub fn reset(&mut self) -> &GameState {
        self.state = Self::initial_state(&self.config, &self.grid);
        &self.state
    }

    /// Queue a heading change for the next step
    pub fn set_heading(&mut self, heading: Heading) {
        self.state.snake.set_heading(heading);
    }

    /// Execute one step of the game
    ///
    /// Calling this after termination changes nothing and reports
    /// `terminated` again.
    pub fn step(&mut self) -> StepResult {
        if !self.state.is_alive() {
            return StepResult {
                terminated: true,
                info: StepInfo::default(),
            };
        }

        let state = &mut self.state;
        state.snake.move_step(self.grid.cell_size);

        // Eat
        let ate_food = cells_overlap(state.snake.head(), state.food.position());
        if ate_food {
            state.snake.grow();
            state.food.relocate(&mut self.rng, &self.grid);
        }

        // Self, then walls
        let collision_type = if self_collision_index(state.snake.segments()).is_some() {
            Some(CollisionType::SelfCollision)
        } else if !self.grid.contains(state.snake.head()) {
            Some(CollisionType::Wall)
        } else {
            None
        };

        if collision_type.is_some() {
            state.status = GameStatus::Terminated;
        }
        state.steps += 1;

        let info = StepInfo {
            ate_food,
            collision_type,
        };
        for event in info.events() {
            tracing::trace!(event = event.name(), step = state.steps, "game event");
        }

        StepResult {
            terminated: collision_type.is_some(),
            info,
        }
    }

    /// Read-only view of the current state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn grid(&self) -> &GridGeometry {
        &self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_terminated(&self) -> bool {
        self.state.status == GameStatus::Terminated
    }
}
