use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::grid::GridGeometry;

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in cells
    pub board_width_cells: i32,
    /// Board height in cells
    pub board_height_cells: i32,
    /// Side length of one cell in pixels
    pub cell_size: i32,
    /// Cell the snake's head starts in
    pub start_cell: (i32, i32),
    /// Cell the first food item starts in
    pub food_start_cell: (i32, i32),
    /// Body segments encoded into observations
    pub max_snake_length: usize,

    // Rewards (for RL)
    /// Reward for eating food
    pub food_reward: f32,
    /// Penalty for dying
    pub death_penalty: f32,

    /// Seed for food placement; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width_cells: 18,
            board_height_cells: 12,
            cell_size: 40,
            start_cell: (1, 1),
            food_start_cell: (3, 3),
            max_snake_length: 18 * 12,
            food_reward: 10.0,
            death_penalty: -10.0,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size
    ///
    /// `max_snake_length` follows the board area.
    pub fn new(width_cells: i32, height_cells: i32) -> Self {
        Self {
            board_width_cells: width_cells,
            board_height_cells: height_cells,
            max_snake_length: (width_cells.max(0) as usize).saturating_mul(height_cells.max(0) as usize),
            ..Default::default()
        }
    }

    /// Default board with a fixed seed, for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Board geometry derived from this configuration
    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.board_width_cells, self.board_height_cells, self.cell_size)
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read game config {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse game config {:?}", path))?;
        if let Err(reason) = config.validate() {
            anyhow::bail!("Invalid game config {:?}: {}", path, reason);
        }
        Ok(config)
    }

    /// Validate configuration parameters
    ///
    /// # Example
    ///
    /// ```rust
    /// use snake_rl::game::GameConfig;
    ///
    /// let mut config = GameConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.cell_size = 0;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), String> {
        if self.cell_size <= 0 {
            return Err(format!("cell_size must be positive, got {}", self.cell_size));
        }
        if self.board_width_cells < 3 || self.board_height_cells < 3 {
            return Err(format!(
                "board must be at least 3x3 cells, got {}x{}",
                self.board_width_cells, self.board_height_cells
            ));
        }
        if self.max_snake_length == 0 {
            return Err("max_snake_length must be at least 1".to_string());
        }
        let in_board = |(cx, cy): (i32, i32)| {
            (0..=self.board_width_cells).contains(&cx) && (0..=self.board_height_cells).contains(&cy)
        };
        if !in_board(self.start_cell) {
            return Err(format!("start_cell {:?} is outside the board", self.start_cell));
        }
        if !in_board(self.food_start_cell) {
            return Err(format!(
                "food_start_cell {:?} is outside the board",
                self.food_start_cell
            ));
        }
        Ok(())
    }
}
