use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake_rl::game::GameConfig;
use snake_rl::modes::{HumanMode, TrainConfig, TrainMode, VisualizeMode, format_scores};
use snake_rl::rl::{LinearQAgent, RandomAgent, observation_size};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_rl")]
#[command(version, about = "Snake game with a reinforcement-learning environment")]
struct Cli {
    /// Game mode
    #[arg(long, value_enum, default_value = "human")]
    mode: Mode,

    /// JSON game configuration; missing fields take defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in cells
    #[arg(long)]
    width: Option<i32>,

    /// Board height in cells
    #[arg(long)]
    height: Option<i32>,

    /// Number of training episodes
    #[arg(long, default_value = "1000")]
    episodes: usize,

    /// Replay minibatch size
    #[arg(long, default_value = "32")]
    batch_size: usize,

    /// Seed for food placement and the agent
    #[arg(long)]
    seed: Option<u64>,

    /// Episodes to watch the agent play after training (0 to skip)
    #[arg(long, default_value = "10")]
    watch: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Train a Q-learning agent, then watch it play
    Train,
    /// Watch a random agent play
    Random,
}

impl Mode {
    /// The terminal UI owns the screen, so only warnings get through by default
    fn default_log_level(self) -> &'static str {
        match self {
            Mode::Train => "info",
            Mode::Human | Mode::Random => "warn",
        }
    }
}

fn load_game_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if cli.width.is_some() || cli.height.is_some() {
        let resized = GameConfig::new(
            cli.width.unwrap_or(config.board_width_cells),
            cli.height.unwrap_or(config.board_height_cells),
        );
        config.board_width_cells = resized.board_width_cells;
        config.board_height_cells = resized.board_height_cells;
        config.max_snake_length = resized.max_snake_length;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    if let Err(reason) = config.validate() {
        anyhow::bail!("Invalid game configuration: {}", reason);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.mode.default_log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let game_config = load_game_config(&cli)?;
    tracing::info!(
        board = %format!("{}x{}", game_config.board_width_cells, game_config.board_height_cells),
        cell_size = game_config.cell_size,
        max_snake_length = game_config.max_snake_length,
        seed = ?game_config.seed,
        "game configuration"
    );

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(game_config);
            human_mode.run().await?;
        }
        Mode::Train => {
            let mut train_config = TrainConfig::new(cli.episodes);
            train_config.batch_size = cli.batch_size;
            train_config.agent_config.seed = cli.seed;
            train_config.game_config = game_config.clone();
            if let Err(reason) = train_config.validate() {
                anyhow::bail!("Invalid training configuration: {}", reason);
            }

            let agent = LinearQAgent::new(
                observation_size(game_config.max_snake_length),
                train_config.agent_config.clone(),
            );
            let mut train_mode = TrainMode::new(train_config, agent);
            train_mode.run().context("Training failed")?;

            if cli.watch > 0 {
                let agent = train_mode.into_agent();
                let mut visualize_mode = VisualizeMode::new(game_config, agent, cli.watch);
                let scores = visualize_mode.run().await?;
                println!("{}", format_scores(&scores));
            }
        }
        Mode::Random => {
            let agent = RandomAgent::new(cli.seed);
            let mut visualize_mode = VisualizeMode::new(game_config, agent, cli.watch);
            let scores = visualize_mode.run().await?;
            println!("{}", format_scores(&scores));
        }
    }

    Ok(())
}
