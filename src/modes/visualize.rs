//! Visualization mode for watching an agent play
//!
//! Runs an agent greedily in the terminal UI, one environment step per tick.
//! Finished episodes restart automatically until the requested number of
//! episodes has been played.
//!
//! # Controls
//!
//! - Space: Pause/unpause
//! - R: Reset episode
//! - 1-4: Speed control (1=slow, 2=normal, 3=fast, 4=very fast)
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{Stderr, stderr},
    time::Duration,
};
use tokio::time::{Interval, interval};

use crate::game::GameConfig;
use crate::render::Renderer;
use crate::rl::{Agent, SnakeEnvironment};

/// Visualization speed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualizationSpeed {
    /// 500ms per step
    Slow,
    /// 100ms per step
    Normal,
    /// 50ms per step
    Fast,
    /// 16ms per step
    VeryFast,
}

impl VisualizationSpeed {
    /// Get the tick interval for this speed
    fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(500),
            Self::Normal => Duration::from_millis(100),
            Self::Fast => Duration::from_millis(50),
            Self::VeryFast => Duration::from_millis(16),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::VeryFast => "Very Fast",
        }
    }
}

/// Report of watched episodes, one line per episode plus the best score
///
/// ```rust
/// use snake_rl::modes::visualize::format_scores;
///
/// assert_eq!(format_scores(&[3, 5]), "Episode 1: score 3\nEpisode 2: score 5\nBest score: 5");
/// ```
pub fn format_scores(scores: &[usize]) -> String {
    if scores.is_empty() {
        return "No episodes finished".to_string();
    }

    let mut lines: Vec<String> = scores
        .iter()
        .enumerate()
        .map(|(i, score)| format!("Episode {}: score {}", i + 1, score))
        .collect();
    if let Some(best) = scores.iter().max() {
        lines.push(format!("Best score: {}", best));
    }
    lines.join("\n")
}

/// Visualization mode for watching an agent
pub struct VisualizeMode<A: Agent> {
    agent: A,
    env: SnakeEnvironment,
    renderer: Renderer,

    /// Latest observation handed to the agent
    obs: Vec<f32>,

    /// Episodes to play before stopping
    max_episodes: usize,

    /// Final snake length of every finished episode
    scores: Vec<usize>,

    should_quit: bool,
    paused: bool,
    speed: VisualizationSpeed,
}

impl<A: Agent> VisualizeMode<A> {
    pub fn new(config: GameConfig, agent: A, max_episodes: usize) -> Self {
        let mut env = SnakeEnvironment::new(config);
        let obs = env.reset();

        Self {
            agent,
            env,
            renderer: Renderer::new(),
            obs,
            max_episodes,
            scores: Vec::new(),
            should_quit: max_episodes == 0,
            paused: false,
            speed: VisualizationSpeed::Normal,
        }
    }

    /// Run the visualization loop
    ///
    /// Returns the final score of each finished episode.
    pub async fn run(&mut self) -> Result<Vec<usize>> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run visualization loop
        let result = self.run_visualization_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result?;

        Ok(self.scores.clone())
    }

    async fn run_visualization_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Game ticks based on speed
        let mut tick_timer = interval(self.speed.tick_interval());

        // Render at 30 FPS
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        while !self.should_quit {
            tokio::select! {
                // Handle keyboard input
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.advance()?;
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    let status = self.status_line();
                    terminal.draw(|frame| {
                        self.renderer.render_agent(
                            frame,
                            self.env.state(),
                            self.env.engine().grid(),
                            &status,
                        );
                    }).context("Failed to draw frame")?;
                }

                // Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }
        }

        Ok(())
    }

    /// One tick: step the agent, or restart after a finished episode
    ///
    /// The crashed board stays on screen for one tick before the reset.
    fn advance(&mut self) -> Result<()> {
        if !self.env.state().is_alive() {
            if self.scores.len() >= self.max_episodes {
                self.should_quit = true;
            } else {
                self.obs = self.env.reset();
            }
            return Ok(());
        }

        let action = self.agent.act(&self.obs, false)?;
        let (next_obs, _reward, done) = self.env.step(action)?;
        self.obs = next_obs;

        if done {
            let score = self.env.score();
            self.scores.push(score);
            tracing::debug!(episode = self.scores.len(), score, "episode finished");
        }

        Ok(())
    }

    /// Handle keyboard events
    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) {
        if let Event::Key(key) = event {
            // Only process key press events
            if key.kind != KeyEventKind::Press {
                return;
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Char(' ') => {
                    self.paused = !self.paused;
                }
                KeyCode::Char('r') => {
                    // Abandon the running episode without scoring it
                    self.obs = self.env.reset();
                }
                KeyCode::Char('1') => {
                    self.change_speed(VisualizationSpeed::Slow, tick_timer);
                }
                KeyCode::Char('2') => {
                    self.change_speed(VisualizationSpeed::Normal, tick_timer);
                }
                KeyCode::Char('3') => {
                    self.change_speed(VisualizationSpeed::Fast, tick_timer);
                }
                KeyCode::Char('4') => {
                    self.change_speed(VisualizationSpeed::VeryFast, tick_timer);
                }
                _ => {}
            }
        }
    }

    fn change_speed(&mut self, new_speed: VisualizationSpeed, tick_timer: &mut Interval) {
        self.speed = new_speed;
        *tick_timer = interval(self.speed.tick_interval());
    }

    fn status_line(&self) -> String {
        let episode = (self.scores.len() + 1).min(self.max_episodes);
        let mut status = format!(
            "Episode {}/{} | Speed: {}",
            episode,
            self.max_episodes,
            self.speed.as_str()
        );
        if self.paused {
            status.push_str(" | PAUSED");
        }
        status
    }

    pub fn scores(&self) -> &[usize] {
        &self.scores
    }

    /// Cleanup terminal state
    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
