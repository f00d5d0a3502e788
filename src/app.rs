use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::info;

use crate::audio::{SoundEvent, SoundSink};
use crate::game::{Difficulty, GameConfig, Round};
use crate::input::{InputHandler, KeyCommand};
use crate::metrics::SessionStats;
use crate::render::Renderer;
use crate::scene::Scene;

/// Owns the terminal, the scene machine and the live round, and drives the
/// whole game loop from a single `tokio::select!`.
pub struct App {
    config: GameConfig,
    seed: Option<u64>,
    scene: Scene,
    round: Round,
    stats: SessionStats,
    renderer: Renderer,
    input_handler: InputHandler,
    sounds: Box<dyn SoundSink>,
    should_quit: bool,
}

impl App {
    pub fn new(config: GameConfig, seed: Option<u64>, sounds: Box<dyn SoundSink>) -> Self {
        let round = Round::new(config.clone(), seed);

        Self {
            config,
            seed,
            scene: Scene::Menu,
            round,
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            sounds,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Simulation steps at 60 Hz with wall-clock deltas
        let update_interval = Duration::from_millis(16);
        let mut update_timer = interval(update_interval);
        let mut last_update = Instant::now();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Simulation frame
                _ = update_timer.tick() => {
                    let now = Instant::now();
                    let dt = (now - last_update).as_secs_f32();
                    last_update = now;
                    self.update(dt);
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            self.scene,
                            &self.round,
                            &self.stats,
                            self.config.difficulty,
                        );
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn update(&mut self, dt: f32) {
        if !self.scene.is_playing() {
            return;
        }

        self.round.update(dt, self.sounds.as_ref());

        if self.round.is_over() {
            let score = self.round.score();
            self.stats.on_round_over(score);
            self.scene = Scene::GameOver { score };
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let command = self.input_handler.handle_key_event(key);
            match self.scene {
                Scene::Menu => self.handle_menu_command(command),
                Scene::Playing => self.handle_playing_command(command),
                Scene::GameOver { .. } => self.handle_game_over_command(command),
            }
        }
    }

    fn handle_menu_command(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::Confirm => self.start_round(),
            KeyCommand::Steer(dir) => {
                use crate::game::Direction;
                match dir {
                    Direction::Left => self.cycle_difficulty(-1),
                    Direction::Right => self.cycle_difficulty(1),
                    _ => {}
                }
            }
            KeyCommand::Quit => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_playing_command(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::Steer(dir) => self.round.set_direction(dir),
            KeyCommand::Pause => {
                self.round.toggle_pause();
                self.sounds.play(SoundEvent::MenuClick);
            }
            KeyCommand::Restart => self.start_round(),
            KeyCommand::Quit => {
                // a paused or running round is abandoned, not resumed later
                self.scene = Scene::Menu;
                self.sounds.play(SoundEvent::MenuClick);
            }
            _ => {}
        }
    }

    fn handle_game_over_command(&mut self, command: KeyCommand) {
        match command {
            KeyCommand::Confirm | KeyCommand::Restart => self.start_round(),
            KeyCommand::Quit => {
                self.scene = Scene::Menu;
                self.sounds.play(SoundEvent::MenuClick);
            }
            _ => {}
        }
    }

    fn cycle_difficulty(&mut self, step: i32) {
        let options = Difficulty::ALL;
        let current = options
            .iter()
            .position(|d| *d == self.config.difficulty)
            .unwrap_or(0) as i32;
        let next = (current + step).rem_euclid(options.len() as i32) as usize;
        self.config.difficulty = options[next];
        self.sounds.play(SoundEvent::MenuClick);
    }

    fn start_round(&mut self) {
        info!(difficulty = self.config.difficulty.name(), "round start");
        self.round = Round::new(self.config.clone(), self.seed);
        self.stats.on_round_start();
        self.scene = Scene::Playing;
    }

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
