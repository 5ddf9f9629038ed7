use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use super::timer::IntervalScheduler;
use crate::config::AppConfig;
use crate::game::{Command, GameLoop, Snapshot};
use crate::input::{DialogEvent, InputHandler, KeyAction, KeyBindings, SettingsDialog};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Interactive play in the terminal
pub struct HumanMode {
    game: GameLoop<IntervalScheduler>,
    /// State as of the last tick, what the renderer draws
    snapshot: Snapshot,
    bindings: KeyBindings,
    dialog: SettingsDialog,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: AppConfig, seed: Option<u64>) -> Result<Self> {
        let scheduler = IntervalScheduler::new();
        let game = match seed {
            Some(seed) => GameLoop::with_seed(config.game, scheduler, seed),
            None => GameLoop::new(config.game, scheduler),
        }
        .context("Invalid game settings")?;
        let snapshot = game.snapshot();

        Ok(Self {
            game,
            snapshot,
            bindings: config.key_bindings,
            dialog: SettingsDialog::new(),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
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

        info!(
            "session over: {} games, best score {}, longest snake {}",
            self.metrics.games_played, self.metrics.high_score, self.metrics.longest_snake
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick, paced by the game's own cadence
                _ = self.game.scheduler_mut().tick(), if !self.dialog.is_open() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            &self.snapshot,
                            &self.metrics,
                            &self.bindings,
                            &self.dialog,
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

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            self.handle_key(key);
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.dialog.is_open() {
            if let DialogEvent::Closed = self.dialog.handle_key(&mut self.bindings, key) {
                info!("controls dialog closed");
            }
            return;
        }

        match self.input_handler.handle_key_event(&self.bindings, key) {
            KeyAction::Game(command) => self.apply_command(command),
            KeyAction::Restart => {
                // The restart key only works once the game has ended
                if self.game.is_game_over() {
                    self.apply_command(Command::Restart);
                }
            }
            KeyAction::OpenSettings => self.dialog.open(),
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        let was_running = !self.game.is_game_over();
        self.snapshot = self.game.tick();

        // Track game over
        if was_running && self.game.is_game_over() {
            self.metrics
                .on_game_over(self.game.score(), self.game.length());
        }
    }

    fn apply_command(&mut self, command: Command) {
        self.game.apply(command);

        if command == Command::Restart {
            self.snapshot = self.game.snapshot();
            self.metrics.on_game_start();
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Position, RunState};
    use crate::input::{BindingAction, REPLAY_KEY, SETTINGS_KEY};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn press(mode: &mut HumanMode, code: KeyCode) {
        mode.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn mode() -> HumanMode {
        HumanMode::new(AppConfig::default(), Some(1)).unwrap()
    }

    /// Steer into the top wall from the starting corner
    fn crash(mode: &mut HumanMode) {
        press(mode, KeyCode::Char('w'));
        mode.update_game();
        assert_eq!(mode.snapshot.run_state, RunState::GameOver);
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert!(mode.snapshot.is_running());
        assert_eq!(mode.snapshot.score, 0);
        assert_eq!(mode.snapshot.length(), 6);
        assert_eq!(
            mode.game.scheduler().period(),
            Some(Duration::from_millis(120))
        );
    }

    #[test]
    fn test_turn_applies_immediately() {
        let mut mode = mode();
        press(&mut mode, KeyCode::Down);
        assert_eq!(mode.game.direction(), Direction::Down);

        // Reversal is ignored
        press(&mut mode, KeyCode::Up);
        assert_eq!(mode.game.direction(), Direction::Down);
    }

    #[test]
    fn test_game_over_stops_timer_and_counts() {
        let mut mode = mode();
        crash(&mut mode);

        assert_eq!(mode.game.scheduler().period(), None);
        assert_eq!(mode.metrics.games_played, 1);

        // Further ticks change nothing
        mode.update_game();
        assert_eq!(mode.metrics.games_played, 1);
    }

    #[test]
    fn test_restart_key_only_after_game_over() {
        let mut mode = mode();
        mode.update_game();
        mode.update_game();
        let head = mode.snapshot.head();

        press(&mut mode, KeyCode::Char('z'));
        assert_eq!(mode.snapshot.head(), head);

        crash(&mut mode);
        press(&mut mode, KeyCode::Char('z'));
        assert!(mode.snapshot.is_running());
        assert!(mode.game.scheduler().period().is_some());
    }

    #[test]
    fn test_replay_restarts_any_time() {
        let mut mode = mode();
        mode.update_game();
        mode.update_game();

        press(&mut mode, REPLAY_KEY);

        assert!(mode.snapshot.body.iter().all(|&p| p == Position::ORIGIN));
        assert_eq!(mode.snapshot.direction, Direction::Right);
    }

    #[test]
    fn test_rejects_invalid_game_config() {
        let mut config = AppConfig::default();
        config.game.unit_size = 0;
        assert!(HumanMode::new(config, None).is_err());
    }

    #[test]
    fn test_replay_after_game_over_restarts_timer() {
        let mut mode = mode();
        crash(&mut mode);

        press(&mut mode, REPLAY_KEY);
        assert!(mode.snapshot.is_running());
        assert_eq!(mode.snapshot.score, 0);
        assert_eq!(
            mode.game.scheduler().period(),
            Some(Duration::from_millis(120))
        );
        assert_eq!(mode.metrics.games_played, 1);
    }

    #[test]
    fn test_settings_dialog_captures_keys() {
        let mut mode = mode();

        press(&mut mode, SETTINGS_KEY);
        assert!(mode.dialog.is_open());

        // Select "Down" and rebind it to I
        press(&mut mode, KeyCode::Down);
        press(&mut mode, KeyCode::Enter);
        press(&mut mode, KeyCode::Char('i'));
        assert_eq!(mode.bindings.get(BindingAction::Down), KeyCode::Char('i'));
        assert_eq!(mode.game.direction(), Direction::Right);

        press(&mut mode, KeyCode::Esc);
        assert!(!mode.dialog.is_open());
        assert!(!mode.should_quit);

        press(&mut mode, KeyCode::Char('i'));
        assert_eq!(mode.game.direction(), Direction::Down);
    }

    #[test]
    fn test_quit() {
        let mut mode = mode();
        press(&mut mode, KeyCode::Esc);
        assert!(mode.should_quit);
    }
}
