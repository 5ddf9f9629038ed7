use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;

use crate::error::Result;

use super::{
    action::{Command, Direction},
    config::GameConfig,
    schedule::{ManualScheduler, TickScheduler},
    state::{CollisionType, Grid, Position, RunState, Snake, Snapshot},
};

/// The game loop that owns the snake state and applies all game rules
///
/// Ticks are paced by the injected [`TickScheduler`]; the loop tells it when
/// to start, speed up and stop, and the owner calls [`GameLoop::tick`]
/// whenever it fires.
pub struct GameLoop<S: TickScheduler = ManualScheduler> {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    apple: Position,
    score: u32,
    run_state: RunState,
    collision: Option<CollisionType>,
    cadence: Duration,
    scheduler: S,
    rng: StdRng,
}

impl<S: TickScheduler> GameLoop<S> {
    /// Create a new game and start its scheduler
    ///
    /// Fails if the configuration does not describe a playable grid.
    pub fn new(config: GameConfig, scheduler: S) -> Result<Self> {
        Self::with_rng(config, scheduler, StdRng::from_entropy())
    }

    /// Create a game whose apple placement is reproducible
    pub fn with_seed(config: GameConfig, scheduler: S, seed: u64) -> Result<Self> {
        Self::with_rng(config, scheduler, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, scheduler: S, rng: StdRng) -> Result<Self> {
        config.validate()?;

        let grid = Grid::from_config(&config);
        let mut game = Self {
            snake: Snake::stacked(Position::ORIGIN, Direction::Right, config.initial_length),
            apple: Position::ORIGIN,
            score: 0,
            run_state: RunState::Running,
            collision: None,
            cadence: config.cadence.base(),
            grid,
            config,
            scheduler,
            rng,
        };
        game.restart();
        Ok(game)
    }

    /// Reset snake, apple, direction and score, and restart the timer
    pub fn restart(&mut self) {
        self.snake = Snake::stacked(
            Position::ORIGIN,
            Direction::Right,
            self.config.initial_length,
        );
        self.score = 0;
        self.apple = self.grid.random_cell(&mut self.rng);
        self.run_state = RunState::Running;
        self.collision = None;
        self.cadence = self.config.cadence.base();
        self.scheduler.start(self.cadence);

        info!(
            "game started: {}x{} cells, apple at ({}, {})",
            self.grid.columns(),
            self.grid.rows(),
            self.apple.x,
            self.apple.y
        );
    }

    /// Steer the snake for the next tick
    ///
    /// Reversing straight into the body is ignored. Returns whether the new
    /// direction was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.snake.direction.is_opposite(direction) {
            return false;
        }
        self.snake.direction = direction;
        true
    }

    /// Apply a command from an input source
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Turn(direction) => {
                self.set_direction(direction);
            }
            Command::Restart => self.restart(),
        }
    }

    /// Advance the game by one step and return the resulting snapshot
    pub fn tick(&mut self) -> Snapshot {
        if self.run_state == RunState::GameOver {
            return self.snapshot();
        }

        let vacated = self.snake.advance(self.grid.unit());

        // The tail's old cell still counts as body unless the snake grew into it
        let mut trailing = Some(vacated);
        if self.snake.head() == self.apple {
            trailing = None;
            self.snake.grow(vacated);
            self.score += 1;
            // Occupied cells are not excluded
            self.apple = self.grid.random_cell(&mut self.rng);
            debug!(
                "apple eaten: score {}, length {}, next apple at ({}, {})",
                self.score,
                self.snake.len(),
                self.apple.x,
                self.apple.y
            );
        }

        if let Some(collision) = self.check_collision(trailing) {
            self.run_state = RunState::GameOver;
            self.collision = Some(collision);
            self.scheduler.stop();
            info!(
                "game over ({:?}) with score {} and length {}",
                collision,
                self.score,
                self.snake.len()
            );
        } else {
            self.adjust_cadence();
        }

        self.snapshot()
    }

    /// Check whether the head has left the grid or hit the body
    ///
    /// `trailing` is the cell the tail left this tick, if it was not regrown.
    fn check_collision(&self, trailing: Option<Position>) -> Option<CollisionType> {
        let head = self.snake.head();

        if self.snake.collides_with_body(head) || trailing == Some(head) {
            return Some(CollisionType::SelfCollision);
        }

        if !self.grid.contains(head) {
            return Some(CollisionType::Wall);
        }

        None
    }

    /// Speed up as the snake grows, touching the timer only on change
    fn adjust_cadence(&mut self) {
        let cadence = self.config.cadence.interval_for(self.snake.len());
        if cadence != self.cadence {
            debug!("cadence {:?} -> {:?}", self.cadence, cadence);
            self.cadence = cadence;
            self.scheduler.reschedule(cadence);
        }
    }

    /// Copy of the current state for rendering
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            body: self.snake.body.clone(),
            apple: self.apple,
            direction: self.snake.direction,
            score: self.score,
            run_state: self.run_state,
            collision: self.collision,
            grid: self.grid,
            cadence: self.cadence,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of body segments, head included
    pub fn length(&self) -> usize {
        self.snake.len()
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_game_over(&self) -> bool {
        self.run_state == RunState::GameOver
    }

    pub fn cadence(&self) -> Duration {
        self.cadence
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
