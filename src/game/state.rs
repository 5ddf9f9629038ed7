use rand::Rng;
use std::time::Duration;

use super::action::Direction;
use super::config::GameConfig;

/// Top-left pixel coordinate of a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell of `unit` pixels in a direction
    pub fn moved_in_direction(&self, direction: Direction, unit: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * unit, dy * unit)
    }
}

/// Fixed pixel playfield divided into square cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    unit: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32, unit: i32) -> Self {
        Self {
            width,
            height,
            unit,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.screen_width, config.screen_height, config.unit_size)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn unit(&self) -> i32 {
        self.unit
    }

    /// Number of cell columns
    pub fn columns(&self) -> i32 {
        self.width / self.unit
    }

    /// Number of cell rows
    pub fn rows(&self) -> i32 {
        self.height / self.unit
    }

    /// Check if a position lies within the playfield
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Column/row index of a position, if it is on the playfield
    pub fn cell_of(&self, pos: Position) -> Option<(i32, i32)> {
        self.contains(pos)
            .then(|| (pos.x / self.unit, pos.y / self.unit))
    }

    /// Sample any cell uniformly, occupied or not
    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Position {
        let column = rng.gen_range(0..self.columns());
        let row = rng.gen_range(0..self.rows());
        Position::new(column * self.unit, row * self.unit)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a snake laid out in a line behind its head
    pub fn new(head: Position, direction: Direction, length: usize, unit: i32) -> Self {
        let mut body = Vec::with_capacity(length);
        body.push(head);

        let back = direction.opposite();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_in_direction(back, unit));
        }

        Self { body, direction }
    }

    /// Create a snake whose segments all sit on the same cell
    ///
    /// The segments fan out one cell per tick as the head leaves.
    pub fn stacked(at: Position, direction: Direction, length: usize) -> Self {
        Self {
            body: vec![at; length],
            direction,
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Shift every segment forward and move the head one cell
    ///
    /// Returns the cell the tail vacated so the caller can grow into it.
    pub fn advance(&mut self, unit: i32) -> Position {
        let new_head = self.head().moved_in_direction(self.direction, unit);
        self.body.insert(0, new_head);
        // Length is always >= 1, so there is a tail to pop
        self.body.pop().unwrap_or(new_head)
    }

    /// Extend the tail back onto the cell it just left
    pub fn grow(&mut self, vacated: Position) {
        self.body.push(vacated);
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the playfield
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// Whether the game is still being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Running,
    GameOver,
}

/// Immutable copy of the game state handed to a renderer after each tick
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Occupied cells, head first
    pub body: Vec<Position>,
    pub apple: Position,
    pub direction: Direction,
    pub score: u32,
    pub run_state: RunState,
    /// How the last game ended, if it has
    pub collision: Option<CollisionType>,
    pub grid: Grid,
    /// Interval until the next tick
    pub cadence: Duration,
}

impl Snapshot {
    /// Number of body segments, head included
    pub fn length(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Option<Position> {
        self.body.first().copied()
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_position_movement() {
        let pos = Position::new(50, 50);
        assert_eq!(pos.moved_in_direction(Direction::Right, 25), Position::new(75, 50));
        assert_eq!(pos.moved_in_direction(Direction::Left, 25), Position::new(25, 50));
        assert_eq!(pos.moved_in_direction(Direction::Down, 25), Position::new(50, 75));
        assert_eq!(pos.moved_in_direction(Direction::Up, 25), Position::new(50, 25));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(100, 100), Direction::Right, 3, 25);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(100, 100));
        assert_eq!(snake.body[1], Position::new(75, 100));
        assert_eq!(snake.body[2], Position::new(50, 100));
    }

    #[test]
    fn test_stacked_snake() {
        let snake = Snake::stacked(Position::ORIGIN, Direction::Right, 6);
        assert_eq!(snake.len(), 6);
        assert!(snake.body.iter().all(|&p| p == Position::ORIGIN));
    }

    #[test]
    fn test_snake_advance_and_grow() {
        let mut snake = Snake::new(Position::new(100, 100), Direction::Right, 3, 25);

        let vacated = snake.advance(25);
        assert_eq!(vacated, Position::new(50, 100));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(125, 100));

        snake.grow(vacated);
        assert_eq!(snake.len(), 4);
        assert_eq!(
            snake.body,
            vec![
                Position::new(125, 100),
                Position::new(100, 100),
                Position::new(75, 100),
                Position::new(50, 100),
            ]
        );
    }

    #[test]
    fn test_stacked_snake_unfolds() {
        let mut snake = Snake::stacked(Position::ORIGIN, Direction::Right, 3);
        snake.advance(25);
        assert_eq!(
            snake.body,
            vec![Position::new(25, 0), Position::ORIGIN, Position::ORIGIN]
        );
        assert!(!snake.collides_with_body(snake.head()));
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(100, 100), Direction::Right, 3, 25);
        assert!(!snake.collides_with_body(Position::new(100, 100))); // head
        assert!(snake.collides_with_body(Position::new(75, 100))); // body
        assert!(!snake.collides_with_body(Position::new(250, 250))); // empty
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(600, 600, 25);

        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(575, 575)));
        assert!(!grid.contains(Position::new(-25, 0)));
        assert!(!grid.contains(Position::new(0, -25)));
        assert!(!grid.contains(Position::new(600, 0)));
        assert!(!grid.contains(Position::new(0, 600)));
    }

    #[test]
    fn test_grid_cells() {
        let grid = Grid::new(600, 400, 25);
        assert_eq!(grid.columns(), 24);
        assert_eq!(grid.rows(), 16);
        assert_eq!(grid.cell_of(Position::new(50, 75)), Some((2, 3)));
        assert_eq!(grid.cell_of(Position::new(-25, 75)), None);
    }

    #[test]
    fn test_random_cell_is_aligned_and_in_bounds() {
        let grid = Grid::new(250, 150, 25);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let cell = grid.random_cell(&mut rng);
            assert!(grid.contains(cell));
            assert_eq!(cell.x % 25, 0);
            assert_eq!(cell.y % 25, 0);
        }
    }
}
