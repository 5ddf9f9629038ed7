use std::time::{Duration, Instant};

/// Per-session statistics shown in the header
///
/// Kept in memory only; nothing survives the process.
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub longest_snake: usize,
    pub games_played: u32,
    /// Whether the clock is still counting for the current game
    running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            longest_snake: 0,
            games_played: 0,
            running: true,
        }
    }

    /// Advance the game clock; frozen after game over
    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.running = true;
    }

    pub fn on_game_over(&mut self, final_score: u32, final_length: usize) {
        self.update();
        self.running = false;
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
        self.longest_snake = self.longest_snake.max(final_length);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
