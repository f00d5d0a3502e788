use std::time::{Duration, Instant};

/// Per-session bookkeeping shown in the HUD.
///
/// The round clock is derived from the start instant on demand, so there is
/// no per-frame refresh to forget.
pub struct SessionStats {
    round_start: Instant,
    pub best_score: u32,
    pub last_score: Option<u32>,
    pub rounds_played: u32,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            best_score: 0,
            last_score: None,
            rounds_played: 0,
        }
    }

    pub fn on_round_start(&mut self) {
        self.round_start = Instant::now();
    }

    pub fn on_round_over(&mut self, final_score: u32) {
        self.rounds_played += 1;
        self.last_score = Some(final_score);
        self.best_score = self.best_score.max(final_score);
    }

    /// Time since the current round started
    pub fn round_elapsed(&self) -> Duration {
        self.round_start.elapsed()
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}
