/// Board size, starting snake and acceleration tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Cells along each side of the square board.
    pub extent: u16,
    pub initial_length: usize,
    /// Tick interval at the start of a game, in milliseconds.
    pub initial_interval_ms: u64,
    /// The interval never drops below this.
    pub min_interval_ms: u64,
    /// Taken off the interval on every meal.
    pub interval_step_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            extent: 20,
            initial_length: 3,
            initial_interval_ms: 100,
            min_interval_ms: 50,
            interval_step_ms: 2,
        }
    }
}

impl GameConfig {
    /// Interval after one more meal, clamped to the floor.
    pub fn next_interval(&self, current_ms: u64) -> u64 {
        if current_ms > self.min_interval_ms {
            current_ms.saturating_sub(self.interval_step_ms).max(self.min_interval_ms)
        } else {
            current_ms
        }
    }
}
