use crate::game::Phase;
use crate::grid::Cell;
use crate::snake::Snake;

/// What a frontend gets to see after each tick.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub snake: &'a Snake,
    pub food: Cell,
    pub score: u32,
    pub phase: Phase,
}

/// Drawing and score display, implemented outside the core.
pub trait PresentationSink {
    fn render(&mut self, snapshot: &Snapshot<'_>);

    fn render_game_over(&mut self, score: u32);

    fn score_changed(&mut self, _score: u32) {}
}

/// Discards everything. Handy for headless runs.
#[derive(Debug, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn render(&mut self, _snapshot: &Snapshot<'_>) {}

    fn render_game_over(&mut self, _score: u32) {}
}
