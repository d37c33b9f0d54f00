use rand::Rng;

use crate::config::GameConfig;
use crate::direction::Heading;
use crate::grid::{Cell, Grid};
use crate::sink::{PresentationSink, Snapshot};
use crate::snake::Snake;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    OutOfBounds,
    SelfIntersection,
}

/// Everything that changes from one tick to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Cell,
    pub score: u32,
    pub interval_ms: u64,
    pub phase: Phase,
}

impl GameState {
    pub fn new(snake: Snake, food: Cell, interval_ms: u64) -> Self {
        GameState { snake, food, score: 0, interval_ms, phase: Phase::Running }
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot { snake: &self.snake, food: self.food, score: self.score, phase: self.phase }
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    pub ate_food: bool,
    pub collision: Option<Collision>,
    /// New tick interval the clock should switch to, in milliseconds.
    pub reschedule: Option<u64>,
}

/// The step engine: owns the state of one game and advances it a tick at a time.
pub struct Game<R: Rng> {
    config: GameConfig,
    grid: Grid,
    state: GameState,
    rng: R,
}

impl<R: Rng> Game<R> {
    /// Fresh game: snake in the middle heading `heading`, food anywhere.
    pub fn new(config: GameConfig, heading: Heading, mut rng: R) -> Self {
        let grid = Grid::new(config.extent);
        let center = Cell::new(grid.extent() / 2, grid.extent() / 2);
        let snake = Snake::new(center, heading, config.initial_length);
        let food = grid.random_cell(&mut rng);
        let state = GameState::new(snake, food, config.initial_interval_ms);

        Game { config, grid, state, rng }
    }

    /// Resumes from an arbitrary state.
    pub fn with_state(config: GameConfig, state: GameState, rng: R) -> Self {
        let grid = Grid::new(config.extent);
        Game { config, grid, state, rng }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Advances one tick in `heading` and reports the result to `sink`.
    pub fn step<S>(&mut self, heading: Heading, sink: &mut S) -> StepOutcome
    where
        S: PresentationSink + ?Sized,
    {
        if self.state.is_over() {
            return StepOutcome::default();
        }

        let new_head = self.state.snake.head().offset(heading.delta());
        let ate_food = new_head == self.state.food;

        // The tail moves out before the head moves in, except on a growth tick.
        let mut moved = self.state.snake.clone();
        moved.advance(new_head, ate_food);

        let collision = if !self.grid.in_bounds(new_head) {
            Some(Collision::OutOfBounds)
        } else if moved.head_overlaps_body() {
            Some(Collision::SelfIntersection)
        } else {
            None
        };

        if let Some(kind) = collision {
            self.state.phase = Phase::Over;
            tracing::info!(?kind, head = ?new_head, score = self.state.score, "game over");

            sink.render(&self.state.snapshot());
            sink.render_game_over(self.state.score);
            return StepOutcome { ate_food: false, collision, reschedule: None };
        }

        self.state.snake = moved;
        let mut reschedule = None;

        if ate_food {
            self.state.score += 1;
            self.state.food = self.grid.random_cell(&mut self.rng);
            sink.score_changed(self.state.score);

            let next = self.config.next_interval(self.state.interval_ms);
            if next != self.state.interval_ms {
                self.state.interval_ms = next;
                reschedule = Some(next);
            }
        }

        tracing::debug!(
            head = ?new_head,
            score = self.state.score,
            interval_ms = self.state.interval_ms,
            "tick"
        );

        sink.render(&self.state.snapshot());
        StepOutcome { ate_food, collision: None, reschedule }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NullSink;
    use rand::{rngs::StdRng, SeedableRng};

    fn game_with(segments: Vec<(i32, i32)>, food: (i32, i32)) -> Game<StdRng> {
        let snake = Snake::from_segments(segments).unwrap();
        let state = GameState::new(snake, food.into(), 100);
        Game::with_state(GameConfig::default(), state, StdRng::seed_from_u64(1))
    }

    #[test]
    fn test_new_game() {
        let game = Game::new(GameConfig::default(), Heading::Right, StdRng::seed_from_u64(3));
        let state = game.state();
        let body: Vec<Cell> = state.snake.segments().collect();

        assert_eq!(body, vec![Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10)]);
        assert_eq!(state.score, 0);
        assert_eq!(state.interval_ms, 100);
        assert_eq!(state.phase, Phase::Running);
        assert!(game.grid().in_bounds(state.food));
    }

    #[test]
    fn test_plain_move() {
        let mut game = game_with(vec![(5, 5), (4, 5), (3, 5)], (0, 0));
        let outcome = game.step(Heading::Right, &mut NullSink);

        assert_eq!(outcome, StepOutcome::default());
        let body: Vec<Cell> = game.state().snake.segments().collect();
        assert_eq!(body, vec![Cell::new(6, 5), Cell::new(5, 5), Cell::new(4, 5)]);
        assert_eq!(game.state().food, Cell::new(0, 0));
    }

    #[test]
    fn test_eating_grows_and_speeds_up() {
        let mut game = game_with(vec![(5, 5), (4, 5), (3, 5)], (6, 5));
        let outcome = game.step(Heading::Right, &mut NullSink);

        assert!(outcome.ate_food);
        assert_eq!(outcome.reschedule, Some(98));
        assert_eq!(game.state().snake.len(), 4);
        assert_eq!(game.state().score, 1);
    }

    #[test]
    fn test_interval_floor() {
        let snake = Snake::from_segments(vec![(5, 5), (4, 5)]).unwrap();
        let state = GameState::new(snake, Cell::new(6, 5), 50);
        let mut game = Game::with_state(GameConfig::default(), state, StdRng::seed_from_u64(1));

        let outcome = game.step(Heading::Right, &mut NullSink);
        assert!(outcome.ate_food);
        assert_eq!(outcome.reschedule, None);
        assert_eq!(game.state().interval_ms, 50);
    }

    #[test]
    fn test_collision_leaves_body_untouched() {
        let mut game = game_with(vec![(0, 5), (1, 5)], (9, 9));
        let before = game.state().snake.clone();

        let outcome = game.step(Heading::Left, &mut NullSink);
        assert_eq!(outcome.collision, Some(Collision::OutOfBounds));
        assert_eq!(game.state().snake, before);
        assert!(game.state().is_over());
    }

    #[test]
    fn test_over_is_terminal() {
        let mut game = game_with(vec![(0, 5), (1, 5)], (9, 9));
        game.step(Heading::Left, &mut NullSink);

        let outcome = game.step(Heading::Down, &mut NullSink);
        assert_eq!(outcome, StepOutcome::default());
        assert_eq!(game.state().snake.head(), Cell::new(0, 5));
        assert_eq!(game.state().phase, Phase::Over);
    }

    #[test]
    fn test_growth_tick_keeps_tail_solid() {
        // Food sits on the tail: the tail does not move out, so it is hit.
        let mut game = game_with(vec![(5, 5), (5, 6), (4, 6), (4, 5)], (4, 5));
        let outcome = game.step(Heading::Left, &mut NullSink);
        assert_eq!(outcome.collision, Some(Collision::SelfIntersection));
        assert_eq!(game.state().score, 0);
    }
}
