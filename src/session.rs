use std::time::{Duration, Instant};

use rand::Rng;

use crate::clock::SimulationClock;
use crate::config::GameConfig;
use crate::direction::{DirectionController, Heading};
use crate::game::{Game, GameState, StepOutcome};
use crate::sink::PresentationSink;

const INITIAL_HEADING: Heading = Heading::Right;

/// One game from first tick to game over: engine, controller and clock.
/// Playing again means building a new session.
pub struct Session<R: Rng> {
    game: Game<R>,
    controller: DirectionController,
    clock: SimulationClock,
}

impl<R: Rng> Session<R> {
    pub fn new(config: GameConfig, rng: R, now: Instant) -> Self {
        let game = Game::new(config, INITIAL_HEADING, rng);
        Self::from_game(game, INITIAL_HEADING, now)
    }

    /// Wraps an existing game and starts its clock at the game's interval.
    pub fn from_game(game: Game<R>, heading: Heading, now: Instant) -> Self {
        let mut clock = SimulationClock::new();
        if !game.state().is_over() {
            clock.start(Duration::from_millis(game.state().interval_ms), now);
        }

        Session { game, controller: DirectionController::new(heading), clock }
    }

    pub fn state(&self) -> &GameState {
        self.game.state()
    }

    pub fn heading(&self) -> Heading {
        self.controller.current_heading()
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.clock.next_deadline()
    }

    pub fn is_over(&self) -> bool {
        self.game.state().is_over()
    }

    pub fn steer(&mut self, heading: Heading) {
        if !self.controller.set_heading(heading) {
            tracing::trace!(?heading, current = ?self.controller.current_heading(), "reversal ignored");
        }
    }

    /// Runs a tick if one is due at `now`.
    pub fn advance<S>(&mut self, now: Instant, sink: &mut S) -> Option<StepOutcome>
    where
        S: PresentationSink + ?Sized,
    {
        if !self.clock.poll(now) {
            return None;
        }

        let outcome = self.game.step(self.controller.current_heading(), sink);

        if outcome.collision.is_some() {
            self.clock.stop();
        } else if let Some(interval_ms) = outcome.reschedule {
            self.clock.reschedule(Duration::from_millis(interval_ms), now);
        }

        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use crate::sink::NullSink;
    use crate::snake::Snake;
    use rand::{rngs::StdRng, SeedableRng};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_ticks_follow_clock() {
        let t0 = Instant::now();
        let mut session = Session::new(GameConfig::default(), StdRng::seed_from_u64(5), t0);
        let start = session.state().snake.head();

        assert!(session.advance(t0 + ms(50), &mut NullSink).is_none());
        assert!(session.advance(t0 + ms(100), &mut NullSink).is_some());
        assert_ne!(session.state().snake.head(), start);
    }

    #[test]
    fn test_meal_reschedules_clock() {
        let t0 = Instant::now();
        let snake = Snake::from_segments(vec![(5, 5), (4, 5), (3, 5)]).unwrap();
        let state = GameState::new(snake, Cell::new(6, 5), 100);
        let game = Game::with_state(GameConfig::default(), state, StdRng::seed_from_u64(5));
        let mut session = Session::from_game(game, Heading::Right, t0);

        let outcome = session.advance(t0 + ms(100), &mut NullSink).unwrap();
        assert!(outcome.ate_food);
        assert_eq!(session.clock().interval(), Some(ms(98)));
        assert_eq!(session.next_deadline(), Some(t0 + ms(198)));
    }

    #[test]
    fn test_game_over_stops_clock() {
        let t0 = Instant::now();
        let snake = Snake::from_segments(vec![(0, 5), (1, 5)]).unwrap();
        let state = GameState::new(snake, Cell::new(9, 9), 100);
        let game = Game::with_state(GameConfig::default(), state, StdRng::seed_from_u64(5));
        let mut session = Session::from_game(game, Heading::Left, t0);

        session.advance(t0 + ms(100), &mut NullSink);
        assert!(session.is_over());
        assert!(!session.clock().is_running());
        assert!(session.advance(t0 + ms(1000), &mut NullSink).is_none());
    }

    #[test]
    fn test_steer_between_ticks() {
        let t0 = Instant::now();
        let mut session = Session::new(GameConfig::default(), StdRng::seed_from_u64(5), t0);

        session.steer(Heading::Left);
        assert_eq!(session.heading(), Heading::Right);
        session.steer(Heading::Down);
        session.advance(t0 + ms(100), &mut NullSink);
        assert_eq!(session.state().snake.head(), Cell::new(10, 11));
    }
}
