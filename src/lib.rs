//! A tick-driven snake simulation.
//!
//! The core (grid, snake, direction, clock, game, session) has no I/O. The
//! terminal frontend lives in `term` and `input` and plugs in through the
//! [`sink::PresentationSink`] trait.

pub mod clock;
pub mod config;
pub mod direction;
pub mod game;
pub mod grid;
pub mod input;
pub mod session;
pub mod sink;
pub mod snake;
pub mod term;

pub use clock::SimulationClock;
pub use config::GameConfig;
pub use direction::{DirectionController, Heading};
pub use game::{Collision, Game, GameState, Phase, StepOutcome};
pub use grid::{Cell, Grid};
pub use session::Session;
pub use sink::{PresentationSink, Snapshot};
pub use snake::Snake;
