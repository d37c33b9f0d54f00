use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use tick_snake::input::{self, InputEvent};
use tick_snake::term::TermManager;
use tick_snake::{GameConfig, Session};

#[derive(Parser)]
#[command(name = "tick-snake")]
#[command(version, about = "Terminal snake that speeds up as it grows")]
struct Cli {
    /// Cells along each side of the square board
    #[arg(long, default_value = "20", value_parser = clap::value_parser!(u16).range(4..))]
    extent: u16,

    /// Starting tick interval in milliseconds
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Seed for food placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,
}

enum Flow {
    Continue,
    Quit,
}

struct TerminalGame {
    config: GameConfig,
    rng: StdRng,
    term: TermManager,
}

impl TerminalGame {
    fn show_intro(&mut self) -> Result<Flow> {
        self.term.reset_board()?;
        self.term.show_message(&[
            "Arrow keys, WASD or numpad to move",
            "Esc or CTRL+C to quit",
            "",
            "Press any key to begin"
        ])?;

        let flow = wait_any_key(&self.term)?;
        self.term.hide_message()?;
        Ok(flow)
    }

    /// Plays one game, then waits for a key to decide whether to go again.
    fn play(&mut self) -> Result<Flow> {
        self.term.reset_board()?;

        let rng = StdRng::seed_from_u64(self.rng.gen());
        let mut session = Session::new(self.config.clone(), rng, Instant::now());
        tracing::info!(food = ?session.state().food, "game started");

        while !session.is_over() {
            session.advance(Instant::now(), &mut self.term);
            if session.is_over() {
                break;
            }

            let timeout = session
                .next_deadline()
                .map(|deadline| deadline.saturating_duration_since(Instant::now()))
                .unwrap_or_default();

            if let Some(ev) = self.term.poll_key(timeout)? {
                match input::translate(&ev) {
                    InputEvent::Steer(heading) => session.steer(heading),
                    InputEvent::Quit => return Ok(Flow::Quit),
                    InputEvent::Ignored => {}
                }
            }
        }

        wait_any_key(&self.term)
    }
}

fn wait_any_key(term: &TermManager) -> Result<Flow> {
    let ev = term.read_key_blocking()?;
    Ok(if input::is_ctrl_c(&ev) { Flow::Quit } else { Flow::Continue })
}

fn run(game: &mut TerminalGame) -> Result<()> {
    if let Flow::Quit = game.show_intro()? {
        return Ok(());
    }

    loop {
        if let Flow::Quit = game.play()? {
            return Ok(());
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr; redirect it to keep the board clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = GameConfig {
        extent: cli.extent,
        initial_interval_ms: cli.interval,
        ..GameConfig::default()
    };
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut game = TerminalGame { config, rng, term: TermManager::new(cli.extent)? };
    game.term.setup()?;

    let result = run(&mut game);
    game.term.restore()?;
    result
}
