use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{bail, Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, read, poll};

use crate::game::Phase;
use crate::grid::{Cell, Grid};
use crate::sink::{PresentationSink, Snapshot};

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

const SNAKE_BODY_GLYPH: [char; 2] = ['█', '█'];
const SNAKE_HEAD_GLYPH: [char; 2] = ['▓', '▓'];
const FOOD_GLYPH: [char; 2] = ['<', '>'];
const DEAD_SNAKE_GLYPH: [char; 2] = ['X', 'X'];
const EMPTY_GLYPH: [char; 2] = [' ', ' '];
const SCORE_LINE_WIDTH: u32 = 15;

/// Crossterm frontend. Board cells are two columns wide so they come out
/// roughly square.
pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
    board_origin: Coords,
    extent: TermInt,
    last_body: Vec<Cell>,
}

struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new(extent: TermInt) -> Result<Self> {
        let (width, height) = terminal::size().context("Error reading terminal size")?;

        // Border on each side, plus the score line under the board.
        let board_w = (extent as u32 * 2 + 2).max(SCORE_LINE_WIDTH);
        let board_h = extent as u32 + 3;
        if board_w > width as u32 || board_h > height as u32 {
            bail!("terminal is {}x{}, a board of {} cells needs {}x{}", width, height, extent, board_w, board_h);
        }

        let board_origin = ((width - board_w as TermInt) / 2, (height - board_h as TermInt) / 2);
        let screen = vec![' '; width as usize * height as usize];

        Ok(TermManager {
            width,
            height,
            stdout: stdout(),
            screen,
            current_msg: None,
            board_origin,
            extent,
            last_body: vec![],
        })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error enabling raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking).context("Error hiding cursor")?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Error disabling raw mode")?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking).context("Error showing cursor")?;
        execute!(self.stdout, LeaveAlternateScreen).context("Error leaving alt screen")?;
        Ok(())
    }

    pub fn read_key_blocking(&self) -> Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read().context("Error reading event")? {
                return Ok(ev);
            }
        }
    }

    /// Waits up to `timeout` for a key press.
    pub fn poll_key(&self, timeout: Duration) -> Result<Option<KeyEvent>> {
        if poll(timeout).context("Error polling events")? {
            if let Event::Key(ev) = read().context("Error reading event")? {
                return Ok(Some(ev));
            }
        }

        Ok(None)
    }

    /// Clears the screen and draws an empty board.
    pub fn reset_board(&mut self) -> Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All)).context("Error clearing")?;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        self.current_msg = None;
        self.last_body.clear();

        let (ox, oy) = self.board_origin;
        let end_x = ox + self.extent * 2 + 1;
        let end_y = oy + self.extent + 1;

        for x in ox..=end_x {
            let ch = if x == ox || x == end_x {'+'} else {'-'};
            self.print_at((x, oy), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in oy + 1..end_y {
            self.print_at((ox, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        self.print_score(0)?;
        self.flush()
    }

    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let msg = Message::fit(lines, (self.width, self.height));
        let (left, top) = msg.top_left;

        // Blank top and bottom rows
        for y in [top, top + msg.height - 1].iter() {
            for x_diff in 0..msg.width {
                self.print_at_no_save((left + x_diff, *y), ' ')?;
            }
        }

        for (i, line) in lines.iter().take(msg.height as usize - 2).enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg.width as usize);
            let y = top + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().take(msg.width as usize).enumerate() {
                self.print_at_no_save((left + x_diff as TermInt, y), ch)?;
            }
        }

        self.current_msg = Some(msg);
        self.flush()
    }

    pub fn hide_message(&mut self) -> Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Put back whatever the box was covering
        for y_diff in 0..msg.height {
            for x_diff in 0..msg.width {
                let (x, y) = (msg.top_left.0 + x_diff, msg.top_left.1 + y_diff);
                if let Some(&ch) = self.screen.get(self.width as usize * y as usize + x as usize) {
                    self.print_at_no_save((x, y), ch)?;
                }
            }
        }

        self.flush()
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_frame(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        for cell in std::mem::take(&mut self.last_body) {
            self.print_cell(cell, EMPTY_GLYPH)?;
        }

        self.print_cell(snapshot.food, FOOD_GLYPH)?;

        let dead = snapshot.phase == Phase::Over;
        for (i, cell) in snapshot.snake.segments().enumerate() {
            let glyph = match (dead, i) {
                (true, _) => DEAD_SNAKE_GLYPH,
                (false, 0) => SNAKE_HEAD_GLYPH,
                (false, _) => SNAKE_BODY_GLYPH,
            };
            self.print_cell(cell, glyph)?;
        }

        self.last_body = snapshot.snake.segments().collect();
        self.print_score(snapshot.score)?;
        self.flush()
    }

    fn print_score(&mut self, score: u32) -> Result<()> {
        let (ox, oy) = self.board_origin;
        let line = format!("Score: {:<8}", score);
        for (i, ch) in line.chars().enumerate() {
            self.print_at((ox + i as TermInt, oy + self.extent + 2), ch)?;
        }
        Ok(())
    }

    fn print_cell(&mut self, cell: Cell, glyph: [char; 2]) -> Result<()> {
        if !Grid::new(self.extent).in_bounds(cell) {
            return Ok(());
        }

        let (ox, oy) = self.board_origin;
        let x = ox + 1 + cell.x as TermInt * 2;
        let y = oy + 1 + cell.y as TermInt;
        self.print_at((x, y), glyph[0])?;
        self.print_at((x + 1, y), glyph[1])
    }

    fn print_at(&mut self, pos: Coords, ch: char) -> Result<()> {
        self.print_at_no_save(pos, ch)?;
        self.screen[self.width as usize * pos.1 as usize + pos.0 as usize] = ch;
        Ok(())
    }

    fn print_at_no_save(&mut self, pos: Coords, ch: char) -> Result<()> {
        // Used for message boxes, which must not overwrite the buffer they restore from
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch)).context("Error printing")
    }
}

impl Message {
    /// Centered box around `lines`, shrunk to fit a terminal of `term_size`.
    fn fit(lines: &[&str], (term_w, term_h): Coords) -> Self {
        let widest = lines.iter().map(|x| x.chars().count()).max().unwrap_or(0);
        let width = (widest + 2).min(term_w as usize) as TermInt;
        let height = (lines.len() + 2).min(term_h as usize).max(2) as TermInt;
        let top_left = ((term_w - width) / 2, term_h.saturating_sub(height) / 2);

        Message { top_left, width, height }
    }
}

impl PresentationSink for TermManager {
    fn render(&mut self, snapshot: &Snapshot<'_>) {
        if let Err(error) = self.draw_frame(snapshot) {
            tracing::warn!(?error, "failed to draw frame");
        }
    }

    fn render_game_over(&mut self, score: u32) {
        let score_line = format!("Score: {}", score);
        let res = self.show_message(&[
            "Game Over",
            &score_line,
            "",
            "Press any key to play again,",
            "or CTRL+C to quit."
        ]);

        if let Err(error) = res {
            tracing::warn!(?error, "failed to draw game over");
        }
    }

    fn score_changed(&mut self, score: u32) {
        if let Err(error) = self.print_score(score).and_then(|_| self.flush()) {
            tracing::warn!(?error, "failed to update score");
        }
    }
}
