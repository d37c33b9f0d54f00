use Heading::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right
}

impl Heading {
    /// Unit step on the board; y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Heading {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(self, other: Heading) -> bool {
        self.opposite() == other
    }
}

/// Owns the committed heading. Input may call `set_heading` any number of
/// times between ticks; the tick sees whatever was committed last.
#[derive(Debug, Clone)]
pub struct DirectionController {
    heading: Heading,
}

impl DirectionController {
    pub fn new(initial: Heading) -> Self {
        DirectionController { heading: initial }
    }

    /// Commits `requested` unless it would reverse the current heading.
    /// Returns whether the heading was committed.
    pub fn set_heading(&mut self, requested: Heading) -> bool {
        if requested.is_opposite(self.heading) {
            return false;
        }

        self.heading = requested;
        true
    }

    pub fn current_heading(&self) -> Heading {
        self.heading
    }
}
