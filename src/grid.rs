use rand::Rng;

/// A position on the board. Signed so a head that has just left the board
/// can still be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Cell { x: self.x + dx, y: self.y + dy }
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Cell { x, y }
    }
}

/// Square board of `extent` x `extent` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    extent: i32,
}

impl Grid {
    pub fn new(extent: u16) -> Self {
        Grid { extent: i32::from(extent) }
    }

    pub fn extent(&self) -> i32 {
        self.extent
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        (0..self.extent).contains(&cell.x) && (0..self.extent).contains(&cell.y)
    }

    /// Uniform over the whole board, occupied cells included.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell::new(rng.gen_range(0..self.extent), rng.gen_range(0..self.extent))
    }
}
