use std::collections::VecDeque;

use crate::direction::Heading;
use crate::grid::Cell;

/// Body segments, head first. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Lays `length` segments out behind `head`, against `heading`.
    pub fn new(head: Cell, heading: Heading, length: usize) -> Self {
        let (dx, dy) = heading.delta();

        let body = (0..length.max(1) as i32)
            .map(|i| Cell::new(head.x - dx * i, head.y - dy * i))
            .collect();
        Snake { body }
    }

    pub fn from_segments<I>(segments: I) -> Option<Self>
    where
        I: IntoIterator,
        I::Item: Into<Cell>,
    {
        let body: VecDeque<Cell> = segments.into_iter().map(Into::into).collect();
        if body.is_empty() {
            None
        } else {
            Some(Snake { body })
        }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    /// Pushes a new head and, unless growing, drops the tail.
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);

        if !grow {
            self.body.pop_back();
        }
    }

    /// True if the head sits on any other segment.
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&seg| seg == head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Heading::*;

    #[test]
    fn test_layout_behind_head() {
        let snake = Snake::new(Cell::new(10, 10), Right, 3);
        let cells: Vec<Cell> = snake.segments().collect();
        assert_eq!(cells, vec![Cell::new(10, 10), Cell::new(9, 10), Cell::new(8, 10)]);

        let snake = Snake::new(Cell::new(4, 4), Up, 2);
        assert_eq!(snake.tail(), Cell::new(4, 5));
    }

    #[test]
    fn test_from_segments_rejects_empty() {
        assert!(Snake::from_segments(Vec::<Cell>::new()).is_none());
        let snake = Snake::from_segments(vec![(1, 1), (1, 2)]).unwrap();
        assert_eq!(snake.head(), Cell::new(1, 1));
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn test_advance() {
        let mut snake = Snake::new(Cell::new(5, 5), Right, 3);

        snake.advance(Cell::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), Cell::new(4, 5));

        snake.advance(Cell::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Cell::new(7, 5));
        assert_eq!(snake.tail(), Cell::new(4, 5));
    }

    #[test]
    fn test_head_overlap() {
        let mut snake = Snake::from_segments(vec![(5, 5), (5, 6), (4, 6), (4, 5), (4, 4)]).unwrap();
        assert!(!snake.head_overlaps_body());
        snake.advance(Cell::new(4, 5), false);
        assert!(snake.head_overlaps_body());
    }
}
