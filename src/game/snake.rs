use super::direction::Direction;
use crate::consts;
use ratatui::layout::{Position, Size};
use std::collections::VecDeque;

/// The snake.
///
/// Segments are stored head first; all positions are grid coordinates.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The positions of all of the snake's segments, starting with the head
    pub(super) segments: VecDeque<Position>,

    /// The direction in which the snake is currently facing
    pub(super) direction: Direction,
}

impl Snake {
    /// Create a snake in its starting position, facing up
    pub(crate) fn new() -> Snake {
        Snake {
            segments: consts::INITIAL_SNAKE
                .iter()
                .map(|&(x, y)| Position::new(x, y))
                .collect(),
            direction: Direction::Up,
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        self.segments
            .front()
            .copied()
            .unwrap_or(Position::ORIGIN)
    }

    /// Return the positions of the snake's segments, head first
    pub(crate) fn segments(&self) -> &VecDeque<Position> {
        &self.segments
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    pub(crate) fn contains(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    pub(super) fn turn(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Where the head would go on the next move, or `None` if that's off the
    /// edge of the field
    pub(super) fn next_head(&self, bounds: Size) -> Option<Position> {
        self.direction.advance(self.head(), bounds)
    }

    pub(super) fn push_head(&mut self, pos: Position) {
        self.segments.push_front(pos);
    }

    pub(super) fn drop_tail(&mut self) {
        let _ = self.segments.pop_back();
    }
}

impl Default for Snake {
    fn default() -> Snake {
        Snake::new()
    }
}
