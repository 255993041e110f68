use ratatui::layout::{Position, Size};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The unit vector `(dx, dy)` for this direction.  `y` grows downwards.
    pub(crate) fn offset(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Return the position one cell away from `pos` in this direction, or
    /// `None` if that would leave a field of the given size.
    pub(crate) fn advance(self, pos: Position, bounds: Size) -> Option<Position> {
        let (dx, dy) = self.offset();
        let x = pos.x.checked_add_signed(dx.into())?;
        let y = pos.y.checked_add_signed(dy.into())?;
        (x < bounds.width && y < bounds.height).then_some(Position { x, y })
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}
