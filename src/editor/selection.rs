//! Grid coordinates and rectangular selection ranges.

use std::fmt;

/// A cell coordinate, `x` across and `y` down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An anchor/end pair covering the inclusive rectangle between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionRange {
    pub start: Position,
    pub end: Position,
}

impl SelectionRange {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A single-cell range.
    pub const fn at(pos: Position) -> Self {
        Self::new(pos, pos)
    }

    /// Top-left and bottom-right corners, whatever order start/end are in.
    pub fn bounds(&self) -> (Position, Position) {
        (
            Position::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y)),
            Position::new(self.start.x.max(self.end.x), self.start.y.max(self.end.y)),
        )
    }

    /// Every covered cell in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (min, max) = self.bounds();
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| Position::new(x, y)))
    }

    /// Columns and rows covered.
    pub fn size(&self) -> (usize, usize) {
        let (min, max) = self.bounds();
        (max.x - min.x + 1, max.y - min.y + 1)
    }
}
