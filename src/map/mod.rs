//! Text map parsing.
//!
//! A map is a newline-delimited block of characters where every row has the
//! same length. [`Map`] validates that shape once and is read-only after.
//!
//! # Example
//!
//! ```
//! use tilevim::map::Map;
//!
//! let map = Map::parse("..≈\n.:.\n").unwrap();
//! assert_eq!((map.width(), map.height()), (3, 2));
//! assert_eq!(map.row_at(0), Some(&['.', '.', '≈'][..]));
//! ```

use std::str::FromStr;

use thiserror::Error;

/// A small meadow with a pond, used when no map file is given.
pub const DEMO: &str = include_str!("../../maps/meadow.map");

/// Reasons a map text is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,
    #[error("map row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// A validated rectangular block of map characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl Map {
    /// Parse map text.
    ///
    /// Lines may end in `\n` or `\r\n`. Empty lines at the end are dropped;
    /// any other empty line counts as a zero-width row.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Empty`] when no rows remain and
    /// [`MapError::Ragged`] when a row's length differs from the first row.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let mut rows: Vec<Vec<char>> = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).chars().collect())
            .collect();
        while rows.last().is_some_and(Vec::is_empty) {
            rows.pop();
        }

        let width = rows.first().ok_or(MapError::Empty)?.len();
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(MapError::Ragged {
                row,
                expected: width,
                found,
            });
        }

        Ok(Self { rows, width })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn row_at(&self, y: usize) -> Option<&[char]> {
        self.rows.get(y).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

impl FromStr for Map {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
