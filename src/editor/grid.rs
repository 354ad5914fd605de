//! Flat tile arena.

use thiserror::Error;

use crate::map::Map;
use crate::tile::{Tile, TileError};

use super::keys::Direction;
use super::selection::{Position, SelectionRange};

/// A map cell holds a character with no tile kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tile at ({x}, {y}): {source}")]
pub struct GridError {
    pub x: usize,
    pub y: usize,
    #[source]
    pub source: TileError,
}

/// Every tile of the map, stored row-major at `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Build one tile per map cell.
    ///
    /// # Errors
    ///
    /// Returns the first cell whose character is not in the tile table.
    pub fn from_map(map: &Map) -> Result<Self, GridError> {
        let mut tiles = Vec::with_capacity(map.width() * map.height());
        for (y, row) in map.rows().enumerate() {
            for (x, &character) in row.iter().enumerate() {
                let tile = Tile::new(character).map_err(|source| GridError { x, y, source })?;
                tiles.push(tile);
            }
        }
        Ok(Self {
            width: map.width(),
            height: map.height(),
            tiles,
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub const fn index(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.y * self.width + pos.x)
        } else {
            None
        }
    }

    pub const fn position_of(&self, index: usize) -> Position {
        Position::new(index % self.width, index / self.width)
    }

    pub fn get(&self, pos: Position) -> Option<&Tile> {
        self.index(pos).map(|idx| &self.tiles[idx])
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        self.index(pos).map(|idx| &mut self.tiles[idx])
    }

    pub(super) fn tile_at(&self, index: usize) -> &Tile {
        &self.tiles[index]
    }

    pub(super) fn tile_at_mut(&mut self, index: usize) -> &mut Tile {
        &mut self.tiles[index]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width)
    }

    /// Neighbouring cell in `direction`, clamped to the grid edge.
    pub const fn step(&self, from: Position, direction: Direction) -> Position {
        match direction {
            Direction::Left => Position::new(from.x.saturating_sub(1), from.y),
            Direction::Right => {
                let x = if from.x + 1 < self.width { from.x + 1 } else { from.x };
                Position::new(x, from.y)
            }
            Direction::Up => Position::new(from.x, from.y.saturating_sub(1)),
            Direction::Down => {
                let y = if from.y + 1 < self.height { from.y + 1 } else { from.y };
                Position::new(from.x, y)
            }
        }
    }

    pub fn is_walkable(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(Tile::is_walkable)
    }

    /// Indices of every in-bounds cell in the range.
    pub fn indices_in(&self, range: SelectionRange) -> impl Iterator<Item = usize> + '_ {
        range.positions().filter_map(|pos| self.index(pos))
    }

    /// The full-width span of row `anchor_y` through row `y`.
    pub const fn line_span(&self, anchor_y: usize, y: usize) -> SelectionRange {
        SelectionRange::new(
            Position::new(0, anchor_y),
            Position::new(self.width - 1, y),
        )
    }
}
