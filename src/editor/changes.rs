//! Per-tick tile diffs for the display layer.

use std::collections::BTreeMap;

use crate::tile::Tile;

use super::grid::TileGrid;
use super::selection::Position;

/// Coordinates whose character or highlight changed during a tick.
///
/// Listed once each, in row-major order. A tile that was unhighlighted and
/// highlighted again in the same tick is not a change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileChanges {
    positions: Vec<Position>,
}

impl TileChanges {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.positions.binary_search_by(|p| (p.y, p.x).cmp(&(pos.y, pos.x))).is_ok()
    }
}

impl<'a> IntoIterator for &'a TileChanges {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions.iter()
    }
}

/// Remembers the state of each tile the first time it is touched.
#[derive(Debug, Default)]
pub(super) struct ChangeRecorder {
    before: BTreeMap<usize, Tile>,
}

impl ChangeRecorder {
    pub(super) fn touch(&mut self, grid: &TileGrid, index: usize) {
        self.before
            .entry(index)
            .or_insert_with(|| *grid.tile_at(index));
    }

    /// Compare touched tiles against their recorded state.
    pub(super) fn finish(self, grid: &TileGrid) -> TileChanges {
        // BTreeMap keys are flat indices, so iteration is already row-major.
        let positions = self
            .before
            .into_iter()
            .filter(|(index, before)| grid.tile_at(*index) != before)
            .map(|(index, _)| grid.position_of(index))
            .collect();
        TileChanges { positions }
    }
}
