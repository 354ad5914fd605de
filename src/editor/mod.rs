//! The modal grid editor.
//!
//! [`GridEditor`] owns every tile of a loaded map together with the cursor,
//! the active [`Mode`] and the selection. Each call to [`GridEditor::tick`]
//! consumes one frame of [`KeyState`] and returns the [`TileChanges`] the
//! display needs to repaint.
//!
//! # Example
//!
//! ```
//! use tilevim::editor::{EditorOptions, GridEditor, KeyState, LogicalKey, Position};
//!
//! let mut editor = GridEditor::from_text("..≈\n.:.", EditorOptions::default()).unwrap();
//! editor.tick(&KeyState::new().with(LogicalKey::Right));
//! assert_eq!(editor.cursor(), Position::new(1, 0));
//!
//! // Water is not walkable.
//! editor.tick(&KeyState::new());
//! editor.tick(&KeyState::new().with(LogicalKey::Right));
//! assert_eq!(editor.cursor(), Position::new(1, 0));
//! ```

mod changes;
mod grid;
mod keys;
mod mode;
mod selection;

pub use changes::TileChanges;
pub use grid::{GridError, TileGrid};
pub use keys::{Direction, KeyState, LogicalKey, PressTracker};
pub use mode::Mode;
pub use selection::{Position, SelectionRange};

use thiserror::Error;

use crate::map::{Map, MapError};
use crate::tile::{Glyph, Tile, TileError};

use changes::ChangeRecorder;
use mode::StepInput;

/// Reasons a map cannot be opened in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("malformed map: {0}")]
    Map(#[from] MapError),
    #[error(transparent)]
    Tile(#[from] GridError),
}

const DEFAULT_REPLACE_GLYPH: Glyph = match Glyph::new(EditorOptions::DEFAULT_REPLACE_CHAR) {
    Ok(glyph) => glyph,
    Err(_) => panic!("default replacement must be a tile character"),
};

/// Insert-mode replacement settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOptions {
    replace_direction: Direction,
    replace_glyph: Glyph,
}

impl EditorOptions {
    pub const DEFAULT_REPLACE_DIRECTION: Direction = Direction::Right;
    pub const DEFAULT_REPLACE_CHAR: char = '≈';

    /// The directional key that replaces the cursor tile in insert mode.
    #[must_use]
    pub const fn with_replace_direction(mut self, direction: Direction) -> Self {
        self.replace_direction = direction;
        self
    }

    /// The character written by a replace.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::UnknownCharacter`] if `character` is not a tile.
    pub fn with_replace_char(mut self, character: char) -> Result<Self, TileError> {
        self.replace_glyph = Glyph::new(character)?;
        Ok(self)
    }

    pub const fn replace_direction(&self) -> Direction {
        self.replace_direction
    }

    pub const fn replace_glyph(&self) -> Glyph {
        self.replace_glyph
    }
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            replace_direction: Self::DEFAULT_REPLACE_DIRECTION,
            replace_glyph: DEFAULT_REPLACE_GLYPH,
        }
    }
}

/// Editing session over one map.
#[derive(Debug, Clone)]
pub struct GridEditor {
    grid: TileGrid,
    cursor: Position,
    mode: Mode,
    selection: Option<SelectionRange>,
    previous_selection: Option<SelectionRange>,
    previous_cursor: Position,
    presses: PressTracker,
    options: EditorOptions,
}

impl GridEditor {
    /// Open a parsed map with the cursor at the top-left cell.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Tile`] if a cell holds an unknown character.
    pub fn new(map: &Map, options: EditorOptions) -> Result<Self, LoadError> {
        let mut grid = TileGrid::from_map(map)?;
        let cursor = Position::default();
        if let Some(tile) = grid.get_mut(cursor) {
            tile.highlight();
        }
        tracing::info!(
            width = grid.width(),
            height = grid.height(),
            "editor session opened"
        );
        Ok(Self {
            grid,
            cursor,
            mode: Mode::Normal,
            selection: None,
            previous_selection: None,
            previous_cursor: cursor,
            presses: PressTracker::new(),
            options,
        })
    }

    /// Parse `text` and open it.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Map`] for malformed text and [`LoadError::Tile`]
    /// for unknown characters.
    pub fn from_text(text: &str, options: EditorOptions) -> Result<Self, LoadError> {
        let map = Map::parse(text)?;
        Self::new(&map, options)
    }

    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// The active selection; `None` outside the visual modes.
    pub const fn selection(&self) -> Option<SelectionRange> {
        self.selection
    }

    pub const fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub const fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub const fn width(&self) -> usize {
        self.grid.width()
    }

    pub const fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.grid.get(pos)
    }

    pub fn cursor_tile(&self) -> &Tile {
        self.grid.tile_at(self.cursor.y * self.grid.width() + self.cursor.x)
    }

    /// Every highlighted cell in row-major order.
    pub fn highlighted_positions(&self) -> Vec<Position> {
        self.grid
            .rows()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, tile)| tile.is_highlighted())
                    .map(move |(x, _)| Position::new(x, y))
            })
            .collect()
    }

    /// Process one frame of input.
    ///
    /// Clears last tick's highlight footprint, runs the current mode's
    /// handler, applies any replacement, then highlights the selection (line
    /// and block modes only) and finally the cursor.
    pub fn tick(&mut self, keys: &KeyState) -> TileChanges {
        let mut recorder = ChangeRecorder::default();

        let stale: Vec<usize> = self
            .previous_selection
            .map(|range| self.grid.indices_in(range).collect())
            .unwrap_or_default();
        for index in stale.into_iter().chain(self.grid.index(self.previous_cursor)) {
            self.set_highlight(&mut recorder, index, false);
        }

        let direction = self.presses.observe(keys);
        let step = self.mode.step(&StepInput {
            grid: &self.grid,
            keys,
            cursor: self.cursor,
            selection: self.selection,
            direction,
            replace_direction: self.options.replace_direction,
        });
        tracing::trace!(?keys, ?direction, ?step, "tick");

        if step.mode != self.mode {
            tracing::debug!(from = self.mode.as_str(), to = step.mode.as_str(), "mode change");
        }
        if let Some(pos) = step.replace
            && let Some(index) = self.grid.index(pos)
        {
            recorder.touch(&self.grid, index);
            self.grid
                .tile_at_mut(index)
                .set_glyph(self.options.replace_glyph);
            tracing::debug!(%pos, glyph = %self.options.replace_glyph.character(), "tile replaced");
        }
        self.mode = step.mode;
        self.cursor = step.cursor;
        self.selection = step.selection;

        if self.mode.highlights_selection()
            && let Some(range) = self.selection
        {
            let span: Vec<usize> = self.grid.indices_in(range).collect();
            for index in span {
                self.set_highlight(&mut recorder, index, true);
            }
        }
        if let Some(index) = self.grid.index(self.cursor) {
            self.set_highlight(&mut recorder, index, true);
        }

        self.previous_selection = self.selection;
        self.previous_cursor = self.cursor;
        recorder.finish(&self.grid)
    }

    fn set_highlight(&mut self, recorder: &mut ChangeRecorder, index: usize, on: bool) {
        recorder.touch(&self.grid, index);
        let tile = self.grid.tile_at_mut(index);
        if on {
            tile.highlight();
        } else {
            tile.unhighlight();
        }
    }
}

#[cfg(test)]
mod tests;
