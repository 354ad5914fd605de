//! Per-cell tile state.
//!
//! A [`Tile`] is one grid cell: the glyph it shows, the [`TileKind`] derived
//! from that glyph, and whether it is currently highlighted. The glyph and
//! kind travel together as a validated [`Glyph`], so they can never drift
//! apart.

use thiserror::Error;

/// Errors raised when a character has no entry in the tile table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TileError {
    #[error("unknown tile character {character:?}")]
    UnknownCharacter { character: char },
}

/// Semantic tile kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    Grass,
    Water,
}

impl TileKind {
    /// Look up the kind for a map character.
    pub const fn from_char(character: char) -> Option<Self> {
        match character {
            '.' | ':' => Some(Self::Grass),
            '≈' => Some(Self::Water),
            _ => None,
        }
    }

    /// Whether the cursor may stand on tiles of this kind.
    pub const fn is_walkable(self) -> bool {
        match self {
            Self::Grass => true,
            Self::Water => false,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Grass => "grass",
            Self::Water => "water",
        }
    }
}

/// A character paired with the kind it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph {
    character: char,
    kind: TileKind,
}

impl Glyph {
    /// Validate a character against the tile table.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::UnknownCharacter`] if the character has no kind.
    pub const fn new(character: char) -> Result<Self, TileError> {
        match TileKind::from_char(character) {
            Some(kind) => Ok(Self { character, kind }),
            None => Err(TileError::UnknownCharacter { character }),
        }
    }

    pub const fn character(self) -> char {
        self.character
    }

    pub const fn kind(self) -> TileKind {
        self.kind
    }
}

impl TryFrom<char> for Glyph {
    type Error = TileError;

    fn try_from(character: char) -> Result<Self, Self::Error> {
        Self::new(character)
    }
}

/// One grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    glyph: Glyph,
    highlighted: bool,
}

impl Tile {
    /// Create an unhighlighted tile showing `character`.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::UnknownCharacter`] for glyphs outside the table.
    pub const fn new(character: char) -> Result<Self, TileError> {
        match Glyph::new(character) {
            Ok(glyph) => Ok(Self::from_glyph(glyph)),
            Err(err) => Err(err),
        }
    }

    pub const fn from_glyph(glyph: Glyph) -> Self {
        Self {
            glyph,
            highlighted: false,
        }
    }

    pub const fn character(&self) -> char {
        self.glyph.character
    }

    pub const fn kind(&self) -> TileKind {
        self.glyph.kind
    }

    pub const fn glyph(&self) -> Glyph {
        self.glyph
    }

    pub const fn is_walkable(&self) -> bool {
        self.glyph.kind.is_walkable()
    }

    pub const fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Change the displayed character, re-deriving kind and walkability.
    ///
    /// The tile is left untouched when the character is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::UnknownCharacter`] for glyphs outside the table.
    pub fn set_character(&mut self, character: char) -> Result<(), TileError> {
        self.glyph = Glyph::new(character)?;
        Ok(())
    }

    pub const fn set_glyph(&mut self, glyph: Glyph) {
        self.glyph = glyph;
    }

    pub const fn highlight(&mut self) {
        self.highlighted = true;
    }

    pub const fn unhighlight(&mut self) {
        self.highlighted = false;
    }
}
