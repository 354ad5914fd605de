// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. tile::TileKind)
    clippy::module_name_repetitions
)]

//! # Tilevim
//!
//! A vim-style modal editor for character tile maps.
//!
//! Tilevim loads a rectangular text map and lets you walk it with
//! `h`/`j`/`k`/`l`:
//! - Water blocks movement, grass does not
//! - Insert mode replaces the tile under the cursor
//! - Visual, visual-line and visual-block selections are highlighted live
//!
//! ## Architecture
//!
//! The editor core is driven one tick at a time by the set of keys held down,
//! and reports exactly which tiles changed. Around it, Tilevim uses The Elm
//! Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`map`]: Text map parsing
//! - [`tile`]: Tile kinds and glyphs
//! - [`editor`]: Modal editing state machine
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`config`]: Saved flags and config paths

pub mod app;
pub mod config;
pub mod editor;
pub mod map;
pub mod tile;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::{EditorOptions, GridEditor, KeyState, LogicalKey, Mode, Position};
    pub use crate::map::Map;
}
