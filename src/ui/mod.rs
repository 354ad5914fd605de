//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - the tile grid, scrolled to keep the cursor in view
//! - [`style`]: Tile colours
//! - the status line and help overlay

pub mod style;

mod overlays;
mod render;
mod status;

pub use render::{grid_area, render, scroll_offset};
