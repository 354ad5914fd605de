//! Tile colours.
//!
//! Each tile kind has a fixed background/foreground pair. Highlighted tiles
//! are drawn black on white whatever their kind.

use ratatui::style::{Color, Modifier, Style};

use crate::editor::Mode;
use crate::tile::{Tile, TileKind};

/// Background and foreground for a tile kind.
pub const fn kind_colors(kind: TileKind) -> (Color, Color) {
    match kind {
        TileKind::Grass => (Color::Rgb(0x14, 0x30, 0x0C), Color::Rgb(0x28, 0x5E, 0x1B)),
        TileKind::Water => (Color::Rgb(0x0C, 0x2A, 0x3A), Color::Rgb(0x1A, 0x4B, 0x6B)),
    }
}

pub const HIGHLIGHT_BG: Color = Color::Rgb(0xFF, 0xFF, 0xFF);
pub const HIGHLIGHT_FG: Color = Color::Rgb(0x00, 0x00, 0x00);

/// Style for drawing one tile.
pub fn tile_style(tile: &Tile) -> Style {
    if tile.is_highlighted() {
        return Style::default().bg(HIGHLIGHT_BG).fg(HIGHLIGHT_FG);
    }
    let (bg, fg) = kind_colors(tile.kind());
    Style::default().bg(bg).fg(fg)
}

/// Status line style for each mode, roughly following vim's mode colours.
pub fn mode_style(mode: Mode) -> Style {
    let bg = match mode {
        Mode::Normal => Color::DarkGray,
        Mode::Insert => Color::Green,
        Mode::Visual | Mode::VisualLine | Mode::VisualBlock => Color::Magenta,
    };
    Style::default()
        .bg(bg)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}
