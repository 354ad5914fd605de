use std::path::PathBuf;

use crate::editor::{GridEditor, TileChanges};

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The editing session
    pub editor: GridEditor,
    /// Name shown in the status line
    pub map_name: String,
    /// Last known terminal size (columns, rows)
    pub terminal_size: (u16, u16),
    /// Whether the status line is drawn
    pub status_visible: bool,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Tiles that changed on the most recent tick
    pub last_changes: TileChanges,
    /// Ticks processed since start
    pub tick_count: u64,
    /// Set when the screen is out of date; cleared by the event loop after drawing
    pub needs_render: bool,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("map_name", &self.map_name)
            .field("mode", &self.editor.mode())
            .field("cursor", &self.editor.cursor())
            .field("tick_count", &self.tick_count)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a new model with default settings.
    pub fn new(editor: GridEditor, map_name: impl Into<String>, terminal_size: (u16, u16)) -> Self {
        Self {
            editor,
            map_name: map_name.into(),
            terminal_size,
            status_visible: true,
            help_visible: false,
            last_changes: TileChanges::default(),
            tick_count: 0,
            needs_render: true,
            config_global_path: None,
            config_local_path: None,
            should_quit: false,
        }
    }
}
