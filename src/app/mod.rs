//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod event_loop;
mod input;
mod model;
mod update;

pub use input::{InputTracker, logical_chord};
pub use model::Model;
pub use update::{Message, update};

use std::path::PathBuf;
use std::time::Duration;

use crate::config::DEFAULT_TICK_MS;
use crate::editor::EditorOptions;
use crate::map::Map;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    map_name: String,
    map: Map,
    options: EditorOptions,
    tick_interval: Duration,
    status_visible: bool,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create a new application for an already parsed map.
    pub fn new(map_name: impl Into<String>, map: Map) -> Self {
        Self {
            map_name: map_name.into(),
            map,
            options: EditorOptions::default(),
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            status_visible: true,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Set insert-mode replacement options.
    pub const fn with_options(mut self, options: EditorOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the time between editor ticks.
    pub const fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Show or hide the status line.
    pub const fn with_status_visible(mut self, visible: bool) -> Self {
        self.status_visible = visible;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}
