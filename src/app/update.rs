use crate::app::Model;
use crate::editor::KeyState;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editor
    /// Advance the editor by one tick with the given keys down
    Tick(KeyState),

    // Overlays
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Toggle the status line
    ToggleStatus,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// No side effects should occur in this function.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::Tick(keys) => {
            let mode_before = model.editor.mode();
            model.last_changes = model.editor.tick(&keys);
            model.tick_count += 1;
            // The status line shows the mode even when no tile changed.
            model.needs_render |=
                !model.last_changes.is_empty() || model.editor.mode() != mode_before;
            return model;
        }

        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        Message::ToggleStatus => {
            model.status_visible = !model.status_visible;
        }

        Message::Resize(width, height) => {
            model.terminal_size = (width, height);
        }
        Message::Redraw => {}

        Message::Quit => {
            model.should_quit = true;
        }
    }

    model.needs_render = true;
    model
}
