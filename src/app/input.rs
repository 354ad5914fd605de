use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;

use crate::app::{App, Message, Model};
use crate::editor::{KeyState, LogicalKey, Mode};

/// Logical keys a terminal key event stands for; empty when unbound.
///
/// `v`, `V` and `Ctrl-v` carry their modifier with them so the editor sees
/// visual-toggle and the modifier down in the same tick.
pub fn logical_chord(key: &KeyEvent) -> KeyState {
    let visual = KeyState::new().with(LogicalKey::VisualToggle);

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('v' | 'V') => visual.with(LogicalKey::BlockModifier),
            _ => KeyState::new(),
        };
    }

    let single = |k| KeyState::new().with(k);
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => single(LogicalKey::Left),
        KeyCode::Char('j') | KeyCode::Down => single(LogicalKey::Down),
        KeyCode::Char('k') | KeyCode::Up => single(LogicalKey::Up),
        KeyCode::Char('l') | KeyCode::Right => single(LogicalKey::Right),
        KeyCode::Char('i') => single(LogicalKey::InsertToggle),
        KeyCode::Char('V') => visual.with(LogicalKey::LineModifier),
        KeyCode::Char('v') if key.modifiers.contains(KeyModifiers::SHIFT) => {
            visual.with(LogicalKey::LineModifier)
        }
        KeyCode::Char('v') => visual,
        KeyCode::Esc => single(LogicalKey::Cancel),
        _ => KeyState::new(),
    }
}

/// Folds terminal key events into one [`KeyState`] per tick.
///
/// Terminals that report key releases keep a key down until its release
/// arrives. Elsewhere a press is down for exactly the next tick. A key
/// pressed and released between two ticks is still seen down once.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    down: KeyState,
    pressed_this_tick: KeyState,
    released_early: KeyState,
    reports_release: bool,
}

impl InputTracker {
    pub const fn new(reports_release: bool) -> Self {
        Self {
            down: KeyState::new(),
            pressed_this_tick: KeyState::new(),
            released_early: KeyState::new(),
            reports_release,
        }
    }

    pub const fn reports_release(&self) -> bool {
        self.reports_release
    }

    /// The keys that will be reported at the next tick.
    pub const fn pending(&self) -> KeyState {
        self.down
    }

    pub fn record(&mut self, key: &KeyEvent) {
        let chord = logical_chord(key);
        if chord.is_empty() {
            return;
        }
        match key.kind {
            KeyEventKind::Press => {
                self.down = self.down.union(chord);
                self.pressed_this_tick = self.pressed_this_tick.union(chord);
                self.released_early = self.released_early.difference(chord);
            }
            KeyEventKind::Repeat => {
                self.down = self.down.union(chord);
            }
            KeyEventKind::Release => {
                let early = chord.intersection(self.pressed_this_tick);
                self.released_early = self.released_early.union(early);
                self.down = self.down.difference(chord.difference(early));
            }
        }
    }

    /// Drop every held key, e.g. when focus is lost and releases may never
    /// arrive.
    pub fn release_all(&mut self) {
        *self = Self::new(self.reports_release);
    }

    /// Close the current tick and return the keys that were down during it.
    pub fn end_tick(&mut self) -> KeyState {
        let snapshot = self.down;
        self.down = if self.reports_release {
            self.down.difference(self.released_early)
        } else {
            KeyState::new()
        };
        self.pressed_this_tick = KeyState::new();
        self.released_early = KeyState::new();
        snapshot
    }
}

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        tracker: &mut InputTracker,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model, tracker),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            Event::FocusLost => {
                tracker.release_all();
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(
        key: KeyEvent,
        model: &Model,
        tracker: &mut InputTracker,
    ) -> Option<Message> {
        if model.help_visible {
            return (key.kind == KeyEventKind::Press).then_some(Message::HideHelp);
        }

        if key.kind == KeyEventKind::Press {
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                KeyCode::Char('c') if ctrl => return Some(Message::Quit),
                KeyCode::Char('q') if !ctrl && model.editor.mode() == Mode::Normal => {
                    return Some(Message::Quit);
                }
                KeyCode::Char('?') | KeyCode::F(1) => return Some(Message::ToggleHelp),
                KeyCode::F(2) => return Some(Message::ToggleStatus),
                KeyCode::Char('l') if ctrl => return Some(Message::Redraw),
                _ => {}
            }
        }

        tracker.record(&key);
        None
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}
