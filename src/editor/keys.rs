//! Logical key state consumed by the editor each tick.

/// The fixed set of keys the editor understands.
///
/// Hardware key codes never reach the editor; the input layer maps them onto
/// these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    Left,
    Down,
    Up,
    Right,
    InsertToggle,
    VisualToggle,
    Cancel,
    LineModifier,
    BlockModifier,
}

impl LogicalKey {
    pub const ALL: [Self; 9] = [
        Self::Left,
        Self::Down,
        Self::Up,
        Self::Right,
        Self::InsertToggle,
        Self::VisualToggle,
        Self::Cancel,
        Self::LineModifier,
        Self::BlockModifier,
    ];

    /// The single-key [`KeyState`] for this key.
    pub const fn flag(self) -> KeyState {
        match self {
            Self::Left => KeyState::LEFT,
            Self::Down => KeyState::DOWN,
            Self::Up => KeyState::UP,
            Self::Right => KeyState::RIGHT,
            Self::InsertToggle => KeyState::INSERT_TOGGLE,
            Self::VisualToggle => KeyState::VISUAL_TOGGLE,
            Self::Cancel => KeyState::CANCEL,
            Self::LineModifier => KeyState::LINE_MODIFIER,
            Self::BlockModifier => KeyState::BLOCK_MODIFIER,
        }
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Down,
    Up,
    Right,
}

impl Direction {
    /// Priority order when several directions are down in the same tick.
    pub const ALL: [Self; 4] = [Self::Left, Self::Down, Self::Up, Self::Right];

    pub const fn key(self) -> LogicalKey {
        match self {
            Self::Left => LogicalKey::Left,
            Self::Down => LogicalKey::Down,
            Self::Up => LogicalKey::Up,
            Self::Right => LogicalKey::Right,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Down => "down",
            Self::Up => "up",
            Self::Right => "right",
        }
    }
}

bitflags::bitflags! {
    /// Which logical keys are down during one tick.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct KeyState: u16 {
        const LEFT = 1 << 0;
        const DOWN = 1 << 1;
        const UP = 1 << 2;
        const RIGHT = 1 << 3;
        const INSERT_TOGGLE = 1 << 4;
        const VISUAL_TOGGLE = 1 << 5;
        const CANCEL = 1 << 6;
        const LINE_MODIFIER = 1 << 7;
        const BLOCK_MODIFIER = 1 << 8;
    }
}

impl KeyState {
    /// No keys down.
    pub const fn new() -> Self {
        Self::empty()
    }

    /// Builder form of [`KeyState::press`].
    #[must_use]
    pub const fn with(self, key: LogicalKey) -> Self {
        self.union(key.flag())
    }

    pub fn press(&mut self, key: LogicalKey) {
        self.insert(key.flag());
    }

    pub fn release(&mut self, key: LogicalKey) {
        self.remove(key.flag());
    }

    pub const fn is_down(&self, key: LogicalKey) -> bool {
        self.contains(key.flag())
    }
}

impl FromIterator<LogicalKey> for KeyState {
    fn from_iter<I: IntoIterator<Item = LogicalKey>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with)
    }
}

/// Turns held directional keys into discrete presses.
///
/// Each tick the first down direction, in [`Direction::ALL`] order, is the
/// candidate. It acts unless it is the direction that acted last. With no
/// direction down the tracker forgets, so the next press always acts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PressTracker {
    last_fired: Option<Direction>,
}

impl PressTracker {
    pub const fn new() -> Self {
        Self { last_fired: None }
    }

    /// Record this tick's key state and return the direction to act on.
    pub fn observe(&mut self, keys: &KeyState) -> Option<Direction> {
        let candidate = Direction::ALL
            .into_iter()
            .find(|dir| keys.is_down(dir.key()));
        if candidate == self.last_fired {
            return None;
        }
        self.last_fired = candidate;
        candidate
    }
}
