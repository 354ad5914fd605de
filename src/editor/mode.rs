//! The modal state machine.
//!
//! Each mode has one handler. A handler reads the tick's input and returns a
//! [`Step`] describing the next mode, cursor and selection; it never touches
//! the editor directly. Transition keys are checked before movement, in the
//! order cancel, insert-toggle, visual-toggle, and at most one transition
//! happens per tick. A directional press in the same tick is then handled by
//! the mode that was entered.

use super::grid::TileGrid;
use super::keys::{Direction, KeyState, LogicalKey};
use super::selection::{Position, SelectionRange};

/// Modal input interpretation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Visual,
    VisualLine,
    VisualBlock,
}

impl Mode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "INSERT",
            Self::Visual => "VISUAL",
            Self::VisualLine => "VISUAL LINE",
            Self::VisualBlock => "VISUAL BLOCK",
        }
    }

    pub const fn is_visual(self) -> bool {
        matches!(self, Self::Visual | Self::VisualLine | Self::VisualBlock)
    }

    /// Whether the whole selection rectangle is drawn highlighted.
    ///
    /// Plain visual mode only highlights the cursor.
    pub const fn highlights_selection(self) -> bool {
        matches!(self, Self::VisualLine | Self::VisualBlock)
    }

    /// Run this mode's handler for one tick.
    pub(super) fn step(self, input: &StepInput<'_>) -> Step {
        match self {
            Self::Normal => normal(input),
            Self::Insert => insert(input),
            Self::Visual => visual(input),
            Self::VisualLine => visual_line(input),
            Self::VisualBlock => visual_block(input),
        }
    }
}

/// Everything a handler may read.
pub(super) struct StepInput<'a> {
    pub grid: &'a TileGrid,
    pub keys: &'a KeyState,
    pub cursor: Position,
    pub selection: Option<SelectionRange>,
    /// The debounced directional press for this tick.
    pub direction: Option<Direction>,
    /// Which direction overwrites the cursor tile in insert mode.
    pub replace_direction: Direction,
}

/// A handler's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Step {
    pub mode: Mode,
    pub cursor: Position,
    pub selection: Option<SelectionRange>,
    /// Cell whose character is replaced with the substitute glyph.
    pub replace: Option<Position>,
}

impl Step {
    const fn stay(mode: Mode, input: &StepInput<'_>) -> Self {
        Self {
            mode,
            cursor: input.cursor,
            selection: input.selection,
            replace: None,
        }
    }

    const fn enter(mode: Mode, cursor: Position, selection: Option<SelectionRange>) -> Self {
        Self {
            mode,
            cursor,
            selection,
            replace: None,
        }
    }
}

fn normal(input: &StepInput<'_>) -> Step {
    let keys = input.keys;
    let cursor = input.cursor;

    let entered = if keys.is_down(LogicalKey::InsertToggle) {
        Some(Step::enter(Mode::Insert, cursor, None))
    } else if keys.is_down(LogicalKey::VisualToggle) {
        Some(if keys.is_down(LogicalKey::BlockModifier) {
            Step::enter(Mode::VisualBlock, cursor, Some(SelectionRange::at(cursor)))
        } else if keys.is_down(LogicalKey::LineModifier) {
            Step::enter(
                Mode::VisualLine,
                cursor,
                Some(input.grid.line_span(cursor.y, cursor.y)),
            )
        } else {
            Step::enter(Mode::Visual, cursor, Some(SelectionRange::at(cursor)))
        })
    } else {
        None
    };

    match entered {
        Some(step) => apply_motion(step, input),
        None => apply_motion(Step::stay(Mode::Normal, input), input),
    }
}

fn insert(input: &StepInput<'_>) -> Step {
    if let Some(step) = cancel(input) {
        return step;
    }
    apply_motion(Step::stay(Mode::Insert, input), input)
}

fn visual(input: &StepInput<'_>) -> Step {
    cancel(input).unwrap_or_else(|| apply_motion(Step::stay(Mode::Visual, input), input))
}

fn visual_line(input: &StepInput<'_>) -> Step {
    cancel(input).unwrap_or_else(|| apply_motion(Step::stay(Mode::VisualLine, input), input))
}

fn visual_block(input: &StepInput<'_>) -> Step {
    cancel(input).unwrap_or_else(|| apply_motion(Step::stay(Mode::VisualBlock, input), input))
}

fn cancel(input: &StepInput<'_>) -> Option<Step> {
    input
        .keys
        .is_down(LogicalKey::Cancel)
        .then(|| Step::enter(Mode::Normal, input.cursor, None))
}

/// Apply this tick's directional press as seen by `step.mode`.
fn apply_motion(mut step: Step, input: &StepInput<'_>) -> Step {
    let Some(direction) = input.direction else {
        return step;
    };

    if step.mode == Mode::Insert && direction == input.replace_direction {
        step.replace = Some(step.cursor);
        return step;
    }

    let Some(cursor) = try_move(input.grid, step.cursor, direction) else {
        return step;
    };
    step.cursor = cursor;

    step.selection = match (step.mode, step.selection) {
        (Mode::Visual | Mode::VisualBlock, Some(range)) => {
            Some(SelectionRange::new(range.start, cursor))
        }
        (Mode::VisualLine, Some(range)) => Some(input.grid.line_span(range.start.y, cursor.y)),
        (_, selection) => selection,
    };
    step
}

/// The clamped neighbour in `direction`, if the cursor may stand there.
fn try_move(grid: &TileGrid, from: Position, direction: Direction) -> Option<Position> {
    let to = grid.step(from, direction);
    (to != from && grid.is_walkable(to)).then_some(to)
}
