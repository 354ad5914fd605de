use std::collections::BTreeSet;

use crate::map::MapError;
use crate::tile::{TileError, TileKind};

use super::*;

const SAMPLE: &str = "..≈\n.:.";

fn create_editor(text: &str) -> GridEditor {
    GridEditor::from_text(text, EditorOptions::default()).unwrap()
}

fn keys(list: &[LogicalKey]) -> KeyState {
    list.iter().copied().collect()
}

/// Press and release a chord over two ticks.
fn tap(editor: &mut GridEditor, chord: &[LogicalKey]) -> TileChanges {
    let changes = editor.tick(&keys(chord));
    editor.tick(&KeyState::new());
    changes
}

fn highlighted(editor: &GridEditor) -> BTreeSet<Position> {
    editor.highlighted_positions().into_iter().collect()
}

fn rect(start: (usize, usize), end: (usize, usize)) -> BTreeSet<Position> {
    SelectionRange::new(Position::new(start.0, start.1), Position::new(end.0, end.1))
        .positions()
        .collect()
}

#[test]
fn test_new_editor_starts_in_normal_with_cursor_highlighted() {
    let editor = create_editor(SAMPLE);
    assert_eq!(editor.mode(), Mode::Normal);
    assert_eq!(editor.cursor(), Position::new(0, 0));
    assert_eq!(editor.selection(), None);
    assert_eq!(editor.highlighted_positions(), vec![Position::new(0, 0)]);
    assert_eq!((editor.width(), editor.height()), (3, 2));
}

#[test]
fn test_move_onto_walkable_then_blocked_by_water() {
    let mut editor = create_editor(SAMPLE);
    tap(&mut editor, &[LogicalKey::Right]);
    assert_eq!(editor.cursor(), Position::new(1, 0));

    tap(&mut editor, &[LogicalKey::Right]);
    assert_eq!(editor.cursor(), Position::new(1, 0));
    assert_eq!(
        editor.tile(Position::new(2, 0)).map(Tile::kind),
        Some(TileKind::Water)
    );
}

#[test]
fn test_moves_clamp_at_grid_edges() {
    let mut editor = create_editor("..\n..");
    tap(&mut editor, &[LogicalKey::Left]);
    tap(&mut editor, &[LogicalKey::Up]);
    assert_eq!(editor.cursor(), Position::new(0, 0));

    for _ in 0..3 {
        tap(&mut editor, &[LogicalKey::Down]);
        tap(&mut editor, &[LogicalKey::Right]);
    }
    assert_eq!(editor.cursor(), Position::new(1, 1));
}

#[test]
fn test_held_key_moves_once() {
    let mut editor = create_editor(".....");
    let held = keys(&[LogicalKey::Right]);
    for _ in 0..10 {
        editor.tick(&held);
    }
    assert_eq!(editor.cursor(), Position::new(1, 0));

    editor.tick(&KeyState::new());
    editor.tick(&held);
    assert_eq!(editor.cursor(), Position::new(2, 0));
}

#[test]
fn test_held_key_moves_again_after_other_key_released() {
    let mut editor = create_editor(".....\n.....\n.....");
    let right = keys(&[LogicalKey::Right]);
    editor.tick(&right);
    assert_eq!(editor.cursor(), Position::new(1, 0));

    editor.tick(&keys(&[LogicalKey::Right, LogicalKey::Down]));
    assert_eq!(editor.cursor(), Position::new(1, 1));

    editor.tick(&right);
    assert_eq!(editor.cursor(), Position::new(2, 1));
    editor.tick(&right);
    assert_eq!(editor.cursor(), Position::new(2, 1));
}

#[test]
fn test_blocked_press_is_still_consumed() {
    let mut editor = create_editor(".≈.");
    let held = keys(&[LogicalKey::Right]);
    editor.tick(&held);
    editor.tick(&held);
    assert_eq!(editor.cursor(), Position::new(0, 0));
}

#[test]
fn test_normal_mode_only_highlights_cursor() {
    let mut editor = create_editor("...\n...");
    tap(&mut editor, &[LogicalKey::Right]);
    tap(&mut editor, &[LogicalKey::Down]);
    assert_eq!(editor.highlighted_positions(), vec![Position::new(1, 1)]);
}

#[test]
fn test_tick_reports_old_and_new_cursor() {
    let mut editor = create_editor("...");
    let changes = editor.tick(&keys(&[LogicalKey::Right]));
    assert_eq!(
        changes.positions(),
        &[Position::new(0, 0), Position::new(1, 0)]
    );
    assert!(changes.contains(Position::new(1, 0)));

    let changes = editor.tick(&keys(&[LogicalKey::Right]));
    assert!(changes.is_empty(), "held key repaints nothing: {changes:?}");
}

#[test]
fn test_insert_toggle_and_cancel() {
    let mut editor = create_editor(SAMPLE);
    tap(&mut editor, &[LogicalKey::InsertToggle]);
    assert_eq!(editor.mode(), Mode::Insert);
    assert_eq!(editor.selection(), None);

    tap(&mut editor, &[LogicalKey::VisualToggle]);
    assert_eq!(editor.mode(), Mode::Insert, "visual toggle ignored in insert");

    tap(&mut editor, &[LogicalKey::Cancel]);
    assert_eq!(editor.mode(), Mode::Normal);
}

#[test]
fn test_insert_replace_writes_substitute_glyph() {
    let mut editor = create_editor(SAMPLE);
    tap(&mut editor, &[LogicalKey::InsertToggle]);
    let changes = tap(&mut editor, &[LogicalKey::Right]);

    assert_eq!(editor.cursor(), Position::new(0, 0));
    let tile = editor.tile(Position::new(0, 0)).unwrap();
    assert_eq!(tile.character(), '≈');
    assert!(!tile.is_walkable());
    assert!(tile.is_highlighted());
    assert_eq!(changes.positions(), &[Position::new(0, 0)]);
}

#[test]
fn test_insert_other_directions_still_move() {
    let mut editor = create_editor(SAMPLE);
    tap(&mut editor, &[LogicalKey::InsertToggle]);
    tap(&mut editor, &[LogicalKey::Down]);
    assert_eq!(editor.cursor(), Position::new(0, 1));
    assert_eq!(editor.tile(Position::new(0, 1)).unwrap().character(), '.');
}

#[test]
fn test_cursor_can_leave_a_replaced_tile() {
    let mut editor = create_editor("...");
    tap(&mut editor, &[LogicalKey::InsertToggle]);
    tap(&mut editor, &[LogicalKey::Right]);
    tap(&mut editor, &[LogicalKey::Cancel]);
    tap(&mut editor, &[LogicalKey::Right]);
    assert_eq!(editor.cursor(), Position::new(1, 0));

    // The replaced tile now blocks the way back.
    tap(&mut editor, &[LogicalKey::Left]);
    assert_eq!(editor.cursor(), Position::new(1, 0));
}

#[test]
fn test_custom_replace_options() {
    let options = EditorOptions::default()
        .with_replace_direction(Direction::Down)
        .with_replace_char(':')
        .unwrap();
    let mut editor = GridEditor::from_text("..\n..", options).unwrap();
    tap(&mut editor, &[LogicalKey::InsertToggle]);
    tap(&mut editor, &[LogicalKey::Down]);
    assert_eq!(editor.cursor(), Position::new(0, 0));
    assert_eq!(editor.cursor_tile().character(), ':');

    tap(&mut editor, &[LogicalKey::Right]);
    assert_eq!(editor.cursor(), Position::new(1, 0));
}

#[test]
fn test_replace_char_must_be_a_tile() {
    assert_eq!(
        EditorOptions::default().with_replace_char('x'),
        Err(TileError::UnknownCharacter { character: 'x' })
    );
}

#[test]
fn test_visual_block_example() {
    let mut editor = create_editor(SAMPLE);
    tap(&mut editor, &[LogicalKey::Right]);
    tap(&mut editor, &[LogicalKey::VisualToggle, LogicalKey::BlockModifier]);
    assert_eq!(editor.mode(), Mode::VisualBlock);

    tap(&mut editor, &[LogicalKey::Down]);
    tap(&mut editor, &[LogicalKey::Right]);

    assert_eq!(
        editor.selection(),
        Some(SelectionRange::new(Position::new(1, 0), Position::new(2, 1)))
    );
    assert_eq!(highlighted(&editor), rect((1, 0), (2, 1)));
}

#[test]
fn test_visual_block_shrinks_when_cursor_returns() {
    let mut editor = create_editor("...\n...\n...");
    tap(&mut editor, &[LogicalKey::VisualToggle, LogicalKey::BlockModifier]);
    tap(&mut editor, &[LogicalKey::Down]);
    tap(&mut editor, &[LogicalKey::Down]);
    tap(&mut editor, &[LogicalKey::Right]);
    assert_eq!(highlighted(&editor), rect((0, 0), (1, 2)));

    tap(&mut editor, &[LogicalKey::Up]);
    assert_eq!(highlighted(&editor), rect((0, 0), (1, 1)));
}

#[test]
fn test_plain_visual_highlights_cursor_only() {
    let mut editor = create_editor("...\n...");
    tap(&mut editor, &[LogicalKey::VisualToggle]);
    assert_eq!(editor.mode(), Mode::Visual);
    tap(&mut editor, &[LogicalKey::Right]);
    tap(&mut editor, &[LogicalKey::Down]);

    assert_eq!(
        editor.selection(),
        Some(SelectionRange::new(Position::new(0, 0), Position::new(1, 1)))
    );
    assert_eq!(editor.highlighted_positions(), vec![Position::new(1, 1)]);
}

#[test]
fn test_visual_line_spans_full_rows() {
    let mut editor = create_editor("...\n...\n...");
    tap(&mut editor, &[LogicalKey::Right]);
    tap(&mut editor, &[LogicalKey::Down]);
    tap(&mut editor, &[LogicalKey::VisualToggle, LogicalKey::LineModifier]);
    assert_eq!(editor.mode(), Mode::VisualLine);
    assert_eq!(
        editor.selection(),
        Some(SelectionRange::new(Position::new(0, 1), Position::new(2, 1)))
    );
    assert_eq!(highlighted(&editor), rect((0, 1), (2, 1)));

    tap(&mut editor, &[LogicalKey::Up]);
    assert_eq!(
        editor.selection(),
        Some(SelectionRange::new(Position::new(0, 1), Position::new(2, 0)))
    );
    assert_eq!(highlighted(&editor), rect((0, 0), (2, 1)));

    tap(&mut editor, &[LogicalKey::Down]);
    tap(&mut editor, &[LogicalKey::Down]);
    assert_eq!(highlighted(&editor), rect((0, 1), (2, 2)));
}

#[test]
fn test_visual_line_horizontal_move_keeps_full_rows() {
    let mut editor = create_editor("...\n...");
    tap(&mut editor, &[LogicalKey::VisualToggle, LogicalKey::LineModifier]);
    tap(&mut editor, &[LogicalKey::Right]);
    assert_eq!(editor.cursor(), Position::new(1, 0));
    assert_eq!(highlighted(&editor), rect((0, 0), (2, 0)));
}

#[test]
fn test_cancel_from_visual_clears_selection_highlight() {
    let mut editor = create_editor("...\n...");
    tap(&mut editor, &[LogicalKey::VisualToggle, LogicalKey::BlockModifier]);
    tap(&mut editor, &[LogicalKey::Right]);
    tap(&mut editor, &[LogicalKey::Down]);
    assert_eq!(highlighted(&editor).len(), 4);

    let changes = tap(&mut editor, &[LogicalKey::Cancel]);
    assert_eq!(editor.mode(), Mode::Normal);
    assert_eq!(editor.selection(), None);
    assert_eq!(editor.highlighted_positions(), vec![Position::new(1, 1)]);
    assert_eq!(changes.len(), 3);
    assert!(!changes.contains(Position::new(1, 1)));
}

#[test]
fn test_visual_keys_ignored_while_visual() {
    let mut editor = create_editor("...");
    tap(&mut editor, &[LogicalKey::VisualToggle]);
    tap(&mut editor, &[LogicalKey::VisualToggle, LogicalKey::BlockModifier]);
    assert_eq!(editor.mode(), Mode::Visual);
    tap(&mut editor, &[LogicalKey::InsertToggle]);
    assert_eq!(editor.mode(), Mode::Visual);
}

#[test]
fn test_held_visual_toggle_does_not_reenter() {
    let mut editor = create_editor("...");
    let held = keys(&[LogicalKey::VisualToggle]);
    editor.tick(&held);
    editor.tick(&keys(&[LogicalKey::VisualToggle, LogicalKey::Right]));
    editor.tick(&held);
    assert_eq!(editor.mode(), Mode::Visual);
    assert_eq!(
        editor.selection(),
        Some(SelectionRange::new(Position::new(0, 0), Position::new(1, 0)))
    );
}

#[test]
fn test_load_rejects_malformed_map() {
    let err = GridEditor::from_text("..\n.", EditorOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::Map(MapError::Ragged { row: 1, .. })));

    let err = GridEditor::from_text("", EditorOptions::default()).unwrap_err();
    assert_eq!(err, LoadError::Map(MapError::Empty));
}

#[test]
fn test_load_rejects_unknown_tile() {
    let err = GridEditor::from_text("..\n.#", EditorOptions::default()).unwrap_err();
    let LoadError::Tile(grid_err) = err else {
        panic!("expected tile error, got {err:?}");
    };
    assert_eq!((grid_err.x, grid_err.y), (1, 1));
    assert!(grid_err.to_string().contains("'#'"));
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    const GLYPHS: [char; 3] = ['.', ':', '≈'];

    fn map_text(width: usize, cells: &[usize]) -> String {
        cells
            .chunks(width)
            .map(|row| row.iter().map(|&g| GLYPHS[g]).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn key_state(bits: u16) -> KeyState {
        KeyState::from_bits_truncate(bits)
    }

    fn arb_map() -> impl Strategy<Value = String> {
        (1..8usize, 1..8usize).prop_flat_map(|(w, h)| {
            prop::collection::vec(0..3usize, w * h).prop_map(move |cells| map_text(w, &cells))
        })
    }

    proptest! {
        #[test]
        fn cursor_stays_in_bounds_and_highlights_match_mode(
            text in arb_map(),
            frames in prop::collection::vec(0..512u16, 0..60),
        ) {
            let mut editor = create_editor(&text);
            for bits in frames {
                editor.tick(&key_state(bits));

                let cursor = editor.cursor();
                prop_assert!(cursor.x < editor.width());
                prop_assert!(cursor.y < editor.height());
                prop_assert_eq!(editor.selection().is_some(), editor.mode().is_visual());

                let mut expected = BTreeSet::from([cursor]);
                if editor.mode().highlights_selection()
                    && let Some(range) = editor.selection()
                {
                    expected.extend(range.positions());
                }
                prop_assert_eq!(highlighted(&editor), expected);
            }
        }

        #[test]
        fn holding_a_direction_moves_at_most_one_cell(
            width in 1..10usize,
            height in 1..10usize,
            dir in 0..4usize,
            ticks in 1..30usize,
        ) {
            let text = vec![".".repeat(width); height].join("\n");
            let mut editor = create_editor(&text);
            let start = Position::new(width / 2, height / 2);
            // Walk to the middle first.
            for _ in 0..start.x {
                tap(&mut editor, &[LogicalKey::Right]);
            }
            for _ in 0..start.y {
                tap(&mut editor, &[LogicalKey::Down]);
            }
            prop_assert_eq!(editor.cursor(), start);

            let held = KeyState::new().with(Direction::ALL[dir].key());
            for _ in 0..ticks {
                editor.tick(&held);
            }
            let end = editor.cursor();
            let distance = end.x.abs_diff(start.x) + end.y.abs_diff(start.y);
            prop_assert!(distance <= 1);
        }

        #[test]
        fn visual_selection_end_tracks_cursor(
            moves in prop::collection::vec(0..4usize, 0..30),
        ) {
            let mut editor = create_editor("....\n....\n....\n....");
            tap(&mut editor, &[LogicalKey::VisualToggle, LogicalKey::BlockModifier]);
            for m in moves {
                tap(&mut editor, &[Direction::ALL[m].key()]);
                let range = editor.selection().unwrap();
                prop_assert_eq!(range.start, Position::new(0, 0));
                prop_assert_eq!(range.end, editor.cursor());
            }
        }

        #[test]
        fn visual_line_highlights_whole_rows_between_anchor_and_cursor(
            start_row in 0..5usize,
            moves in prop::collection::vec(0..4usize, 0..40),
        ) {
            let mut editor = create_editor(".....\n.:...\n.....\n...:.\n.....");
            for _ in 0..start_row {
                tap(&mut editor, &[LogicalKey::Down]);
            }
            tap(&mut editor, &[LogicalKey::VisualToggle, LogicalKey::LineModifier]);

            for m in moves {
                tap(&mut editor, &[Direction::ALL[m].key()]);
                let cursor = editor.cursor();
                let range = editor.selection().unwrap();
                prop_assert_eq!(range.start, Position::new(0, start_row));
                prop_assert_eq!(range.end, Position::new(4, cursor.y));
                prop_assert_eq!(highlighted(&editor), rect((0, start_row), (4, cursor.y)));
            }
        }
    }
}
