use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;

use super::{overlays, status, style};

/// Split the frame into the grid area and, if shown, the status line.
pub fn grid_area(model: &Model, area: Rect) -> (Rect, Option<Rect>) {
    if !model.status_visible || area.height == 0 {
        return (area, None);
    }
    let grid = Rect::new(area.x, area.y, area.width, area.height - 1);
    let status = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    (grid, Some(status))
}

/// First visible row or column so that `cursor` stays in view.
///
/// The view follows the cursor centred, and stops at the grid edges.
pub const fn scroll_offset(cursor: usize, grid_len: usize, view_len: usize) -> usize {
    if grid_len <= view_len || view_len == 0 {
        return 0;
    }
    let max = grid_len - view_len;
    let centred = cursor.saturating_sub(view_len / 2);
    if centred < max { centred } else { max }
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let (grid, status_area) = grid_area(model, area);

    render_grid(model, frame, grid);
    if let Some(status_area) = status_area {
        status::render_status_bar(model, frame, status_area);
    }

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_grid(model: &Model, frame: &mut Frame, area: Rect) {
    let editor = &model.editor;
    let view_w = area.width as usize;
    let view_h = area.height as usize;
    if view_w == 0 || view_h == 0 {
        return;
    }

    let cursor = editor.cursor();
    let offset_x = scroll_offset(cursor.x, editor.width(), view_w);
    let offset_y = scroll_offset(cursor.y, editor.height(), view_h);

    let lines: Vec<Line> = editor
        .grid()
        .rows()
        .skip(offset_y)
        .take(view_h)
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .skip(offset_x)
                .take(view_w)
                .map(|tile| Span::styled(tile.character().to_string(), style::tile_style(tile)))
                .collect();
            Line::from(spans)
        })
        .collect();

    // Small maps sit in the middle of the available space
    #[allow(clippy::cast_possible_truncation)]
    let shown_w = editor.width().min(view_w) as u16;
    #[allow(clippy::cast_possible_truncation)]
    let shown_h = editor.height().min(view_h) as u16;
    let target = Rect::new(
        area.x + (area.width - shown_w) / 2,
        area.y + (area.height - shown_h) / 2,
        shown_w,
        shown_h,
    );
    frame.render_widget(Paragraph::new(lines), target);
}
