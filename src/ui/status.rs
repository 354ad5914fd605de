use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;
use crate::editor::Mode;

use super::style;

pub fn mode_label(mode: Mode) -> String {
    match mode {
        Mode::Normal => format!(" {} ", mode.as_str()),
        _ => format!(" -- {} -- ", mode.as_str()),
    }
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let editor = &model.editor;
    let cursor = editor.cursor();
    let tile = editor.cursor_tile();

    let selection_info = editor
        .selection()
        .map(|range| {
            let (columns, rows) = range.size();
            format!("  sel {columns}x{rows}")
        })
        .unwrap_or_default();

    let info = format!(
        "  {}  {},{}  {}{}  ?:help",
        model.map_name,
        cursor.x + 1,
        cursor.y + 1,
        tile.kind().name(),
        selection_info
    );

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(mode_label(editor.mode()), style::mode_style(editor.mode())),
        Span::raw(info),
    ]))
    .style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(bar, area);
}
