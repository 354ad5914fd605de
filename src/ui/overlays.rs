use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());
    let replace = model.editor.options();

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::styled("Movement", section_style));
    lines.push(Line::raw("  h/j/k/l or arrows   Move (water blocks)"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Modes", section_style));
    lines.push(Line::raw("  i                   Insert"));
    lines.push(Line::raw("  v                   Visual"));
    lines.push(Line::raw("  V                   Visual line"));
    lines.push(Line::raw("  Ctrl-v              Visual block"));
    lines.push(Line::raw("  Esc                 Back to normal"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Editing", section_style));
    lines.push(Line::raw(format!(
        "  {:<20}Replace tile with {} (insert mode)",
        replace.replace_direction().name(),
        replace.replace_glyph().character()
    )));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Other", section_style));
    lines.push(Line::raw("  q / Ctrl-c          Quit (q in normal mode)"));
    lines.push(Line::raw("  ? / F1              Toggle help"));
    lines.push(Line::raw("  F2                  Toggle status line"));
    lines.push(Line::raw("  Ctrl-l              Redraw"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Config", section_style));
    lines.push(Line::raw(format!("  Global: {global_cfg}")));
    lines.push(Line::raw(format!("  Local override: {local_cfg}")));
    lines.push(Line::raw(""));
    lines.push(Line::styled("any key closes", dim_style));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
