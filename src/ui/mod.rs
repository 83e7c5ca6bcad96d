mod confirm;
mod help;
pub mod list;
pub mod modal;
mod notice;

use crate::api::MovieBackend;
use crate::app::App;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

/// Top-level render dispatch. Overlays stack in order of precedence.
pub fn render<B: MovieBackend>(app: &App<B>, frame: &mut Frame) {
    list::render(app, frame);

    if let crate::app::EditModal::Open(session) = &app.modal {
        modal::render(session, frame);
    }
    if app.show_help {
        help::render(frame);
    }
    if let Some(pending) = &app.confirm {
        confirm::render(pending, frame);
    }
    if let Some(notice) = &app.notice {
        notice::render(notice, frame);
    }
}

/// Record text made safe for the terminal: control characters (escape
/// sequences, carriage returns, tabs) are replaced so they are shown, not executed.
pub fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_control() { '\u{FFFD}' } else { c })
        .collect()
}

/// Truncate a string to `max_width` columns, adding "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if unicode_width::UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        width += w;
        result.push(c);
    }
    result.push('…');
    result
}

/// Create a centered rectangle using percentage of parent area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Centered rectangle of a fixed size, shrunk to fit `area`.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_control_characters() {
        assert_eq!(sanitize("<b>X</b>"), "<b>X</b>");
        let cleaned = sanitize("\u{1b}[31mRed\u{7}\r");
        assert!(!cleaned.chars().any(|c| c.is_control()));
        assert!(cleaned.contains("[31mRed"));
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Dune", 10), "Dune");
        assert_eq!(truncate_str("The Godfather", 6), "The G…");
    }

    #[test]
    fn test_centered_fixed_clamps() {
        let area = Rect::new(0, 0, 20, 10);
        let r = centered_fixed(60, 12, area);
        assert_eq!(r, area);
        let r = centered_fixed(10, 4, area);
        assert_eq!(r, Rect::new(5, 3, 10, 4));
    }
}
