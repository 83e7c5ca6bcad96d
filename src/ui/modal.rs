use super::{centered_fixed, list::render_form, sanitize, truncate_str};
use crate::app::EditSession;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const MODAL_WIDTH: u16 = 60;
// border + three 3-row fields + button row + border
const MODAL_HEIGHT: u16 = 12;
const SAVE_LABEL: &str = "[ Save ]";
const CLOSE_LABEL: &str = "[ Close ]";

/// Screen geometry of the edit modal, shared by rendering and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalLayout {
    pub area: Rect,
    pub fields: [Rect; 3],
    pub save: Rect,
    pub close: Rect,
}

impl ModalLayout {
    pub fn new(screen: Rect) -> Self {
        let area = centered_fixed(MODAL_WIDTH, MODAL_HEIGHT, screen);
        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };
        let row = |offset: u16, height: u16| {
            Rect {
                x: inner.x,
                y: inner.y + offset,
                width: inner.width,
                height,
            }
            .intersection(inner)
        };
        let buttons = row(9, 1);
        let save = Rect {
            x: buttons.x + 1,
            width: SAVE_LABEL.len() as u16,
            ..buttons
        }
        .intersection(buttons);
        let close = Rect {
            x: save.right() + 2,
            width: CLOSE_LABEL.len() as u16,
            ..buttons
        }
        .intersection(buttons);

        Self {
            area,
            fields: [row(0, 3), row(3, 3), row(6, 3)],
            save,
            close,
        }
    }
}

pub fn render(session: &EditSession, frame: &mut Frame) {
    let layout = ModalLayout::new(frame.area());
    frame.render_widget(Clear, layout.area);

    let title = format!(
        " Edit: {} ",
        truncate_str(&sanitize(&session.original.title), MODAL_WIDTH as usize - 12)
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title)
        .title_bottom(Line::from(" Enter save · Esc close ").style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(block, layout.area);

    render_form(&session.form, true, frame, layout.fields);

    let button = Style::default().fg(Color::Black).add_modifier(Modifier::BOLD);
    frame.render_widget(
        Paragraph::new(Span::styled(SAVE_LABEL, button.bg(Color::Green))),
        layout.save,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(CLOSE_LABEL, button.bg(Color::Gray))),
        layout.close,
    );
}
