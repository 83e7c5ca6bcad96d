use super::{centered_fixed, sanitize};
use crate::app::Notice;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub fn render(notice: &Notice, frame: &mut Frame) {
    let area = centered_fixed(56, 8, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Notice ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title_bottom(Line::from(" Press any key ").style(Style::default().fg(Color::DarkGray)));

    let mut text = vec![Line::from(""), Line::from(notice.message.as_str())];
    if let Some(detail) = &notice.detail {
        text.push(Line::from(""));
        text.push(Line::styled(sanitize(detail), Style::default().fg(Color::DarkGray)));
    }

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
