use super::{sanitize, truncate_str};
use crate::api::MovieBackend;
use crate::app::{App, InputMode};
use crate::form::{Field, MovieForm};
use crate::movie::{Movie, MovieId};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

pub const EMPTY_PLACEHOLDER: &str = "No movies found.";

/// One rendered record. Actions on a card always use its own `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card<'a> {
    pub id: &'a MovieId,
    pub title: String,
    pub genre: String,
    pub year: i64,
}

/// What the movie list area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListContent<'a> {
    Placeholder,
    Cards(Vec<Card<'a>>),
}

/// Build the list content for exactly `movies`, discarding anything shown before.
pub fn list_content<'a>(movies: &[&'a Movie]) -> ListContent<'a> {
    if movies.is_empty() {
        return ListContent::Placeholder;
    }
    ListContent::Cards(
        movies
            .iter()
            .map(|m| Card {
                id: &m.id,
                title: sanitize(&m.title),
                genre: sanitize(&m.genre),
                year: m.year,
            })
            .collect(),
    )
}

pub fn render<B: MovieBackend>(app: &App<B>, frame: &mut Frame) {
    let area = frame.area();

    // Layout: header(3) + search(3) + list(min) + add form(5) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(area);

    let visible = app.visible_movies();

    // ── Header ──
    let refreshed = match app.last_refresh {
        Some(t) => format!("refreshed {}", t.format("%H:%M:%S")),
        None => "not loaded".to_string(),
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " Movie Catalog ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  [{} of {} movies]  {}",
                visible.len(),
                app.snapshot().len(),
                refreshed
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            if app.is_loading() { "  ⟳ loading" } else { "" },
            Style::default().fg(Color::Yellow),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, chunks[0]);

    // ── Search bar ──
    let searching = app.input_mode == InputMode::Search;
    let search_style = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let search_label = if searching {
        " Search (Enter/Esc to finish): "
    } else {
        " Search (/): "
    };
    let search_bar = Paragraph::new(format!("{}{}", search_label, app.query))
        .style(search_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(search_style)
                .title(" Search "),
        );
    frame.render_widget(search_bar, chunks[1]);

    if searching {
        let cursor_x = chunks[1].x + 1 + search_label.width() as u16 + app.query.width() as u16;
        frame.set_cursor_position((cursor_x, chunks[1].y + 1));
    }

    // ── Movie list ──
    render_cards(&list_content(&visible), app.selected, frame, chunks[2]);

    // ── Add form ──
    render_add_form(
        &app.add_form,
        app.input_mode == InputMode::AddForm,
        frame,
        chunks[3],
    );

    // ── Status bar ──
    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let status_line = Line::from(vec![
        Span::styled(" ↑↓", key_style),
        Span::raw(" Navigate  "),
        Span::styled("/", key_style),
        Span::raw(" Search  "),
        Span::styled("a", key_style),
        Span::raw(" Add  "),
        Span::styled("e", key_style),
        Span::raw(" Edit  "),
        Span::styled("d", key_style),
        Span::raw(" Delete  "),
        Span::styled("?", key_style),
        Span::raw(" Help  "),
        Span::styled("q", key_style),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), chunks[4]);
}

fn render_cards(content: &ListContent<'_>, selected: usize, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Movies ");

    let cards = match content {
        ListContent::Placeholder => {
            let placeholder = Paragraph::new(EMPTY_PLACEHOLDER)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(placeholder, area);
            return;
        }
        ListContent::Cards(cards) => cards,
    };

    let text_width = (area.width as usize).saturating_sub(16);
    let items: Vec<ListItem> = cards
        .iter()
        .map(|card| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        truncate_str(&card.title, text_width),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!(" ({})", card.year), Style::default().fg(Color::Yellow)),
                ]),
                Line::from(vec![
                    Span::styled(
                        truncate_str(&card.genre, text_width),
                        Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
                    ),
                    Span::styled(
                        format!("   #{}", sanitize(&card.id.to_string())),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled("   [e]dit [d]elete", Style::default().fg(Color::DarkGray)),
                ]),
            ])
        })
        .collect();

    let page_info = format!(" {} of {} ", selected + 1, cards.len());
    let list_widget = List::new(items)
        .block(block.title_bottom(Line::from(page_info).alignment(Alignment::Right)))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut list_state = ListState::default();
    list_state.select(Some(selected));
    frame.render_stateful_widget(list_widget, area, &mut list_state);
}

/// Render a three-field movie form. Shared by the add panel and the edit modal.
pub fn render_form(form: &MovieForm, focused: bool, frame: &mut Frame, rows: [Rect; 3]) {
    for (field, row) in Field::ALL.into_iter().zip(rows) {
        let active = focused && form.focus == field;
        let style = if active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let input = Paragraph::new(sanitize(form.value(field)))
            .style(Style::default().fg(Color::White))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(style)
                    .title(format!(" {} ", field.label())),
            );
        frame.render_widget(input, row);

        if active {
            let x = row.x + 1 + form.value(field).width() as u16;
            frame.set_cursor_position((x.min(row.right().saturating_sub(2)), row.y + 1));
        }
    }
}

fn render_add_form(form: &MovieForm, focused: bool, frame: &mut Frame, area: Rect) {
    let border = if focused { Color::Yellow } else { Color::DarkGray };
    let hint = if focused {
        " Add movie (Tab next field, Enter submit, Esc leave) "
    } else {
        " Add movie (a) "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(hint);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(35),
            Constraint::Percentage(20),
        ])
        .split(inner);
    render_form(form, focused, frame, [cols[0], cols[1], cols[2]]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::SearchFields;
    use crate::testing::{RecordingBackend, movie};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    async fn draw(movies: Vec<Movie>) -> String {
        let backend = RecordingBackend::with_movies(movies);
        let mut app = App::new(backend, SearchFields::default());
        app.refresh();
        app.settle().await;

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| crate::ui::render(&app, frame)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_empty_input_is_single_placeholder() {
        assert_eq!(list_content(&[]), ListContent::Placeholder);
    }

    #[test]
    fn test_cards_bound_to_own_ids_in_given_order() {
        let heat = movie(2, "Heat", "Crime", 1995);
        let dune = movie(1, "Dune", "Sci-Fi", 1984);
        let ListContent::Cards(cards) = list_content(&[&heat, &dune]) else {
            panic!("expected cards");
        };
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].id, &heat.id);
        assert_eq!(cards[0].title, "Heat");
        assert_eq!(cards[0].year, 1995);
        assert_eq!(cards[1].id, &dune.id);
        assert_eq!(cards[1].genre, "Sci-Fi");
    }

    #[tokio::test]
    async fn test_render_empty_snapshot_shows_placeholder() {
        let text = draw(Vec::new()).await;
        assert_eq!(text.matches(EMPTY_PLACEHOLDER).count(), 1);
        assert!(!text.contains("[e]dit"));
    }

    #[tokio::test]
    async fn test_render_cards_show_fields() {
        let text = draw(vec![
            movie(1, "Dune", "Sci-Fi", 1984),
            movie(2, "Heat", "Crime", 1995),
        ])
        .await;
        assert!(text.contains("Dune (1984)"));
        assert!(text.contains("Heat (1995)"));
        assert!(text.contains("Crime"));
        assert_eq!(text.matches("[e]dit [d]elete").count(), 2);
        assert!(!text.contains(EMPTY_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_markup_renders_literally() {
        let text = draw(vec![movie(1, "<b>X</b>", "<i>Noir</i>", 1950)]).await;
        assert!(text.contains("<b>X</b> (1950)"));
        assert!(text.contains("<i>Noir</i>"));
    }

    #[tokio::test]
    async fn test_escape_sequences_never_reach_terminal() {
        let text = draw(vec![movie(1, "\u{1b}[2JWiped", "Drama", 2001)]).await;
        assert!(!text.contains('\u{1b}'));
        assert!(text.contains("[2JWiped"));
    }
}
