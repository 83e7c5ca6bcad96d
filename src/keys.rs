use crate::api::MovieBackend;
use crate::app::{App, EditModal, InputMode};
use crate::form::FormAction;
use crate::ui;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

pub fn handle_key<B: MovieBackend>(app: &mut App<B>, key: KeyEvent) {
    // Ctrl+C always quits
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // Notices block everything; any key dismisses
    if app.notice.is_some() {
        app.dismiss_notice();
        return;
    }

    if app.confirm.is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.resolve_delete(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.resolve_delete(false),
            _ => {}
        }
        return;
    }

    if app.show_help {
        app.show_help = false;
        return;
    }

    if let EditModal::Open(session) = &mut app.modal {
        match session.form.handle_key(key) {
            Some(FormAction::Submit) => app.save_edit(),
            Some(FormAction::Cancel) => app.close_modal(),
            None => {}
        }
        return;
    }

    match app.input_mode {
        InputMode::Search => handle_search_input(app, key),
        InputMode::AddForm => match app.add_form.handle_key(key) {
            Some(FormAction::Submit) => app.submit_add_form(),
            Some(FormAction::Cancel) => app.input_mode = InputMode::Normal,
            None => {}
        },
        InputMode::Normal => handle_list_key(app, key),
    }
}

fn handle_search_input<B: MovieBackend>(app: &mut App<B>, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => app.pop_query(),
        KeyCode::Char(c) => app.push_query(c),
        _ => {}
    }
}

fn handle_list_key<B: MovieBackend>(app: &mut App<B>, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('/') => {
            app.input_mode = InputMode::Search;
        }
        KeyCode::Char('a') => {
            app.input_mode = InputMode::AddForm;
        }
        KeyCode::Char('r') => {
            app.status_msg = "Refreshing...".to_string();
            app.refresh();
        }
        KeyCode::Down | KeyCode::Char('j') => app.list_next(),
        KeyCode::Up | KeyCode::Char('k') => app.list_prev(),
        KeyCode::PageDown => app.list_page_down(),
        KeyCode::PageUp => app.list_page_up(),
        KeyCode::Char('g') | KeyCode::Home => app.list_first(),
        KeyCode::Char('G') | KeyCode::End => app.list_last(),
        KeyCode::Enter | KeyCode::Char('e') => app.open_edit_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete_selected(),
        KeyCode::Esc => app.clear_query(),
        _ => {}
    }
}

/// Mouse support is limited to the edit modal: its buttons and the backdrop.
pub fn handle_mouse<B: MovieBackend>(app: &mut App<B>, mouse: MouseEvent, screen: Rect) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) || !app.modal.is_open() {
        return;
    }
    if app.notice.is_some() || app.confirm.is_some() {
        return;
    }

    let at = Position::new(mouse.column, mouse.row);
    let layout = ui::modal::ModalLayout::new(screen);
    if layout.save.contains(at) {
        app.save_edit();
    } else if layout.close.contains(at) || !layout.area.contains(at) {
        app.close_modal();
    }
}
