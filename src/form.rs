use crate::error::CatalogError;
use crate::movie::{Movie, MovieDraft};
use crossterm::event::{KeyCode, KeyEvent};

/// Input fields of a movie form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Genre,
    Year,
}

impl Field {
    pub const ALL: [Field; 3] = [Self::Title, Self::Genre, Self::Year];

    pub fn next(self) -> Self {
        match self {
            Self::Title => Self::Genre,
            Self::Genre => Self::Year,
            Self::Year => Self::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Title => Self::Year,
            Self::Genre => Self::Title,
            Self::Year => Self::Genre,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Genre => "Genre",
            Self::Year => "Year",
        }
    }
}

/// What a key press asks the owner of the form to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Submit,
    Cancel,
}

/// Text buffers behind the add form and the edit modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieForm {
    pub title: String,
    pub genre: String,
    pub year: String,
    pub focus: Field,
}

impl Default for MovieForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            genre: String::new(),
            year: String::new(),
            focus: Field::Title,
        }
    }
}

impl MovieForm {
    /// Form pre-filled from an existing record, focused on the title.
    pub fn prefilled(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            genre: movie.genre.clone(),
            year: movie.year.to_string(),
            focus: Field::Title,
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Genre => &self.genre,
            Field::Year => &self.year,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Title => &mut self.title,
            Field::Genre => &mut self.genre,
            Field::Year => &mut self.year,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate the current buffers.
    pub fn draft(&self) -> Result<MovieDraft, CatalogError> {
        MovieDraft::parse(&self.title, &self.genre, &self.year)
    }

    /// Handle keyboard input. Editing keys return `None`.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<FormAction> {
        match key.code {
            KeyCode::Enter => Some(FormAction::Submit),
            KeyCode::Esc => Some(FormAction::Cancel),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                None
            }
            KeyCode::Backspace => {
                self.focused_mut().pop();
                None
            }
            KeyCode::Char(c) => {
                self.focused_mut().push(c);
                None
            }
            _ => None,
        }
    }
}
