use crate::api::MovieBackend;
use crate::error::CatalogError;
use crate::filter::{SearchFields, filter_indices};
use crate::form::MovieForm;
use crate::movie::{Movie, MovieId};
use crate::requests::{Outcome, Requests};
use chrono::{DateTime, Local};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{error, info, warn};

/// Where typed characters go when no overlay is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    AddForm,
}

/// An open edit modal. The record is copied when the modal opens so a
/// later refresh cannot change what is being edited.
#[derive(Debug, Clone)]
pub struct EditSession {
    pub original: Movie,
    pub form: MovieForm,
}

#[derive(Debug, Clone, Default)]
pub enum EditModal {
    #[default]
    Closed,
    Open(EditSession),
}

impl EditModal {
    pub fn is_open(&self) -> bool {
        matches!(self, EditModal::Open(_))
    }
}

/// A delete waiting for the user to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: MovieId,
    pub title: String,
}

/// Blocking message shown until any key is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub detail: Option<String>,
}

pub const LIST_OVERHEAD: u16 = 12;
/// Every list entry is two rows tall.
pub const CARD_HEIGHT: u16 = 2;

pub const FETCH_FAILED: &str = "Error fetching movies. Check the catalog server.";
pub const CREATE_FAILED: &str = "Failed to add movie.";
pub const UPDATE_FAILED: &str = "Failed to update movie.";
pub const DELETE_FAILED: &str = "Failed to delete movie.";
pub const EDIT_INVALID: &str = "Fill edit fields correctly";

/// Catalog view controller: owns the snapshot and all UI state.
pub struct App<B> {
    requests: Requests<B>,
    outcomes: UnboundedReceiver<Outcome>,
    in_flight: usize,

    pub should_quit: bool,
    pub show_help: bool,

    // Last successful fetch, never patched locally
    movies: Vec<Movie>,
    pub visible: Vec<usize>,
    pub selected: usize,
    pub page_size: usize,
    pub last_refresh: Option<DateTime<Local>>,

    pub query: String,
    pub search_fields: SearchFields,
    pub input_mode: InputMode,

    pub add_form: MovieForm,
    pub modal: EditModal,
    pub confirm: Option<PendingDelete>,
    pub notice: Option<Notice>,

    pub status_msg: String,
    // Shown ahead of the counts once the follow-up fetch lands
    last_mutation: Option<&'static str>,
}

impl<B: MovieBackend> App<B> {
    pub fn new(backend: B, search_fields: SearchFields) -> Self {
        let (requests, outcomes) = Requests::new(backend);
        Self {
            requests,
            outcomes,
            in_flight: 0,

            should_quit: false,
            show_help: false,

            movies: Vec::new(),
            visible: Vec::new(),
            selected: 0,
            page_size: 10,
            last_refresh: None,

            query: String::new(),
            search_fields,
            input_mode: InputMode::Normal,

            add_form: MovieForm::default(),
            modal: EditModal::Closed,
            confirm: None,
            notice: None,

            status_msg: "Loading movies...".to_string(),
            last_mutation: None,
        }
    }

    pub fn snapshot(&self) -> &[Movie] {
        &self.movies
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Records currently shown, in snapshot order.
    pub fn visible_movies(&self) -> Vec<&Movie> {
        self.visible.iter().map(|&i| &self.movies[i]).collect()
    }

    pub fn selected_movie(&self) -> Option<&Movie> {
        self.visible.get(self.selected).map(|&i| &self.movies[i])
    }

    // ── Requests ──

    /// Start a full re-fetch of the snapshot.
    pub fn refresh(&mut self) {
        self.in_flight += 1;
        self.requests.fetch();
    }

    /// Apply every outcome that has already arrived. Returns whether any did.
    pub fn drain_outcomes(&mut self) -> bool {
        let mut any = false;
        while let Ok(outcome) = self.outcomes.try_recv() {
            self.apply_outcome(outcome);
            any = true;
        }
        any
    }

    /// Wait until every spawned request has reported back.
    #[cfg(test)]
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.outcomes.recv().await {
                Some(outcome) => self.apply_outcome(outcome),
                None => break,
            }
        }
    }

    pub fn apply_outcome(&mut self, outcome: Outcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match outcome {
            Outcome::Fetched(Ok(movies)) => {
                info!(count = movies.len(), "snapshot replaced");
                let keep = self.selected_movie().map(|m| m.id.clone());
                self.movies = movies;
                self.last_refresh = Some(Local::now());
                self.refilter(keep);
                if let Some(done) = self.last_mutation.take() {
                    self.status_msg = format!("{}. {}", done, self.status_msg);
                }
            }
            Outcome::Fetched(Err(e)) => {
                self.last_mutation = None;
                self.fail(FETCH_FAILED, e);
            }
            Outcome::Created(Ok(())) => {
                info!("movie created");
                self.add_form.reset();
                if self.input_mode == InputMode::AddForm {
                    self.input_mode = InputMode::Normal;
                }
                self.last_mutation = Some("Movie added");
                self.status_msg = "Movie added".to_string();
                self.refresh();
            }
            Outcome::Created(Err(e)) => self.fail(CREATE_FAILED, e),
            Outcome::Updated { id, result: Ok(()) } => {
                info!(%id, "movie updated");
                if matches!(&self.modal, EditModal::Open(s) if s.original.id == id) {
                    self.modal = EditModal::Closed;
                }
                self.last_mutation = Some("Movie updated");
                self.status_msg = "Movie updated".to_string();
                self.refresh();
            }
            Outcome::Updated { id, result: Err(e) } => {
                warn!(%id, "update failed");
                self.fail(UPDATE_FAILED, e);
            }
            Outcome::Deleted { id, result: Ok(()) } => {
                info!(%id, "movie deleted");
                self.last_mutation = Some("Movie deleted");
                self.status_msg = "Movie deleted".to_string();
                self.refresh();
            }
            Outcome::Deleted { id, result: Err(e) } => {
                warn!(%id, "delete failed");
                self.fail(DELETE_FAILED, e);
            }
        }
    }

    /// Log `err` and raise a notice. State is left as it was.
    fn fail(&mut self, message: &str, err: CatalogError) {
        error!(error = %err, "{}", message);
        self.notice = Some(Notice {
            message: message.to_string(),
            detail: if err.is_local() { None } else { Some(err.user_message()) },
        });
        self.status_msg = message.to_string();
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // ── Search ──

    /// Recompute the visible subset from the snapshot and the query.
    pub fn apply_filter(&mut self) {
        let keep = self.selected_movie().map(|m| m.id.clone());
        self.refilter(keep);
    }

    /// `visible` must not be read between replacing the snapshot and this call.
    fn refilter(&mut self, keep: Option<MovieId>) {
        self.visible = filter_indices(&self.query, &self.movies, self.search_fields);

        self.selected = keep
            .and_then(|id| self.visible.iter().position(|&i| self.movies[i].id == id))
            .unwrap_or(0);

        self.status_msg = format!(
            "{} of {} movies shown for \"{}\"",
            self.visible.len(),
            self.movies.len(),
            if self.query.trim().is_empty() { "all" } else { self.query.trim() }
        );
    }

    pub fn push_query(&mut self, c: char) {
        self.query.push(c);
        self.apply_filter();
    }

    pub fn pop_query(&mut self) {
        self.query.pop();
        self.apply_filter();
    }

    pub fn clear_query(&mut self) {
        if !self.query.is_empty() {
            self.query.clear();
            self.apply_filter();
        }
    }

    // ── Navigation ──

    /// Update page size based on terminal height.
    pub fn update_page_size(&mut self, terminal_height: u16) {
        let rows = terminal_height.saturating_sub(LIST_OVERHEAD) / CARD_HEIGHT;
        self.page_size = (rows as usize).max(1);
    }

    pub fn list_next(&mut self) {
        if self.selected + 1 < self.visible.len() {
            self.selected += 1;
        }
    }

    pub fn list_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn list_page_down(&mut self) {
        let last = self.visible.len().saturating_sub(1);
        self.selected = (self.selected + self.page_size).min(last);
    }

    pub fn list_page_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.page_size);
    }

    pub fn list_first(&mut self) {
        self.selected = 0;
    }

    pub fn list_last(&mut self) {
        self.selected = self.visible.len().saturating_sub(1);
    }

    // ── Create ──

    /// Validate the add form and send it. Invalid input never reaches the backend.
    pub fn submit_add_form(&mut self) {
        match self.add_form.draft() {
            Ok(draft) => {
                info!(title = draft.title(), "creating movie");
                self.in_flight += 1;
                self.requests.create(draft);
                self.status_msg = "Adding movie...".to_string();
            }
            Err(e) => self.fail(&e.user_message(), e),
        }
    }

    // ── Edit ──

    /// Open the edit modal for `id` if it is in the snapshot.
    pub fn open_edit(&mut self, id: &MovieId) {
        match self.movies.iter().find(|m| &m.id == id) {
            Some(movie) => {
                self.modal = EditModal::Open(EditSession {
                    form: MovieForm::prefilled(movie),
                    original: movie.clone(),
                });
            }
            None => {
                let err = CatalogError::NotFound(id.clone());
                self.fail(&err.user_message(), err);
            }
        }
    }

    pub fn open_edit_selected(&mut self) {
        if let Some(id) = self.selected_movie().map(|m| m.id.clone()) {
            self.open_edit(&id);
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = EditModal::Closed;
    }

    /// Validate the modal and send the replacement record. The modal stays
    /// open until the update outcome arrives.
    pub fn save_edit(&mut self) {
        let EditModal::Open(session) = &self.modal else {
            return;
        };
        match session.form.draft() {
            Ok(draft) => {
                let id = session.original.id.clone();
                info!(%id, "updating movie");
                self.in_flight += 1;
                self.requests.update(id, draft);
                self.status_msg = "Saving...".to_string();
            }
            Err(e) => self.fail(EDIT_INVALID, e),
        }
    }

    // ── Delete ──

    /// Ask for confirmation before deleting the selected record.
    pub fn request_delete_selected(&mut self) {
        let pending = self.selected_movie().map(|movie| PendingDelete {
            id: movie.id.clone(),
            title: movie.title.clone(),
        });
        if pending.is_some() {
            self.confirm = pending;
        }
    }

    /// Resolve the pending confirmation; only `true` sends the delete.
    pub fn resolve_delete(&mut self, confirmed: bool) {
        let Some(pending) = self.confirm.take() else {
            return;
        };
        if confirmed {
            info!(id = %pending.id, "deleting movie");
            self.in_flight += 1;
            self.requests.delete(pending.id);
            self.status_msg = "Deleting...".to_string();
        } else {
            self.status_msg = "Delete cancelled".to_string();
        }
    }
}
