//! In-memory backend used by the unit tests.

use crate::api::MovieBackend;
use crate::error::{CatalogError, Operation};
use crate::movie::{Movie, MovieDraft, MovieId};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(MovieDraft),
    Update(MovieId, MovieDraft),
    Delete(MovieId),
}

#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    calls: Arc<Mutex<Vec<Call>>>,
    movies: Arc<Mutex<Vec<Movie>>>,
    reject_with: Arc<Mutex<Option<u16>>>,
}

impl RecordingBackend {
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        let backend = Self::default();
        *backend.movies.lock().unwrap() = movies;
        backend
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_movies(&self, movies: Vec<Movie>) {
        *self.movies.lock().unwrap() = movies;
    }

    /// Make every subsequent call fail with `status`.
    pub fn reject_with(&self, status: u16) {
        *self.reject_with.lock().unwrap() = Some(status);
    }

    fn record(&self, call: Call, operation: Operation) -> Result<(), CatalogError> {
        self.calls.lock().unwrap().push(call);
        match *self.reject_with.lock().unwrap() {
            Some(status) => Err(CatalogError::Status { operation, status }),
            None => Ok(()),
        }
    }
}

impl MovieBackend for RecordingBackend {
    async fn list(&self) -> Result<Vec<Movie>, CatalogError> {
        self.record(Call::List, Operation::Fetch)?;
        Ok(self.movies.lock().unwrap().clone())
    }

    async fn create(&self, draft: &MovieDraft) -> Result<(), CatalogError> {
        self.record(Call::Create(draft.clone()), Operation::Create)?;
        let mut movies = self.movies.lock().unwrap();
        let id = movies.len() as i64 + 100;
        movies.push(Movie {
            id: MovieId::Number(id),
            title: draft.title().to_string(),
            genre: draft.genre().to_string(),
            year: draft.year(),
        });
        Ok(())
    }

    async fn update(&self, id: &MovieId, draft: &MovieDraft) -> Result<(), CatalogError> {
        self.record(Call::Update(id.clone(), draft.clone()), Operation::Update)?;
        let mut movies = self.movies.lock().unwrap();
        if let Some(movie) = movies.iter_mut().find(|m| &m.id == id) {
            movie.title = draft.title().to_string();
            movie.genre = draft.genre().to_string();
            movie.year = draft.year();
        }
        Ok(())
    }

    async fn delete(&self, id: &MovieId) -> Result<(), CatalogError> {
        self.record(Call::Delete(id.clone()), Operation::Delete)?;
        self.movies.lock().unwrap().retain(|m| &m.id != id);
        Ok(())
    }
}

pub fn movie(id: i64, title: &str, genre: &str, year: i64) -> Movie {
    Movie {
        id: MovieId::Number(id),
        title: title.to_string(),
        genre: genre.to_string(),
        year,
    }
}
