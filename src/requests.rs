use crate::api::MovieBackend;
use crate::error::CatalogError;
use crate::movie::{Movie, MovieDraft, MovieId};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// Completed backend calls, sent from request tasks to the UI loop.
#[derive(Debug)]
pub enum Outcome {
    Fetched(Result<Vec<Movie>, CatalogError>),
    Created(Result<(), CatalogError>),
    Updated {
        id: MovieId,
        result: Result<(), CatalogError>,
    },
    Deleted {
        id: MovieId,
        result: Result<(), CatalogError>,
    },
}

/// Spawns backend calls as tasks. Calls are neither cancellable nor
/// serialized; outcomes arrive in completion order.
pub struct Requests<B> {
    backend: B,
    outcome_tx: UnboundedSender<Outcome>,
}

impl<B: MovieBackend> Requests<B> {
    /// Create the spawner together with the receiving end for the UI loop.
    pub fn new(backend: B) -> (Self, UnboundedReceiver<Outcome>) {
        let (outcome_tx, outcome_rx) = unbounded_channel();
        (Self { backend, outcome_tx }, outcome_rx)
    }

    fn spawn<F>(&self, call: impl FnOnce(B) -> F + Send + 'static)
    where
        F: std::future::Future<Output = Outcome> + Send + 'static,
    {
        let backend = self.backend.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = call(backend).await;
            // Receiver only goes away on shutdown.
            let _ = tx.send(outcome);
        });
    }

    pub fn fetch(&self) {
        self.spawn(|backend| async move { Outcome::Fetched(backend.list().await) });
    }

    pub fn create(&self, draft: MovieDraft) {
        self.spawn(|backend| async move { Outcome::Created(backend.create(&draft).await) });
    }

    pub fn update(&self, id: MovieId, draft: MovieDraft) {
        self.spawn(|backend| async move {
            let result = backend.update(&id, &draft).await;
            Outcome::Updated { id, result }
        });
    }

    pub fn delete(&self, id: MovieId) {
        self.spawn(|backend| async move {
            let result = backend.delete(&id).await;
            Outcome::Deleted { id, result }
        });
    }
}
