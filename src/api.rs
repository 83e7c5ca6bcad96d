use crate::error::{CatalogError, Operation};
use crate::movie::{Movie, MovieDraft, MovieId};
use reqwest::{Client, Response, Url};
use std::future::Future;
use tracing::{debug, warn};

/// The `/movies` resource of the catalog server.
pub trait MovieBackend: Clone + Send + Sync + 'static {
    /// `GET /movies`
    fn list(&self) -> impl Future<Output = Result<Vec<Movie>, CatalogError>> + Send;

    /// `POST /movies`
    fn create(&self, draft: &MovieDraft) -> impl Future<Output = Result<(), CatalogError>> + Send;

    /// `PUT /movies/{id}`
    fn update(
        &self,
        id: &MovieId,
        draft: &MovieDraft,
    ) -> impl Future<Output = Result<(), CatalogError>> + Send;

    /// `DELETE /movies/{id}`
    fn delete(&self, id: &MovieId) -> impl Future<Output = Result<(), CatalogError>> + Send;
}

/// JSON-over-HTTP backend.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    movies_url: Url,
}

impl HttpBackend {
    /// `api_url` is the server root, e.g. `http://localhost:3000`.
    pub fn new(api_url: &str) -> Result<Self, CatalogError> {
        let mut movies_url = Url::parse(api_url)
            .map_err(|e| CatalogError::Config(format!("invalid api url {:?}: {}", api_url, e)))?;
        movies_url
            .path_segments_mut()
            .map_err(|_| CatalogError::Config(format!("api url {:?} cannot have a path", api_url)))?
            .pop_if_empty()
            .push("movies");

        Ok(Self {
            client: Client::new(),
            movies_url,
        })
    }

    pub fn movies_url(&self) -> &Url {
        &self.movies_url
    }

    fn movie_url(&self, id: &MovieId) -> Url {
        let mut url = self.movies_url.clone();
        // `new` already proved the base can carry path segments.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&id.to_string());
        }
        url
    }
}

fn check_status(response: Response, operation: Operation) -> Result<Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        warn!(operation = operation.label(), status = status.as_u16(), "backend rejected request");
        Err(CatalogError::Status {
            operation,
            status: status.as_u16(),
        })
    }
}

/// Decode a `GET /movies` body. Valid JSON that is not an array is an empty catalog.
pub fn decode_snapshot(body: &[u8]) -> Result<Vec<Movie>, CatalogError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if !value.is_array() {
        warn!("movie list response was not an array, treating as empty");
        return Ok(Vec::new());
    }
    Ok(serde_json::from_value(value)?)
}

impl MovieBackend for HttpBackend {
    async fn list(&self) -> Result<Vec<Movie>, CatalogError> {
        debug!(url = %self.movies_url, "GET");
        let response = self.client.get(self.movies_url.clone()).send().await?;
        let response = check_status(response, Operation::Fetch)?;
        let body = response.bytes().await?;
        decode_snapshot(&body)
    }

    async fn create(&self, draft: &MovieDraft) -> Result<(), CatalogError> {
        debug!(url = %self.movies_url, title = draft.title(), "POST");
        let response = self
            .client
            .post(self.movies_url.clone())
            .json(draft)
            .send()
            .await?;
        check_status(response, Operation::Create)?;
        Ok(())
    }

    async fn update(&self, id: &MovieId, draft: &MovieDraft) -> Result<(), CatalogError> {
        let url = self.movie_url(id);
        debug!(url = %url, "PUT");
        let response = self.client.put(url).json(draft).send().await?;
        check_status(response, Operation::Update)?;
        Ok(())
    }

    async fn delete(&self, id: &MovieId) -> Result<(), CatalogError> {
        let url = self.movie_url(id);
        debug!(url = %url, "DELETE");
        let response = self.client.delete(url).send().await?;
        check_status(response, Operation::Delete)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        extract::{Path, State},
        http::StatusCode,
        routing::{get, put},
    };
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Store {
        movies: Arc<Mutex<Vec<Value>>>,
        next_id: Arc<Mutex<i64>>,
    }

    async fn list(State(store): State<Store>) -> Json<Value> {
        Json(Value::Array(store.movies.lock().unwrap().clone()))
    }

    async fn create(State(store): State<Store>, Json(mut body): Json<Value>) -> (StatusCode, Json<Value>) {
        let mut next = store.next_id.lock().unwrap();
        *next += 1;
        body["id"] = json!(*next);
        store.movies.lock().unwrap().push(body.clone());
        (StatusCode::CREATED, Json(body))
    }

    async fn replace(
        State(store): State<Store>,
        Path(id): Path<i64>,
        Json(mut body): Json<Value>,
    ) -> StatusCode {
        let mut movies = store.movies.lock().unwrap();
        match movies.iter_mut().find(|m| m["id"] == json!(id)) {
            Some(slot) => {
                body["id"] = json!(id);
                *slot = body;
                StatusCode::OK
            }
            None => StatusCode::NOT_FOUND,
        }
    }

    async fn remove(State(store): State<Store>, Path(id): Path<i64>) -> StatusCode {
        let mut movies = store.movies.lock().unwrap();
        let before = movies.len();
        movies.retain(|m| m["id"] != json!(id));
        if movies.len() < before {
            StatusCode::OK
        } else {
            StatusCode::NOT_FOUND
        }
    }

    /// Bind to port 0 and return the server root.
    async fn start_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn start_catalog_server() -> String {
        let app = Router::new()
            .route("/movies", get(list).post(create))
            .route("/movies/:id", put(replace).delete(remove))
            .with_state(Store::default());
        start_server(app).await
    }

    #[test]
    fn test_movies_url_appends_resource() {
        let backend = HttpBackend::new("http://localhost:3000").unwrap();
        assert_eq!(backend.movies_url().as_str(), "http://localhost:3000/movies");

        let backend = HttpBackend::new("http://example.com/api/").unwrap();
        assert_eq!(backend.movies_url().as_str(), "http://example.com/api/movies");
    }

    #[test]
    fn test_movie_url_escapes_id() {
        let backend = HttpBackend::new("http://localhost:3000").unwrap();
        let url = backend.movie_url(&MovieId::Text("a/b".to_string()));
        assert_eq!(url.as_str(), "http://localhost:3000/movies/a%2Fb");
    }

    #[test]
    fn test_invalid_api_url() {
        assert!(matches!(HttpBackend::new("not a url"), Err(CatalogError::Config(_))));
    }

    #[test]
    fn test_decode_snapshot_non_array_is_empty() {
        assert!(decode_snapshot(br#"{"error":"nope"}"#).unwrap().is_empty());
        assert!(matches!(decode_snapshot(b"<html>"), Err(CatalogError::Decode(_))));
    }

    #[test]
    fn test_decode_snapshot_tolerates_null_and_mistyped_fields() {
        let body = br#"[
            {"id": 1, "title": null, "genre": "Sci-Fi", "year": 1984},
            {"id": 2, "title": "Heat", "genre": "Crime", "year": "1995"},
            {"id": "3", "title": "Alien", "genre": null, "year": null}
        ]"#;
        let movies = decode_snapshot(body).unwrap();
        assert_eq!(movies.len(), 3);
        assert_eq!(movies[0].title, "");
        assert_eq!(movies[0].year, 1984);
        assert_eq!(movies[1].year, 1995);
        assert_eq!(movies[2].genre, "");
        assert_eq!(movies[2].year, 0);
    }

    #[tokio::test]
    async fn test_crud_round_trip() {
        let base = start_catalog_server().await;
        let backend = HttpBackend::new(&base).unwrap();

        assert!(backend.list().await.unwrap().is_empty());

        let draft = MovieDraft::parse("Dune", "Sci-Fi", "1984").unwrap();
        backend.create(&draft).await.unwrap();
        let movies = backend.list().await.unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Dune");
        let id = movies[0].id.clone();

        let draft = MovieDraft::parse("Dune", "Sci-Fi", "2021").unwrap();
        backend.update(&id, &draft).await.unwrap();
        assert_eq!(backend.list().await.unwrap()[0].year, 2021);

        backend.delete(&id).await.unwrap();
        assert!(backend.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let base = start_catalog_server().await;
        let backend = HttpBackend::new(&base).unwrap();

        let err = backend.delete(&MovieId::Number(99)).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Status {
                operation: Operation::Delete,
                status: 404
            }
        ));
    }

    #[tokio::test]
    async fn test_server_error_on_fetch() {
        let app = Router::new().route("/movies", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
        let base = start_server(app).await;
        let backend = HttpBackend::new(&base).unwrap();

        let err = backend.list().await.unwrap_err();
        assert!(matches!(err, CatalogError::Status { operation: Operation::Fetch, status: 500 }));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = HttpBackend::new(&format!("http://{addr}")).unwrap();
        let err = backend.list().await.unwrap_err();
        assert!(matches!(err, CatalogError::Transport(_)));
    }
}
