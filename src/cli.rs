use crate::api::MovieBackend;
use crate::error::CatalogError;
use crate::filter::{SearchFields, filter_movies};
use crate::movie::{Movie, MovieDraft, MovieId};
use crate::ui::sanitize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{BufRead, Write};
use std::time::Duration;
use tracing::info;

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// One line per record: id, title, year, genre.
pub fn format_movie(movie: &Movie) -> String {
    format!(
        "{:>6}  {} ({})  {}",
        movie.id.to_string(),
        sanitize(&movie.title),
        movie.year,
        sanitize(&movie.genre)
    )
}

pub async fn list<B: MovieBackend>(
    backend: &B,
    query: Option<&str>,
    fields: SearchFields,
    out: &mut impl Write,
) -> Result<(), CatalogError> {
    let pb = spinner("Fetching movies...");
    let result = backend.list().await;
    pb.finish_and_clear();
    let movies = result?;

    let shown = filter_movies(query.unwrap_or(""), &movies, fields);
    if shown.is_empty() {
        writeln!(out, "No movies found.")?;
    }
    for movie in &shown {
        writeln!(out, "{}", format_movie(movie))?;
    }
    info!(total = movies.len(), shown = shown.len(), "listed movies");
    Ok(())
}

pub async fn add<B: MovieBackend>(
    backend: &B,
    title: &str,
    genre: &str,
    year: &str,
) -> Result<(), CatalogError> {
    let draft = MovieDraft::parse(title, genre, year)?;
    let pb = spinner("Adding movie...");
    let result = backend.create(&draft).await;
    pb.finish_and_clear();
    result?;
    info!(title = draft.title(), "movie created");
    eprintln!("Added {} ({}).", draft.title(), draft.year());
    Ok(())
}

pub async fn update<B: MovieBackend>(
    backend: &B,
    id: &MovieId,
    title: &str,
    genre: &str,
    year: &str,
) -> Result<(), CatalogError> {
    let draft = MovieDraft::parse(title, genre, year)?;
    let pb = spinner("Saving movie...");
    let result = backend.update(id, &draft).await;
    pb.finish_and_clear();
    result?;
    info!(%id, "movie updated");
    eprintln!("Updated movie {}.", id);
    Ok(())
}

/// Delete after confirmation. The record is looked up first so the prompt
/// can name it; an unknown id is reported without sending a delete.
///
/// Ids are matched on their wire form, so `1` finds a record the server
/// stores as `"1"`. The delete then uses the id exactly as the server sent it.
pub async fn delete<B: MovieBackend>(
    backend: &B,
    id: &MovieId,
    assume_yes: bool,
    input: &mut impl BufRead,
) -> Result<bool, CatalogError> {
    let pb = spinner("Looking up movie...");
    let result = backend.list().await;
    pb.finish_and_clear();
    let movies = result?;

    let wanted = id.to_string();
    let movie = movies
        .iter()
        .find(|m| m.id.to_string() == wanted)
        .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
    let id = &movie.id;

    if !assume_yes {
        eprint!("Delete \"{}\"? [y/N] ", sanitize(&movie.title));
        std::io::stderr().flush()?;
        if !confirm(input)? {
            eprintln!("Cancelled.");
            return Ok(false);
        }
    }

    backend.delete(id).await?;
    info!(%id, "movie deleted");
    eprintln!("Deleted movie {}.", id);
    Ok(true)
}

/// Read one answer line; only `y` or `yes` (any case) confirms.
pub fn confirm(input: &mut impl BufRead) -> std::io::Result<bool> {
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, RecordingBackend, movie};

    fn backend() -> RecordingBackend {
        RecordingBackend::with_movies(vec![
            movie(1, "Dune", "Sci-Fi", 1984),
            movie(2, "Heat", "Crime", 1995),
        ])
    }

    #[test]
    fn test_confirm_answers() {
        assert!(confirm(&mut "y\n".as_bytes()).unwrap());
        assert!(confirm(&mut " YES \n".as_bytes()).unwrap());
        assert!(!confirm(&mut "\n".as_bytes()).unwrap());
        assert!(!confirm(&mut "nope\n".as_bytes()).unwrap());
        assert!(!confirm(&mut "".as_bytes()).unwrap());
    }

    #[test]
    fn test_format_movie() {
        let line = format_movie(&movie(7, "<b>X</b>", "Noir", 1950));
        assert_eq!(line, "     7  <b>X</b> (1950)  Noir");
    }

    #[tokio::test]
    async fn test_list_filters() {
        let backend = backend();
        let mut out = Vec::new();
        list(&backend, Some("heat"), SearchFields::default(), &mut out)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Heat (1995)"));
        assert!(!text.contains("Dune"));
    }

    #[tokio::test]
    async fn test_list_empty_prints_placeholder() {
        let backend = RecordingBackend::default();
        let mut out = Vec::new();
        list(&backend, None, SearchFields::default(), &mut out).await.unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No movies found.\n");
    }

    #[tokio::test]
    async fn test_add_invalid_sends_nothing() {
        let backend = backend();
        let err = add(&backend, "Ronin", "", "1998").await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_delete_declined_sends_nothing() {
        let backend = backend();
        let deleted = delete(&backend, &MovieId::Number(1), false, &mut "n\n".as_bytes())
            .await
            .unwrap();
        assert!(!deleted);
        assert_eq!(backend.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn test_delete_confirmed() {
        let backend = backend();
        let deleted = delete(&backend, &MovieId::Number(2), false, &mut "y\n".as_bytes())
            .await
            .unwrap();
        assert!(deleted);
        assert_eq!(
            backend.calls(),
            vec![Call::List, Call::Delete(MovieId::Number(2))]
        );
    }

    #[tokio::test]
    async fn test_delete_matches_text_id_from_numeric_input() {
        let backend = RecordingBackend::with_movies(vec![Movie {
            id: MovieId::Text("1".to_string()),
            title: "Dune".to_string(),
            genre: "Sci-Fi".to_string(),
            year: 1984,
        }]);
        let cli_id: MovieId = "1".parse().unwrap();
        assert_eq!(cli_id, MovieId::Number(1));

        let deleted = delete(&backend, &cli_id, true, &mut "".as_bytes())
            .await
            .unwrap();
        assert!(deleted);
        assert_eq!(
            backend.calls(),
            vec![Call::List, Call::Delete(MovieId::Text("1".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let backend = backend();
        let err = delete(&backend, &MovieId::Number(9), true, &mut "".as_bytes())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
        assert_eq!(backend.calls(), vec![Call::List]);
    }
}
