use crate::movie::Movie;

/// Which fields a search query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchFields {
    pub year: bool,
}

impl Default for SearchFields {
    fn default() -> Self {
        Self { year: true }
    }
}

/// Indices into `movies` of every record matching `query`, in snapshot order.
///
/// The query is trimmed and compared case-insensitively as a substring of
/// the title and genre, and of the year when `fields.year` is set. An empty
/// query matches everything.
pub fn filter_indices(query: &str, movies: &[Movie], fields: SearchFields) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return (0..movies.len()).collect();
    }

    movies
        .iter()
        .enumerate()
        .filter(|(_, movie)| matches(movie, &needle, fields))
        .map(|(i, _)| i)
        .collect()
}

/// Convenience wrapper returning the matching records themselves.
pub fn filter_movies<'a>(query: &str, movies: &'a [Movie], fields: SearchFields) -> Vec<&'a Movie> {
    filter_indices(query, movies, fields)
        .into_iter()
        .map(|i| &movies[i])
        .collect()
}

fn matches(movie: &Movie, needle: &str, fields: SearchFields) -> bool {
    movie.title.to_lowercase().contains(needle)
        || movie.genre.to_lowercase().contains(needle)
        || (fields.year && movie.year.to_string().contains(needle))
}
