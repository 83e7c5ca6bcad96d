use crate::error::CatalogError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Backend-assigned identifier. Stored exactly as the server sent it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovieId {
    Number(i64),
    Text(String),
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovieId::Number(n) => write!(f, "{}", n),
            MovieId::Text(s) => f.write_str(s),
        }
    }
}

/// Integers become numeric ids, anything else is kept as text.
impl FromStr for MovieId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<i64>() {
            Ok(n) => MovieId::Number(n),
            Err(_) => MovieId::Text(s.trim().to_string()),
        })
    }
}

/// A single record as returned by `GET /movies`.
///
/// One malformed field must not cost the whole snapshot: `null` or
/// mistyped values fall back to an empty string or year 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub genre: String,
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: i64,
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "true".to_string(),
        _ => String::new(),
    })
}

fn lenient_year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0),
        Value::String(s) => parse_leading_int(&s).unwrap_or(0),
        _ => 0,
    })
}

/// Request body for create and update. Only obtainable through [`MovieDraft::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieDraft {
    title: String,
    genre: String,
    year: i64,
}

pub const ADD_FORM_INVALID: &str = "Fill all fields correctly (Year must be number)";

impl MovieDraft {
    /// Validate raw form input. Title and genre are trimmed and must be
    /// non-empty; the year must start with an integer.
    pub fn parse(title: &str, genre: &str, year: &str) -> Result<Self, CatalogError> {
        let title = title.trim();
        let genre = genre.trim();
        let year = parse_leading_int(year);

        match year {
            Some(year) if !title.is_empty() && !genre.is_empty() => Ok(MovieDraft {
                title: title.to_string(),
                genre: genre.to_string(),
                year,
            }),
            _ => Err(CatalogError::Validation(ADD_FORM_INVALID.to_string())),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn year(&self) -> i64 {
        self.year
    }
}

/// Parse the integer prefix of `s`: leading whitespace, an optional sign,
/// then at least one decimal digit. Anything after the digits is ignored.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_end = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    let value: i64 = rest[..digits_end].parse().ok()?;
    Some(if negative { -value } else { value })
}
