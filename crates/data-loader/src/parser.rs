//! Parser for the seed dataset.
//!
//! The seed is a single JSON array of complete movie records:
//!
//! ```json
//! [{ "id": "...", "title": "...", "year": 1994, "director": "...",
//!    "duration": 142, "poster": "https://...", "genre": ["Drama"], "rate": 9.3 }]
//! ```
//!
//! Field typing is enforced by serde; the few invariants serde can't express
//! (non-empty genre list, rate range) are checked here.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Parse a seed file from disk
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_movies_str(&content, &file)
}

/// Parse seed content that is already in memory
///
/// `file` is only used to label errors.
pub fn parse_movies_str(content: &str, file: &str) -> Result<Vec<Movie>> {
    let movies: Vec<Movie> =
        serde_json::from_str(content).map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: e.line(),
            column: e.column(),
            reason: e.to_string(),
        })?;

    for movie in &movies {
        check_movie(movie)?;
    }

    Ok(movies)
}

fn check_movie(movie: &Movie) -> Result<()> {
    if movie.genre.is_empty() {
        return Err(DataLoadError::InvalidValue {
            id: movie.id.clone(),
            field: "genre".to_string(),
            reason: "at least one genre is required".to_string(),
        });
    }
    if !(0.0..=10.0).contains(&movie.rate) {
        return Err(DataLoadError::InvalidValue {
            id: movie.id.clone(),
            field: "rate".to_string(),
            reason: format!("{} is outside 0..=10", movie.rate),
        });
    }
    Ok(())
}
