//! Core domain types for the movie catalogue.
//!
//! `Movie` is the stored record. `MovieInput` is a complete record without
//! an identifier (what a create request normalizes to) and `MoviePatch` is
//! the sparse form used by partial updates.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Opaque movie identifier. Server-generated UUID v4 for new records,
/// whatever the seed file says for seeded ones.
pub type MovieId = String;

// =============================================================================
// Movie-related Types
// =============================================================================

/// A movie record as held in the store and returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year: u16,
    pub director: String,
    /// Running time in minutes
    pub duration: u32,
    pub poster: String,
    pub genre: Vec<Genre>,
    /// Score between 0 and 10
    pub rate: f64,
}

/// A complete, validated movie without an identifier
#[derive(Debug, Clone, PartialEq)]
pub struct MovieInput {
    pub title: String,
    pub year: u16,
    pub director: String,
    pub duration: u32,
    pub poster: String,
    pub genre: Vec<Genre>,
    pub rate: f64,
}

/// Validated fields for a partial update. `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub year: Option<u16>,
    pub director: Option<String>,
    pub duration: Option<u32>,
    pub poster: Option<String>,
    pub genre: Option<Vec<Genre>>,
    pub rate: Option<f64>,
}

impl Movie {
    /// Attach an identifier to a validated input
    pub fn from_input(id: MovieId, input: MovieInput) -> Self {
        Self {
            id,
            title: input.title,
            year: input.year,
            director: input.director,
            duration: input.duration,
            poster: input.poster,
            genre: input.genre,
            rate: input.rate,
        }
    }

    /// Shallow-merge a patch over this record. The identifier never changes.
    pub fn apply(&mut self, patch: MoviePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(director) = patch.director {
            self.director = director;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(poster) = patch.poster {
            self.poster = poster;
        }
        if let Some(genre) = patch.genre {
            self.genre = genre;
        }
        if let Some(rate) = patch.rate {
            self.rate = rate;
        }
    }

    /// Case-insensitive genre match, used by the `?genre=` filter
    pub fn has_genre(&self, name: &str) -> bool {
        self.genre
            .iter()
            .any(|g| g.as_str().eq_ignore_ascii_case(name))
    }
}

impl MoviePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Genre vocabulary accepted by the API
///
/// Tags are matched case-sensitively on write. Extending the vocabulary is
/// a matter of adding a variant here and a row in `Genre::ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Animation,
    Biography,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Fantasy,
    Horror,
    Musical,
    Mystery,
    Romance,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Thriller,
    War,
    Western,
}

impl Genre {
    pub const ALL: [Genre; 17] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Animation,
        Genre::Biography,
        Genre::Comedy,
        Genre::Crime,
        Genre::Documentary,
        Genre::Drama,
        Genre::Fantasy,
        Genre::Horror,
        Genre::Musical,
        Genre::Mystery,
        Genre::Romance,
        Genre::SciFi,
        Genre::Thriller,
        Genre::War,
        Genre::Western,
    ];

    /// The tag as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
            Genre::Biography => "Biography",
            Genre::Comedy => "Comedy",
            Genre::Crime => "Crime",
            Genre::Documentary => "Documentary",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::Horror => "Horror",
            Genre::Musical => "Musical",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::SciFi => "Sci-Fi",
            Genre::Thriller => "Thriller",
            Genre::War => "War",
            Genre::Western => "Western",
        }
    }

    /// Exact tag lookup; `"drama"` is not a genre, `"Drama"` is
    pub fn from_tag(tag: &str) -> Option<Genre> {
        Self::ALL.into_iter().find(|g| g.as_str() == tag)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inception() -> Movie {
        Movie {
            id: "1".to_string(),
            title: "Inception".to_string(),
            year: 2010,
            director: "Christopher Nolan".to_string(),
            duration: 148,
            poster: "https://example.com/inception.jpg".to_string(),
            genre: vec![Genre::Action, Genre::SciFi],
            rate: 8.8,
        }
    }

    #[test]
    fn test_genre_tags_round_trip_through_from_tag() {
        for genre in Genre::ALL {
            assert_eq!(Genre::from_tag(genre.as_str()), Some(genre));
        }
        assert_eq!(Genre::from_tag("drama"), None);
        assert_eq!(Genre::from_tag("Sci-Fi"), Some(Genre::SciFi));
    }

    #[test]
    fn test_genre_serializes_as_tag() {
        let json = serde_json::to_string(&vec![Genre::SciFi, Genre::Drama]).unwrap();
        assert_eq!(json, r#"["Sci-Fi","Drama"]"#);
    }

    #[test]
    fn test_has_genre_ignores_case() {
        let movie = inception();
        assert!(movie.has_genre("action"));
        assert!(movie.has_genre("SCI-FI"));
        assert!(!movie.has_genre("drama"));
    }

    #[test]
    fn test_apply_patch_keeps_unspecified_fields() {
        let mut movie = inception();
        movie.apply(MoviePatch {
            year: Some(2011),
            rate: Some(9.0),
            ..Default::default()
        });

        assert_eq!(movie.id, "1");
        assert_eq!(movie.year, 2011);
        assert_eq!(movie.rate, 9.0);
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.genre, vec![Genre::Action, Genre::SciFi]);
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut movie = inception();
        let patch = MoviePatch::default();
        assert!(patch.is_empty());
        movie.apply(patch);
        assert_eq!(movie, inception());
    }
}
