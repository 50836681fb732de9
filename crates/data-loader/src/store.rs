//! The in-memory movie store.
//!
//! Records live in a `Vec` in insertion order and every lookup is a linear
//! scan.
//!
//! `MovieStore` itself has no locking; the server wraps it in a `RwLock`.

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;

/// Ordered, process-lifetime collection of movies
#[derive(Debug, Clone, Default)]
pub struct MovieStore {
    movies: Vec<Movie>,
}

impl MovieStore {
    /// Creates a new, empty store
    pub fn new() -> Self {
        Self { movies: Vec::new() }
    }

    /// Build a store from already-identified records (the seed)
    ///
    /// Fails if two records share an identifier.
    pub fn from_movies(movies: Vec<Movie>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(movies.len());
        for movie in &movies {
            if !seen.insert(movie.id.as_str()) {
                return Err(DataLoadError::DuplicateId {
                    id: movie.id.clone(),
                });
            }
        }
        Ok(Self { movies })
    }

    /// Load the seed dataset from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading seed dataset from {:?}", path);
        let movies = parser::parse_movies(path)?;
        let store = Self::from_movies(movies)?;
        info!("Loaded {} movies", store.len());
        Ok(store)
    }

    /// All movies, or only those tagged with `genre` (case-insensitive)
    pub fn list(&self, genre: Option<&str>) -> Vec<&Movie> {
        match genre {
            Some(genre) => self
                .movies
                .iter()
                .filter(|movie| movie.has_genre(genre))
                .collect(),
            None => self.movies.iter().collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Movie> {
        self.movies.iter().find(|movie| movie.id == id)
    }

    /// Append a new movie under a freshly generated identifier
    pub fn insert(&mut self, input: MovieInput) -> &Movie {
        let id = self.fresh_id();
        debug!("Assigning id {} to {:?}", id, input.title);
        self.movies.push(Movie::from_input(id, input));
        &self.movies[self.movies.len() - 1]
    }

    /// Remove the first movie with this identifier; `false` if none matched
    pub fn remove_by_id(&mut self, id: &str) -> bool {
        match self.movies.iter().position(|movie| movie.id == id) {
            Some(index) => {
                self.movies.remove(index);
                true
            }
            None => false,
        }
    }

    /// Merge `patch` into the matching movie and return the result
    pub fn update_by_id(&mut self, id: &str, patch: MoviePatch) -> Option<&Movie> {
        let movie = self.movies.iter_mut().find(|movie| movie.id == id)?;
        movie.apply(patch);
        Some(&*movie)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    // Seeded ids are arbitrary strings; never hand out one already in use.
    fn fresh_id(&self) -> MovieId {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str, title: &str, genre: Vec<Genre>) -> Movie {
        Movie {
            id: id.to_string(),
            title: title.to_string(),
            year: 2010,
            director: "Someone".to_string(),
            duration: 120,
            poster: "https://example.com/poster.jpg".to_string(),
            genre,
            rate: 7.5,
        }
    }

    fn input(title: &str) -> MovieInput {
        MovieInput {
            title: title.to_string(),
            year: 2020,
            director: "Y".to_string(),
            duration: 100,
            poster: "http://example.com/x.jpg".to_string(),
            genre: vec![Genre::Drama],
            rate: 8.0,
        }
    }

    fn create_test_store() -> MovieStore {
        MovieStore::from_movies(vec![
            movie("1", "Inception", vec![Genre::Action, Genre::SciFi]),
            movie("2", "The Shawshank Redemption", vec![Genre::Drama]),
            movie("3", "Die Hard", vec![Genre::Action, Genre::Thriller]),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_store() {
        let store = MovieStore::new();
        assert!(store.is_empty());
        assert!(store.list(None).is_empty());
        assert!(store.get("1").is_none());
    }

    #[test]
    fn test_duplicate_seed_ids_rejected() {
        let err = MovieStore::from_movies(vec![
            movie("1", "A", vec![Genre::Drama]),
            movie("1", "B", vec![Genre::Drama]),
        ])
        .unwrap_err();
        assert!(matches!(err, DataLoadError::DuplicateId { id } if id == "1"));
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let store = create_test_store();
        let ids: Vec<&str> = store.list(None).iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_genre_filter_is_case_insensitive() {
        let store = create_test_store();

        let action: Vec<&str> = store
            .list(Some("action"))
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(action, vec!["1", "3"]);

        assert_eq!(store.list(Some("DRAMA")).len(), 1);
        assert!(store.list(Some("western")).is_empty());
    }

    #[test]
    fn test_get_exact_match() {
        let store = create_test_store();
        assert_eq!(store.get("1").unwrap().title, "Inception");
        assert!(store.get("999").is_none());
        assert!(store.get("").is_none());
    }

    #[test]
    fn test_insert_assigns_fresh_id() {
        let mut store = create_test_store();
        let first = store.insert(input("X")).id.clone();
        let second = store.insert(input("X")).id.clone();

        assert_ne!(first, second);
        assert!(Uuid::parse_str(&first).is_ok());
        assert_eq!(store.len(), 5);
        assert_eq!(store.list(None).last().unwrap().id, second);
    }

    #[test]
    fn test_remove_is_not_repeatable() {
        let mut store = create_test_store();
        assert!(store.remove_by_id("2"));
        assert!(!store.remove_by_id("2"));
        assert_eq!(store.len(), 2);
        assert!(store.get("2").is_none());
    }

    #[test]
    fn test_update_merges_fields() {
        let mut store = create_test_store();
        let updated = store
            .update_by_id(
                "1",
                MoviePatch {
                    title: Some("Inception (Director's Cut)".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, "1");
        assert_eq!(updated.title, "Inception (Director's Cut)");
        assert_eq!(updated.genre, vec![Genre::Action, Genre::SciFi]);
        assert_eq!(store.get("1").unwrap().title, "Inception (Director's Cut)");
    }

    #[test]
    fn test_update_missing_id() {
        let mut store = create_test_store();
        assert!(store.update_by_id("999", MoviePatch::default()).is_none());
    }
}
