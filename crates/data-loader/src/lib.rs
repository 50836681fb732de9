//! # Data Loader Crate
//!
//! Domain types for the movies API, the seed dataset parser, and the
//! in-memory store the HTTP layer reads and mutates.
//!
//! ## Main Components
//!
//! - **types**: `Movie`, `MovieInput`, `MoviePatch`, `Genre`
//! - **parser**: read the JSON seed dataset
//! - **store**: `MovieStore`, the ordered in-memory collection
//! - **error**: error types for loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::MovieStore;
//! use std::path::Path;
//!
//! let store = MovieStore::load_from_file(Path::new("data/movies.json"))?;
//! let dramas = store.list(Some("drama"));
//! println!("{} dramas out of {}", dramas.len(), store.len());
//! ```

// Public modules
pub mod error;
pub mod parser;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use store::MovieStore;
pub use types::{Genre, Movie, MovieId, MovieInput, MoviePatch};
