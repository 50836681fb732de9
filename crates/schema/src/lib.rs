//! Request validation for the movies API.
//!
//! This crate provides:
//! - `MovieSchema` with full (create) and partial (update) validation
//! - `ValidationError`, a field-indexed list of issues for the client
//!
//! ## Example Usage
//! ```ignore
//! use schema::MovieSchema;
//!
//! let schema = MovieSchema::default();
//! match schema.validate_movie(&body) {
//!     Ok(input) => store.insert(input),
//!     Err(err) => return bad_request(err),
//! }
//! ```

pub mod error;
pub mod validator;

// Re-export main types
pub use error::{FieldIssue, IssueKind, ValidationError};
pub use validator::{DEFAULT_RATE, MIN_YEAR, MovieSchema};
