//! Server crate for the movies REST API.
//!
//! Wires the in-memory `MovieStore` and the `MovieSchema` validator into
//! an axum router guarded by an origin allowlist.

pub mod config;
pub mod cors;
pub mod error;
pub mod routes;

pub use config::ServerConfig;
pub use cors::OriginPolicy;
pub use error::ApiError;
pub use routes::{AppState, router};

use data_loader::MovieStore;
use schema::MovieSchema;

/// Build the application from its parts
pub fn app(store: MovieStore, schema: MovieSchema, policy: OriginPolicy) -> axum::Router {
    router(AppState::new(store, schema), policy)
}
