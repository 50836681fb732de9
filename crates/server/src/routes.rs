//! # Movie routes
//!
//! | Route                | Success                 | Failure      |
//! |----------------------|-------------------------|--------------|
//! | `GET /movies`        | 200 list (`?genre=`)    |              |
//! | `GET /movies/{id}`   | 200 movie               | 404          |
//! | `POST /movies`       | 201 created movie       | 400          |
//! | `PATCH /movies/{id}` | 200 merged movie        | 400, then 404 |
//! | `DELETE /movies/{id}`| 200 confirmation        | 404          |
//!
//! `/movies/` serves the same handlers as `/movies`.
//!
//! The store sits behind a tokio `RwLock`. Each handler takes the guard once
//! and holds it until its response is built, so one request's
//! read-modify-write never interleaves with another's.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router, middleware};
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use data_loader::{Movie, MovieStore};
use schema::{IssueKind, MovieSchema, ValidationError};

use crate::cors::{OriginPolicy, origin_gate};
use crate::error::{ApiError, MessageBody};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<MovieStore>>,
    pub schema: MovieSchema,
}

impl AppState {
    pub fn new(store: MovieStore, schema: MovieSchema) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            schema,
        }
    }
}

/// Build the full application: routes, CORS gate and request tracing
pub fn router(state: AppState, policy: OriginPolicy) -> Router {
    let cors = policy.cors_layer();
    let policy = Arc::new(policy);

    // Last layer added runs first: trace, then the gate, then CORS headers
    Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/", get(list_movies).post(create_movie))
        .route(
            "/movies/{id}",
            get(get_movie).patch(update_movie).delete(delete_movie),
        )
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn_with_state(policy, origin_gate))
        .layer(TraceLayer::new_for_http())
}

/// `GET /movies` - an empty `?genre=` behaves like no filter, and only the
/// first `genre` counts when it is repeated
async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<Vec<Movie>> {
    let genre = first_param(&params, "genre").filter(|g| !g.is_empty());
    let store = state.store.read().await;
    let movies: Vec<Movie> = store.list(genre).into_iter().cloned().collect();
    debug!("Listing {} movies (genre filter: {:?})", movies.len(), genre);
    Json(movies)
}

async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    let store = state.store.read().await;
    match store.get(&id) {
        Some(movie) => Ok(Json(movie.clone())),
        None => {
            debug!("Movie {} not found", id);
            Err(ApiError::NotFound)
        }
    }
}

async fn create_movie(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let candidate = parse_body(&body)?;
    let input = state.schema.validate_movie(&candidate)?;

    let mut store = state.store.write().await;
    let movie = store.insert(input).clone();
    info!("Created movie {} ({:?})", movie.id, movie.title);

    Ok((StatusCode::CREATED, Json(movie)))
}

/// `PATCH /movies/{id}` - the body is validated before the id is looked up
async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Movie>, ApiError> {
    let candidate = parse_body(&body)?;
    let patch = state.schema.validate_partial_movie(&candidate)?;

    let mut store = state.store.write().await;
    let movie = store
        .update_by_id(&id, patch)
        .cloned()
        .ok_or(ApiError::NotFound)?;
    info!("Updated movie {}", id);

    Ok(Json(movie))
}

async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    let mut store = state.store.write().await;
    if !store.remove_by_id(&id) {
        debug!("Movie {} not found", id);
        return Err(ApiError::NotFound);
    }
    info!("Deleted movie {} ({} remaining)", id, store.len());

    Ok(Json(MessageBody {
        message: "Movie Deleted",
    }))
}

fn first_param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Bodies are read leniently: no `Content-Type` needed, empty means `{}`
fn parse_body(body: &[u8]) -> Result<Value, ValidationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|e| {
        ValidationError::root(
            IssueKind::InvalidFormat,
            format!("Malformed JSON body: {e}"),
        )
    })
}
