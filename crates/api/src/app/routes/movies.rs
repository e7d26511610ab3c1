use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use movies_catalog::{validate_full, validate_partial, Movie, MovieRepository};
use movies_core::{MovieError, MovieId, MovieResult};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn list_movies(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::ListMoviesQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::invalid_query(rejection),
    };
    let movies = match query.genre() {
        Some(genre) => services.movies.filter_by_genre(genre),
        None => services.movies.list(),
    };
    (StatusCode::OK, Json(movies)).into_response()
}

pub async fn get_movie(
    Extension(services): Extension<Arc<AppServices>>,
    id: Result<Path<String>, PathRejection>,
) -> axum::response::Response {
    let Ok(Path(id)) = id else {
        return errors::not_found();
    };
    match find(services.movies.as_ref(), &id) {
        Ok(movie) => (StatusCode::OK, Json(movie)).into_response(),
        Err(e) => errors::movie_error_to_response(e),
    }
}

pub async fn create_movie(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::invalid_json(rejection),
    };
    let new = match validate_full(&body) {
        Ok(m) => m,
        Err(e) => return errors::validation_error(e),
    };

    // Ids must stay unique; draw again on a collision.
    let movie = loop {
        let candidate = Movie::from_new(MovieId::new(), new.clone());
        if services.movies.insert(candidate.clone()) {
            break candidate;
        }
    };

    tracing::info!(id = %movie.id, title = %movie.title, "movie created");
    (StatusCode::CREATED, Json(movie)).into_response()
}

pub async fn update_movie(
    Extension(services): Extension<Arc<AppServices>>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::invalid_json(rejection),
    };
    // An undecodable id names no record; validation still comes first.
    let id = id.map(|Path(id)| id).unwrap_or_default();

    match patch(services.movies.as_ref(), &id, &body) {
        Ok(movie) => {
            tracing::info!(id = %movie.id, "movie updated");
            (StatusCode::OK, Json(movie)).into_response()
        }
        Err(e) => errors::movie_error_to_response(e),
    }
}

pub async fn delete_movie(
    Extension(services): Extension<Arc<AppServices>>,
    id: Result<Path<String>, PathRejection>,
) -> axum::response::Response {
    let Ok(Path(id)) = id else {
        return errors::not_found();
    };
    let removed = id
        .parse::<MovieId>()
        .is_ok_and(|id| services.movies.remove_by_id(&id));

    if !removed {
        return errors::not_found();
    }
    tracing::info!(%id, "movie deleted");
    StatusCode::NO_CONTENT.into_response()
}

/// Preflight for `/movies/:id`; the CORS layer adds the headers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Fallback for methods a path does not serve. Kept outside the CORS layer.
pub async fn method_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}

/// Ids that are not UUIDs cannot be in the store, so they are plain misses.
fn find(movies: &dyn MovieRepository, id: &str) -> MovieResult<Movie> {
    id.parse::<MovieId>()
        .ok()
        .and_then(|id| movies.find_by_id(&id))
        .ok_or(MovieError::NotFound)
}

/// Validate first, then look up, merge and write back.
fn patch(movies: &dyn MovieRepository, id: &str, body: &Value) -> MovieResult<Movie> {
    let changes = validate_partial(body)?;
    let current = find(movies, id)?;
    let updated = current.merged(changes);

    if movies.replace_by_id(&updated.id, updated.clone()) {
        Ok(updated)
    } else {
        // Deleted between the lookup and the write.
        Err(MovieError::NotFound)
    }
}
