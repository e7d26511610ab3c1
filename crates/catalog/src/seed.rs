//! Initial dataset loaded into the store at startup.
//!
//! Seeded records go through the same schema as client writes, so the store
//! never holds a record that `validate_full` would reject.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use movies_core::{MovieId, ValidationError};

use crate::movie::Movie;
use crate::schema::validate_full;

const BUILTIN: &str = include_str!("../data/movies.json");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("seed data is not a JSON array of movies: {0}")]
    Json(#[from] serde_json::Error),

    #[error("seed record {index}: missing or malformed id")]
    InvalidId { index: usize },

    #[error("seed record {index}: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: ValidationError,
    },

    #[error("seed record {index}: duplicate id {id}")]
    DuplicateId { index: usize, id: MovieId },
}

/// The dataset compiled into the binary.
pub fn builtin() -> Result<Vec<Movie>, SeedError> {
    parse(BUILTIN)
}

/// Read a dataset from a JSON file with the same shape as the built-in one.
pub fn from_file(path: &Path) -> Result<Vec<Movie>, SeedError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&raw)
}

/// Parse a JSON array of movie records, each carrying its own `id`.
pub fn parse(raw: &str) -> Result<Vec<Movie>, SeedError> {
    let records: Vec<Value> = serde_json::from_str(raw)?;
    let mut seen = HashSet::with_capacity(records.len());
    let mut movies = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let id: MovieId = record
            .get("id")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .ok_or(SeedError::InvalidId { index })?;

        let new = validate_full(record).map_err(|source| SeedError::Invalid { index, source })?;

        if !seen.insert(id) {
            return Err(SeedError::DuplicateId { index, id });
        }
        movies.push(Movie::from_new(id, new));
    }

    tracing::debug!(count = movies.len(), "seed dataset parsed");
    Ok(movies)
}
