use std::sync::Arc;

use movies_catalog::{seed, InMemoryMovieRepository, Movie, MovieRepository, SeedError};

use crate::config::ApiConfig;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppServices {
    pub movies: Arc<dyn MovieRepository>,
}

impl AppServices {
    pub fn new(movies: Arc<dyn MovieRepository>) -> Self {
        Self { movies }
    }

    /// Store pre-populated with `movies`.
    pub fn in_memory(movies: impl IntoIterator<Item = Movie>) -> Self {
        Self::new(Arc::new(InMemoryMovieRepository::with_movies(movies)))
    }

    /// Seed from `MOVIES_SEED_PATH` when configured, else the built-in dataset.
    pub fn from_config(config: &ApiConfig) -> Result<Self, SeedError> {
        let movies = match &config.seed_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading seed dataset from file");
                seed::from_file(path)?
            }
            None => seed::builtin()?,
        };
        let services = Self::in_memory(movies);
        tracing::info!(count = services.movies.len(), "movie store ready");
        Ok(services)
    }
}
