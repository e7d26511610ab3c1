//! Movie store abstraction and its in-memory implementation.

use std::sync::{Arc, PoisonError, RwLock};

use movies_core::MovieId;

use crate::movie::Movie;

/// Ordered collection of movie records.
///
/// Every operation is synchronous and takes effect immediately for all
/// subsequent callers.
pub trait MovieRepository: Send + Sync {
    /// All records in insertion order.
    fn list(&self) -> Vec<Movie>;
    fn find_by_id(&self, id: &MovieId) -> Option<Movie>;
    /// Records having `genre` among their labels, compared case-insensitively.
    fn filter_by_genre(&self, genre: &str) -> Vec<Movie>;
    /// Append a record. Returns `false` and stores nothing if the id is taken.
    fn insert(&self, movie: Movie) -> bool;
    fn remove_by_id(&self, id: &MovieId) -> bool;
    fn replace_by_id(&self, id: &MovieId, movie: Movie) -> bool;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S> MovieRepository for Arc<S>
where
    S: MovieRepository + ?Sized,
{
    fn list(&self) -> Vec<Movie> {
        (**self).list()
    }

    fn find_by_id(&self, id: &MovieId) -> Option<Movie> {
        (**self).find_by_id(id)
    }

    fn filter_by_genre(&self, genre: &str) -> Vec<Movie> {
        (**self).filter_by_genre(genre)
    }

    fn insert(&self, movie: Movie) -> bool {
        (**self).insert(movie)
    }

    fn remove_by_id(&self, id: &MovieId) -> bool {
        (**self).remove_by_id(id)
    }

    fn replace_by_id(&self, id: &MovieId, movie: Movie) -> bool {
        (**self).replace_by_id(id, movie)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// `Vec`-backed store; linear scans throughout.
#[derive(Debug, Default)]
pub struct InMemoryMovieRepository {
    inner: RwLock<Vec<Movie>>,
}

impl InMemoryMovieRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `movies`.
    ///
    /// Later records whose id is already present are dropped.
    pub fn with_movies(movies: impl IntoIterator<Item = Movie>) -> Self {
        let repo = Self::new();
        for movie in movies {
            let id = movie.id;
            if !repo.insert(movie) {
                tracing::warn!(%id, "duplicate movie id in initial data; skipped");
            }
        }
        repo
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Movie>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Movie>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MovieRepository for InMemoryMovieRepository {
    fn list(&self) -> Vec<Movie> {
        self.read().clone()
    }

    fn find_by_id(&self, id: &MovieId) -> Option<Movie> {
        self.read().iter().find(|m| m.id == *id).cloned()
    }

    fn filter_by_genre(&self, genre: &str) -> Vec<Movie> {
        self.read()
            .iter()
            .filter(|m| m.has_genre(genre))
            .cloned()
            .collect()
    }

    fn insert(&self, movie: Movie) -> bool {
        let mut movies = self.write();
        if movies.iter().any(|m| m.id == movie.id) {
            return false;
        }
        movies.push(movie);
        true
    }

    fn remove_by_id(&self, id: &MovieId) -> bool {
        let mut movies = self.write();
        match movies.iter().position(|m| m.id == *id) {
            Some(index) => {
                movies.remove(index);
                true
            }
            None => false,
        }
    }

    fn replace_by_id(&self, id: &MovieId, movie: Movie) -> bool {
        let mut movies = self.write();
        match movies.iter_mut().find(|m| m.id == *id) {
            Some(slot) => {
                *slot = movie;
                true
            }
            None => false,
        }
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}
