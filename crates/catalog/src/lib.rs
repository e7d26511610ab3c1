//! Movie catalog: the record model, its schema, the in-memory store and the
//! seed dataset.
//!
//! Pure logic with no HTTP concerns; the API crate wires it to routes.

pub mod movie;
pub mod repository;
pub mod schema;
pub mod seed;

pub use movie::{Genre, Movie, MoviePatch, NewMovie, DEFAULT_RATE};
pub use repository::{InMemoryMovieRepository, MovieRepository};
pub use schema::{validate_full, validate_partial};
pub use seed::SeedError;
