//! `movies-core` — identifiers and error types shared by the catalog and the API.
//!
//! Nothing in here knows about HTTP or storage.

pub mod error;
pub mod id;

pub use error::{FieldIssue, IssueCode, MovieError, MovieResult, PathSegment, ValidationError};
pub use id::MovieId;
