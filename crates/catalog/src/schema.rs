//! Movie schema: field-by-field checks over untyped JSON.
//!
//! Works on `serde_json::Value` rather than deserializing into `Movie` so that
//! every failing field is reported with its path, the constraint it broke and
//! the value that was actually sent.

use chrono::{Datelike, Utc};
use serde_json::{Map, Value};
use url::Url;

use movies_core::{FieldIssue, IssueCode, ValidationError};

use crate::movie::{DEFAULT_RATE, Genre, MoviePatch, NewMovie};

/// Earliest accepted release year.
pub const MIN_YEAR: i32 = 1900;

/// How far past the current calendar year a release may be announced.
pub const MAX_YEARS_AHEAD: i32 = 5;

pub const MIN_RATE: f64 = 0.0;
pub const MAX_RATE: f64 = 10.0;

/// Latest accepted release year.
pub fn max_year() -> i32 {
    Utc::now().year() + MAX_YEARS_AHEAD
}

/// Validate a complete record for creation.
///
/// All fields except `rate` are required; `rate` falls back to
/// [`DEFAULT_RATE`]. Unknown fields, including `id`, are ignored.
pub fn validate_full(candidate: &Value) -> Result<NewMovie, ValidationError> {
    let mut reader = Reader::new(candidate)?;

    let title = reader.required(&TITLE);
    let year = reader.required(&YEAR);
    let director = reader.required(&DIRECTOR);
    let duration = reader.required(&DURATION);
    let poster = reader.required(&POSTER);
    let genre = reader.required(&GENRE);
    let rate = reader.optional(&RATE);

    match (title, year, director, duration, poster, genre) {
        (Some(title), Some(year), Some(director), Some(duration), Some(poster), Some(genre))
            if reader.issues.is_empty() =>
        {
            Ok(NewMovie {
                title,
                year,
                director,
                duration,
                poster,
                genre,
                rate: rate.unwrap_or(DEFAULT_RATE),
            })
        }
        _ => Err(ValidationError::new(reader.issues)),
    }
}

/// Validate a partial record for merging over an existing one.
///
/// Same per-field rules as [`validate_full`], but every field is optional and
/// no defaults are filled in.
pub fn validate_partial(candidate: &Value) -> Result<MoviePatch, ValidationError> {
    let mut reader = Reader::new(candidate)?;

    let patch = MoviePatch {
        title: reader.optional(&TITLE),
        year: reader.optional(&YEAR),
        director: reader.optional(&DIRECTOR),
        duration: reader.optional(&DURATION),
        poster: reader.optional(&POSTER),
        genre: reader.optional(&GENRE),
        rate: reader.optional(&RATE),
    };

    if reader.issues.is_empty() {
        Ok(patch)
    } else {
        Err(ValidationError::new(reader.issues))
    }
}

type Check<T> = fn(&Value) -> Result<T, Vec<FieldIssue>>;

struct Field<T> {
    name: &'static str,
    expected: &'static str,
    check: Check<T>,
}

const TITLE: Field<String> = Field {
    name: "title",
    expected: "string",
    check: non_empty_text,
};

const YEAR: Field<i32> = Field {
    name: "year",
    expected: "integer",
    check: release_year,
};

const DIRECTOR: Field<String> = Field {
    name: "director",
    expected: "string",
    check: non_empty_text,
};

const DURATION: Field<u32> = Field {
    name: "duration",
    expected: "integer",
    check: positive_minutes,
};

const POSTER: Field<String> = Field {
    name: "poster",
    expected: "string",
    check: poster_url,
};

const GENRE: Field<Vec<Genre>> = Field {
    name: "genre",
    expected: "array",
    check: genre_set,
};

const RATE: Field<f64> = Field {
    name: "rate",
    expected: "number",
    check: rating,
};

/// Walks the body object and accumulates issues across fields.
struct Reader<'a> {
    object: &'a Map<String, Value>,
    issues: Vec<FieldIssue>,
}

impl<'a> Reader<'a> {
    fn new(candidate: &'a Value) -> Result<Self, ValidationError> {
        match candidate.as_object() {
            Some(object) => Ok(Self {
                object,
                issues: Vec::new(),
            }),
            None => Err(ValidationError::single(FieldIssue::invalid_type(
                "object", candidate,
            ))),
        }
    }

    fn required<T>(&mut self, field: &Field<T>) -> Option<T> {
        if !self.object.contains_key(field.name) {
            self.issues
                .push(FieldIssue::required(field.name, field.expected));
            return None;
        }
        self.optional(field)
    }

    fn optional<T>(&mut self, field: &Field<T>) -> Option<T> {
        let value = self.object.get(field.name)?;
        match (field.check)(value) {
            Ok(v) => Some(v),
            Err(issues) => {
                self.issues
                    .extend(issues.into_iter().map(|i| i.at(field.name)));
                None
            }
        }
    }
}

fn non_empty_text(value: &Value) -> Result<String, Vec<FieldIssue>> {
    let Some(s) = value.as_str() else {
        return Err(vec![FieldIssue::invalid_type("string", value)]);
    };
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(vec![FieldIssue::new(
            IssueCode::TooSmall,
            "non-empty string",
            Some(value.clone()),
            "String must contain at least 1 character(s)",
        )]);
    }
    Ok(trimmed.to_string())
}

/// Any JSON number with no fractional part, `2000.0` and `2e3` included.
/// Whole numbers past `i64` saturate so range checks report them as too big.
fn integer(value: &Value) -> Result<i64, Vec<FieldIssue>> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    if value.as_u64().is_some() {
        return Ok(i64::MAX);
    }
    match value.as_f64() {
        // `as` saturates at the i64 bounds.
        Some(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
        _ => Err(vec![FieldIssue::invalid_type("integer", value)]),
    }
}

fn release_year(value: &Value) -> Result<i32, Vec<FieldIssue>> {
    let year = integer(value)?;
    let max = max_year();
    if year < i64::from(MIN_YEAR) {
        return Err(vec![FieldIssue::new(
            IssueCode::TooSmall,
            format!(">= {MIN_YEAR}"),
            Some(value.clone()),
            format!("Number must be greater than or equal to {MIN_YEAR}"),
        )]);
    }
    if year > i64::from(max) {
        return Err(vec![FieldIssue::new(
            IssueCode::TooBig,
            format!("<= {max}"),
            Some(value.clone()),
            format!("Number must be less than or equal to {max}"),
        )]);
    }
    // Range checked above.
    Ok(year as i32)
}

fn positive_minutes(value: &Value) -> Result<u32, Vec<FieldIssue>> {
    let minutes = integer(value)?;
    if minutes < 1 {
        return Err(vec![FieldIssue::new(
            IssueCode::TooSmall,
            "> 0",
            Some(value.clone()),
            "Number must be greater than 0",
        )]);
    }
    u32::try_from(minutes).map_err(|_| {
        vec![FieldIssue::new(
            IssueCode::TooBig,
            format!("<= {}", u32::MAX),
            Some(value.clone()),
            format!("Number must be less than or equal to {}", u32::MAX),
        )]
    })
}

fn poster_url(value: &Value) -> Result<String, Vec<FieldIssue>> {
    let Some(s) = value.as_str() else {
        return Err(vec![FieldIssue::invalid_type("string", value)]);
    };
    if is_web_url(s) {
        Ok(s.to_string())
    } else {
        Err(vec![FieldIssue::new(
            IssueCode::InvalidUrl,
            "http(s) URL",
            Some(value.clone()),
            "Poster must be a valid URL",
        )])
    }
}

/// Absolute `http`/`https` URL with a non-empty host.
fn is_web_url(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Ok(url) = Url::parse(s) else {
        return false;
    };
    matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
}

fn genre_set(value: &Value) -> Result<Vec<Genre>, Vec<FieldIssue>> {
    let Some(items) = value.as_array() else {
        return Err(vec![FieldIssue::invalid_type("array", value)]);
    };
    if items.is_empty() {
        return Err(vec![FieldIssue::new(
            IssueCode::TooSmall,
            "at least 1 genre",
            Some(value.clone()),
            "Array must contain at least 1 element(s)",
        )]);
    }

    let mut genres = Vec::with_capacity(items.len());
    let mut issues = Vec::new();
    for (index, item) in items.iter().enumerate() {
        match genre_label(item) {
            Ok(g) if !genres.contains(&g) => genres.push(g),
            Ok(_) => {}
            Err(issue) => issues.push(issue.at(index)),
        }
    }

    if issues.is_empty() {
        Ok(genres)
    } else {
        Err(issues)
    }
}

fn genre_label(item: &Value) -> Result<Genre, FieldIssue> {
    let options = Genre::ALL
        .iter()
        .map(|g| g.as_str())
        .collect::<Vec<_>>()
        .join(" | ");

    let Some(label) = item.as_str() else {
        return Err(FieldIssue::invalid_type("string", item));
    };
    Genre::from_label(label).ok_or_else(|| {
        FieldIssue::new(
            IssueCode::InvalidEnumValue,
            options.clone(),
            Some(item.clone()),
            format!("Invalid enum value. Expected {options}, received '{label}'"),
        )
    })
}

fn rating(value: &Value) -> Result<f64, Vec<FieldIssue>> {
    let Some(rate) = value.as_f64().filter(|r| r.is_finite()) else {
        return Err(vec![FieldIssue::invalid_type("number", value)]);
    };
    if rate < MIN_RATE {
        return Err(vec![FieldIssue::new(
            IssueCode::TooSmall,
            format!(">= {MIN_RATE}"),
            Some(value.clone()),
            format!("Number must be greater than or equal to {MIN_RATE}"),
        )]);
    }
    if rate > MAX_RATE {
        return Err(vec![FieldIssue::new(
            IssueCode::TooBig,
            format!("<= {MAX_RATE}"),
            Some(value.clone()),
            format!("Number must be less than or equal to {MAX_RATE}"),
        )]);
    }
    Ok(rate)
}
