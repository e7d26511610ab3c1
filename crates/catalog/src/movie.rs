use serde::{Deserialize, Serialize};

use movies_core::MovieId;

/// Rating given to a new movie when the client omits `rate`.
pub const DEFAULT_RATE: f64 = 5.0;

/// Category label a movie can be filed under.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Crime,
    Comedy,
    Drama,
    Fantasy,
    Horror,
    Thriller,
    #[serde(rename = "Sci-Fi")]
    SciFi,
}

impl Genre {
    pub const ALL: [Genre; 9] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Crime,
        Genre::Comedy,
        Genre::Drama,
        Genre::Fantasy,
        Genre::Horror,
        Genre::Thriller,
        Genre::SciFi,
    ];

    /// Wire label, exactly as accepted on writes.
    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Crime => "Crime",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::Horror => "Horror",
            Genre::Thriller => "Thriller",
            Genre::SciFi => "Sci-Fi",
        }
    }

    /// Exact (case-sensitive) label lookup.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == label)
    }

    /// Case-insensitive comparison used by the genre filter.
    pub fn matches(self, label: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(label)
    }
}

impl core::fmt::Display for Genre {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored movie record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year: i32,
    pub director: String,
    /// Running time in minutes.
    pub duration: u32,
    pub poster: String,
    pub genre: Vec<Genre>,
    pub rate: f64,
}

impl Movie {
    pub fn from_new(id: MovieId, new: NewMovie) -> Self {
        Self {
            id,
            title: new.title,
            year: new.year,
            director: new.director,
            duration: new.duration,
            poster: new.poster,
            genre: new.genre,
            rate: new.rate,
        }
    }

    pub fn has_genre(&self, label: &str) -> bool {
        self.genre.iter().any(|g| g.matches(label))
    }

    /// Shallow merge: every field present in `patch` replaces the current value.
    pub fn apply(&mut self, patch: MoviePatch) {
        let MoviePatch {
            title,
            year,
            director,
            duration,
            poster,
            genre,
            rate,
        } = patch;

        if let Some(v) = title {
            self.title = v;
        }
        if let Some(v) = year {
            self.year = v;
        }
        if let Some(v) = director {
            self.director = v;
        }
        if let Some(v) = duration {
            self.duration = v;
        }
        if let Some(v) = poster {
            self.poster = v;
        }
        if let Some(v) = genre {
            self.genre = v;
        }
        if let Some(v) = rate {
            self.rate = v;
        }
    }

    /// Consuming variant of [`Movie::apply`].
    pub fn merged(mut self, patch: MoviePatch) -> Self {
        self.apply(patch);
        self
    }
}

/// A fully validated record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub director: String,
    pub duration: u32,
    pub poster: String,
    pub genre: Vec<Genre>,
    pub rate: f64,
}

/// Validated partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub duration: Option<u32>,
    pub poster: Option<String>,
    pub genre: Option<Vec<Genre>>,
    pub rate: Option<f64>,
}

impl MoviePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
