//! Data types shared across the crate.
//!
//! Song records, search paging state and the raw search response live here;
//! the collaborator index has its own module in [`crate::collab`].

use serde::{Deserialize, Serialize};

/// One song from a search page, with its lyrics resolved.
///
/// # Examples
///
/// ```rust
/// use genius_collab::SongRecord;
///
/// let song = SongRecord {
///     title: "Rainbow by Kacey Musgraves".to_string(),
///     featured_artists: vec![],
///     primary_artists: vec!["Kacey Musgraves".to_string()],
///     path: "/Kacey-musgraves-rainbow-lyrics".to_string(),
///     lyrics: String::new(),
/// };
///
/// assert!(song.artists().any(|artist| artist == "Kacey Musgraves"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRecord {
    /// Display title, e.g. "Rainbow by Kacey Musgraves"
    pub title: String,
    /// Guest artists, empty when featured artists were not requested
    pub featured_artists: Vec<String>,
    /// Main performers, one cleaned name per entry
    pub primary_artists: Vec<String>,
    /// Lyrics page path on the lyrics host
    pub path: String,
    /// Cleaned lyrics, empty when the page could not be resolved
    pub lyrics: String,
}

impl SongRecord {
    /// Primary artists followed by featured artists.
    pub fn artists(&self) -> impl Iterator<Item = &str> {
        self.primary_artists
            .iter()
            .chain(self.featured_artists.iter())
            .map(String::as_str)
    }
}

/// Paging cursor for a search request.
///
/// Either field can be left unset to use the API's own default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl SearchParams {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    /// The same cursor moved forward by `increment` pages (page 1 when unset).
    pub fn advanced(self, increment: u32) -> Self {
        Self {
            page: Some(self.page.unwrap_or(1).saturating_add(increment)),
            per_page: self.per_page,
        }
    }
}

/// The unparsed result of a successful search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResponse {
    /// Final URL, after any redirects
    pub url: String,
    pub status: u16,
    pub body: String,
}
