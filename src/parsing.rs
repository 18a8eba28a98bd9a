//! Search payload parsing.
//!
//! This module turns a search response into [`SongRecord`]s. Metadata for every
//! hit on the page is parsed and validated first; lyrics are fetched only once
//! the whole page is known to be well formed, so a malformed page never yields
//! partial output.

use crate::normalize::{remove_unicode_artifacts, NameSplitter, UnicodeMap};
use crate::r#trait::LyricsSource;
use crate::{CollabError, Result, SearchResponse, SongRecord};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde_json::{Map, Value};

/// What to do when one song's lyrics cannot be fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LyricsFailurePolicy {
    /// Fail the whole page with the fetch error.
    #[default]
    Abort,
    /// Keep the song with empty lyrics and log a warning.
    Placeholder,
}

/// Options for [`SongParser::parse_songs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Whether to read `featured_artists` for each hit
    pub features: bool,
    pub failure_policy: LyricsFailurePolicy,
    /// Maximum lyrics fetches in flight; 1 fetches strictly one after another
    pub fetch_concurrency: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            features: true,
            failure_policy: LyricsFailurePolicy::Abort,
            fetch_concurrency: 1,
        }
    }
}

/// Song metadata from one hit, before lyrics are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongMetadata {
    pub title: String,
    pub featured_artists: Vec<String>,
    pub primary_artists: Vec<String>,
    pub path: String,
}

impl SongMetadata {
    pub fn into_record(self, lyrics: String) -> SongRecord {
        SongRecord {
            title: self.title,
            featured_artists: self.featured_artists,
            primary_artists: self.primary_artists,
            path: self.path,
            lyrics,
        }
    }
}

/// Parser for Genius search payloads.
///
/// Stateless apart from its cleanup tables; one parser can be shared across
/// any number of pages.
#[derive(Debug, Clone, Default)]
pub struct SongParser {
    unicode_map: UnicodeMap,
    splitter: NameSplitter,
}

impl SongParser {
    pub fn new(unicode_map: UnicodeMap) -> Self {
        Self {
            unicode_map,
            splitter: NameSplitter::default(),
        }
    }

    /// Use a different delimiter set when splitting credit strings.
    pub fn with_splitter(mut self, splitter: NameSplitter) -> Self {
        self.splitter = splitter;
        self
    }

    /// Parse a search response and resolve lyrics for every hit, in hit order.
    ///
    /// Hits with an empty path get empty lyrics without a fetch. Other fetch
    /// failures follow `options.failure_policy`.
    pub async fn parse_songs(
        &self,
        response: &SearchResponse,
        options: &ParseOptions,
        lyrics: &dyn LyricsSource,
    ) -> Result<Vec<SongRecord>> {
        let hits = self.parse_metadata(&response.body, options.features)?;
        log::debug!(
            "Parsed {} hits from {}, fetching lyrics",
            hits.len(),
            response.url
        );

        let policy = options.failure_policy;
        stream::iter(hits)
            .map(|song| resolve_lyrics(lyrics, song, policy))
            .buffered(options.fetch_concurrency.max(1))
            .try_collect()
            .await
    }

    /// Parse the metadata of every hit in a search body.
    pub fn parse_metadata(&self, body: &str, features: bool) -> Result<Vec<SongMetadata>> {
        let payload: Value = serde_json::from_str(body).map_err(|e| {
            CollabError::MalformedResponse(format!(
                "JSON data could not be parsed from the response: {e}"
            ))
        })?;

        let response = payload.get("response").ok_or_else(|| {
            CollabError::MalformedResponse(
                "JSON object does not contain the \"response\" key".to_string(),
            )
        })?;

        let hits = response
            .get("hits")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                CollabError::MalformedResponse(
                    "\"response\" does not contain a \"hits\" list".to_string(),
                )
            })?;

        hits.iter()
            .enumerate()
            .map(|(index, hit)| self.parse_hit(index, hit, features))
            .collect()
    }

    fn parse_hit(&self, index: usize, hit: &Value, features: bool) -> Result<SongMetadata> {
        let result = hit
            .get("result")
            .and_then(Value::as_object)
            .ok_or_else(|| malformed(index, "result"))?;

        let title = optional_string(result, index, "full_title")?
            .map(|title| remove_unicode_artifacts(title, &self.unicode_map))
            .unwrap_or_default();

        let path = optional_string(result, index, "path")?
            .unwrap_or_default()
            .to_string();

        let primary_artists = self.artist_field(result, index, "primary_artists")?;

        let featured_artists = match result.get("featured_artists") {
            Some(value) if features => self.artist_list(index, "featured_artists", value)?,
            _ => Vec::new(),
        };

        Ok(SongMetadata {
            title,
            featured_artists,
            primary_artists,
            path,
        })
    }

    fn artist_field(
        &self,
        result: &Map<String, Value>,
        index: usize,
        key: &str,
    ) -> Result<Vec<String>> {
        let value = required(result, index, key)?;
        self.artist_list(index, key, value)
    }

    fn artist_list(&self, index: usize, key: &str, value: &Value) -> Result<Vec<String>> {
        if is_falsy(value) {
            return Ok(Vec::new());
        }
        let artists = value.as_array().ok_or_else(|| malformed(index, key))?;
        self.artist_names(index, artists)
    }

    /// Flatten a list of `{ "name": ... }` credits into cleaned individual names.
    pub fn artist_names(&self, index: usize, artists: &[Value]) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for artist in artists {
            let name = artist.get("name").ok_or_else(|| malformed(index, "name"))?;
            if is_falsy(name) {
                continue;
            }
            let name = name.as_str().ok_or_else(|| malformed(index, "name"))?;
            let cleaned = remove_unicode_artifacts(name, &self.unicode_map);
            names.extend(self.splitter.split(&cleaned));
        }
        Ok(names)
    }
}

async fn resolve_lyrics(
    lyrics: &dyn LyricsSource,
    song: SongMetadata,
    policy: LyricsFailurePolicy,
) -> Result<SongRecord> {
    if song.path.is_empty() {
        log::debug!("'{}' has no path, leaving lyrics empty", song.title);
        return Ok(song.into_record(String::new()));
    }

    match lyrics.fetch_lyrics(&song.path).await {
        Ok(text) => Ok(song.into_record(text)),
        Err(e) => match policy {
            LyricsFailurePolicy::Abort => Err(e),
            LyricsFailurePolicy::Placeholder => {
                log::warn!("Lyrics for {} unavailable: {e}", song.path);
                Ok(song.into_record(String::new()))
            }
        },
    }
}

fn malformed(index: usize, key: &str) -> CollabError {
    CollabError::MalformedEntry {
        index,
        key: key.to_string(),
    }
}

fn required<'a>(object: &'a Map<String, Value>, index: usize, key: &str) -> Result<&'a Value> {
    object.get(key).ok_or_else(|| malformed(index, key))
}

/// A string value, or `None` when the key is absent or falsy.
fn optional_string<'a>(
    object: &'a Map<String, Value>,
    index: usize,
    key: &str,
) -> Result<Option<&'a str>> {
    let value = match object.get(key) {
        Some(value) if !is_falsy(value) => value,
        _ => return Ok(None),
    };
    value
        .as_str()
        .map(Some)
        .ok_or_else(|| malformed(index, key))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
