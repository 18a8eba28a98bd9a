use crate::Result;
use async_trait::async_trait;

/// Source of cleaned lyrics for a song page path.
///
/// [`GeniusClient`](crate::GeniusClient) implements this by fetching the page
/// from the lyrics host; the song parser only depends on the trait so tests
/// and alternative hosts can supply lyrics directly.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockLyricsSource`
/// that implements this trait using the `mockall` library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait LyricsSource {
    /// Fetch and clean the lyrics at `path` (e.g. `/Kacey-musgraves-rainbow-lyrics`).
    async fn fetch_lyrics(&self, path: &str) -> Result<String>;
}
