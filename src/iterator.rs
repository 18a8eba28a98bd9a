use crate::collab::CollaboratorIndex;
use crate::parsing::{LyricsFailurePolicy, ParseOptions, SongParser};
use crate::r#trait::LyricsSource;
use crate::{GeniusClient, Result, SearchParams, SongRecord};

use async_trait::async_trait;
use std::collections::VecDeque;

/// Async iterator trait for paginated search data.
///
/// This trait provides a common interface for walking results that arrive one
/// search page at a time. Pages are fetched lazily as items are consumed.
#[async_trait(?Send)]
pub trait AsyncPaginatedIterator<T> {
    /// Fetch the next item from the iterator.
    ///
    /// This method fetches new pages as needed.
    /// Returns `None` when there are no more items available.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(item))` - Next item in the sequence
    /// - `Ok(None)` - No more items available
    /// - `Err(...)` - Network or parsing error occurred
    async fn next(&mut self) -> Result<Option<T>>;

    /// Collect all remaining items into a Vec.
    async fn collect_all(&mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Take up to n items from the iterator.
    ///
    /// # Arguments
    ///
    /// * `n` - Maximum number of items to collect
    async fn take(&mut self, n: usize) -> Result<Vec<T>> {
        let mut items = Vec::new();
        for _ in 0..n {
            match self.next().await? {
                Some(item) => items.push(item),
                None => break,
            }
        }
        Ok(items)
    }

    /// Number of pages fetched so far.
    fn current_page(&self) -> u32;
}

/// Which pages of an artist's search results to walk, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongsQuery {
    /// Search keyword, normally the artist name
    pub keyword: String,
    pub start_page: u32,
    pub per_page: u32,
    /// Maximum number of search pages to request
    pub pages: u32,
    pub page_increment: u32,
    /// Whether to read featured artists for each song
    pub features: bool,
    pub failure_policy: LyricsFailurePolicy,
    /// Lyrics fetches in flight per page
    pub fetch_concurrency: usize,
}

impl SongsQuery {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            start_page: 1,
            per_page: 10,
            pages: 3,
            page_increment: 1,
            features: true,
            failure_policy: LyricsFailurePolicy::Abort,
            fetch_concurrency: 1,
        }
    }

    pub fn start_page(mut self, start_page: u32) -> Self {
        self.start_page = start_page;
        self
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn pages(mut self, pages: u32) -> Self {
        self.pages = pages;
        self
    }

    pub fn page_increment(mut self, page_increment: u32) -> Self {
        self.page_increment = page_increment;
        self
    }

    pub fn features(mut self, features: bool) -> Self {
        self.features = features;
        self
    }

    pub fn failure_policy(mut self, failure_policy: LyricsFailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    pub fn fetch_concurrency(mut self, fetch_concurrency: usize) -> Self {
        self.fetch_concurrency = fetch_concurrency;
        self
    }

    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            features: self.features,
            failure_policy: self.failure_policy,
            fetch_concurrency: self.fetch_concurrency,
        }
    }
}

/// Iterator over the songs of consecutive search pages.
///
/// Each page is searched, parsed and has its lyrics resolved before any of its
/// songs are yielded. Iteration ends after `query.pages` pages or at the first
/// page without hits.
pub struct CatalogIterator<'a> {
    client: &'a GeniusClient,
    lyrics: &'a dyn LyricsSource,
    parser: SongParser,
    query: SongsQuery,
    params: SearchParams,
    pages_fetched: u32,
    buffer: VecDeque<SongRecord>,
    finished: bool,
}

impl<'a> CatalogIterator<'a> {
    /// Walk `query` using `client` for both search and lyrics.
    pub fn new(client: &'a GeniusClient, query: SongsQuery) -> Self {
        Self::with_lyrics_source(client, client, query)
    }

    /// Walk `query`, resolving lyrics through `lyrics` instead of the client.
    pub fn with_lyrics_source(
        client: &'a GeniusClient,
        lyrics: &'a dyn LyricsSource,
        query: SongsQuery,
    ) -> Self {
        let parser = SongParser::new(client.config().unicode_map.clone());
        let params = SearchParams::new(query.start_page, query.per_page);
        Self {
            client,
            lyrics,
            parser,
            query,
            params,
            pages_fetched: 0,
            buffer: VecDeque::new(),
            finished: false,
        }
    }

    async fn fetch_next_page(&mut self) -> Result<()> {
        log::debug!(
            "Fetching page {:?} for '{}' ({} of {})",
            self.params.page,
            self.query.keyword,
            self.pages_fetched + 1,
            self.query.pages
        );

        let response = self.client.search(&self.query.keyword, Some(self.params)).await?;
        let songs = self
            .parser
            .parse_songs(&response, &self.query.parse_options(), self.lyrics)
            .await?;

        self.pages_fetched += 1;
        self.params = self.params.advanced(self.query.page_increment);

        if songs.is_empty() {
            log::info!(
                "No more hits for '{}' after {} pages",
                self.query.keyword,
                self.pages_fetched
            );
            self.finished = true;
        }

        self.buffer.extend(songs);
        Ok(())
    }
}

#[async_trait(?Send)]
impl AsyncPaginatedIterator<SongRecord> for CatalogIterator<'_> {
    async fn next(&mut self) -> Result<Option<SongRecord>> {
        loop {
            if let Some(song) = self.buffer.pop_front() {
                return Ok(Some(song));
            }
            if self.finished || self.pages_fetched >= self.query.pages {
                return Ok(None);
            }
            self.fetch_next_page().await?;
        }
    }

    fn current_page(&self) -> u32 {
        self.pages_fetched
    }
}

/// Fetch every song for `query` into a new vector, in search order.
pub async fn collect_songs(client: &GeniusClient, query: &SongsQuery) -> Result<Vec<SongRecord>> {
    let mut iterator = CatalogIterator::new(client, query.clone());
    let songs = iterator.collect_all().await?;
    log::info!(
        "Collected {} songs for '{}' from {} pages",
        songs.len(),
        query.keyword,
        iterator.current_page()
    );
    Ok(songs)
}

/// Build the collaborator index for the artist named by `query.keyword`.
///
/// Songs are folded one at a time. With `limit = Some(n)` folding stops as
/// soon as the index holds more than `n` collaborators, and no further pages
/// are requested.
pub async fn collect_collaborators(
    client: &GeniusClient,
    query: &SongsQuery,
    limit: Option<usize>,
) -> Result<CollaboratorIndex> {
    let mut iterator = CatalogIterator::new(client, query.clone());
    fold_collaborators(&mut iterator, &query.keyword, limit).await
}

/// Fold songs from any paginated source into a collaborator index.
pub async fn fold_collaborators(
    songs: &mut dyn AsyncPaginatedIterator<SongRecord>,
    artist_name: &str,
    limit: Option<usize>,
) -> Result<CollaboratorIndex> {
    let mut index = CollaboratorIndex::new();
    while limit.map_or(true, |limit| index.len() <= limit) {
        match songs.next().await? {
            Some(song) => index.record_song(artist_name, &song),
            None => break,
        }
    }
    log::info!(
        "Found {} collaborators for '{artist_name}' across {} pages",
        index.len(),
        songs.current_page()
    );
    Ok(index)
}
