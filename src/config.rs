use crate::normalize::UnicodeMap;
use crate::{CollabError, Result};
use std::time::Duration;

/// Default metadata API base URL.
pub const DEFAULT_API_BASE_URL: &str = "http://api.genius.com";

/// Default lyrics site base URL; song paths are appended to it.
pub const DEFAULT_LYRICS_BASE_URL: &str = "https://genius.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_REDIRECTS: u32 = 5;

/// Everything a [`GeniusClient`](crate::GeniusClient) needs to talk to Genius.
///
/// Built once by the caller and handed to the client, so nothing in the crate
/// reads credentials or URLs from globals.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Sent as `Authorization: Bearer <token>` on every request
    pub bearer_token: String,
    pub api_base_url: String,
    pub lyrics_base_url: String,
    /// Per-request timeout, covering the whole redirect chain
    pub request_timeout: Duration,
    pub max_redirects: u32,
    pub unicode_map: UnicodeMap,
}

impl ClientConfig {
    /// Create a configuration with default URLs and limits.
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            bearer_token: bearer_token.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            lyrics_base_url: DEFAULT_LYRICS_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            unicode_map: UnicodeMap::default(),
        }
    }

    /// Read configuration from the process environment.
    ///
    /// * `GENIUS_BEARER_TOKEN` (or the legacy `bearer_token`) - required
    /// * `GENIUS_API_BASE_URL` - optional
    /// * `GENIUS_LYRICS_BASE_URL` - optional
    /// * `GENIUS_TIMEOUT_SECS` - optional, whole seconds
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let token = non_blank("GENIUS_BEARER_TOKEN")
            .or_else(|| non_blank("bearer_token"))
            .ok_or_else(|| {
                CollabError::Config(
                    "GENIUS_BEARER_TOKEN is not set. Create an API client at https://genius.com/api-clients and export its access token.".to_string(),
                )
            })?;

        let mut config = Self::new(token.trim());

        if let Some(url) = non_blank("GENIUS_API_BASE_URL") {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = non_blank("GENIUS_LYRICS_BASE_URL") {
            config.lyrics_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = non_blank("GENIUS_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                CollabError::Config(format!("GENIUS_TIMEOUT_SECS must be whole seconds: {e}"))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        log::debug!(
            "Loaded client config: api={}, lyrics={}, timeout={:?}",
            config.api_base_url,
            config.lyrics_base_url,
            config.request_timeout
        );

        Ok(config)
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_lyrics_base_url(mut self, url: impl Into<String>) -> Self {
        self.lyrics_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: u32) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn with_unicode_map(mut self, unicode_map: UnicodeMap) -> Self {
        self.unicode_map = unicode_map;
        self
    }

    pub(crate) fn authorization_header(&self) -> String {
        format!("Bearer {}", self.bearer_token)
    }
}
