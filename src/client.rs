use crate::error::StatusClass;
use crate::headers::{add_api_headers, add_page_headers};
use crate::lyrics::LyricsExtractor;
use crate::r#trait::LyricsSource;
use crate::{ClientConfig, CollabError, Result, SearchParams, SearchResponse};
use async_trait::async_trait;
use http_client::{HttpClient, Request};
use http_types::{Method, Url};

#[derive(Debug, Clone, Copy)]
enum RequestKind {
    Api,
    Page,
}

/// Client for the Genius search API and lyrics pages.
///
/// All requests are issued one at a time and awaited in full. The client never
/// retries; failures are returned to the caller as [`CollabError`] variants
/// that include the attempted URL.
///
/// # Examples
///
/// ```rust,no_run
/// use genius_collab::{ClientConfig, GeniusClient, Result, SearchParams};
///
/// #[tokio::main]
/// async fn main() -> Result<()> {
///     let config = ClientConfig::from_env()?;
///     let http_client = http_client::native::NativeClient::new();
///     let client = GeniusClient::new(Box::new(http_client), config);
///
///     let response = client
///         .search("Kacey Musgraves", Some(SearchParams::new(1, 10)))
///         .await?;
///     println!("{} {}", response.status, response.body.len());
///
///     Ok(())
/// }
/// ```
pub struct GeniusClient {
    client: Box<dyn HttpClient + Send + Sync>,
    config: ClientConfig,
    extractor: LyricsExtractor,
}

impl GeniusClient {
    /// Create a new [`GeniusClient`] from any HTTP implementation and a configuration.
    pub fn new(client: Box<dyn HttpClient + Send + Sync>, config: ClientConfig) -> Self {
        let extractor = LyricsExtractor::new(config.unicode_map.clone());
        Self {
            client,
            config,
            extractor,
        }
    }

    /// Replace the lyrics extractor, e.g. to use different markers.
    pub fn with_extractor(mut self, extractor: LyricsExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn extractor(&self) -> &LyricsExtractor {
        &self.extractor
    }

    /// URL of the search endpoint for `keyword` and optional paging.
    pub fn search_url(&self, keyword: &str, params: Option<SearchParams>) -> String {
        let mut url = format!(
            "{}/search?q={}",
            self.config.api_base_url,
            urlencoding::encode(keyword)
        );
        if let Some(params) = params {
            if let Some(page) = params.page {
                url.push_str(&format!("&page={page}"));
            }
            if let Some(per_page) = params.per_page {
                url.push_str(&format!("&per_page={per_page}"));
            }
        }
        url
    }

    /// URL of the lyrics page for a song path.
    pub fn lyrics_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.config.lyrics_base_url)
        } else {
            format!("{}/{path}", self.config.lyrics_base_url)
        }
    }

    /// Search the metadata API for `keyword`.
    ///
    /// Returns the response body untouched; use
    /// [`SongParser`](crate::SongParser) to turn it into song records.
    pub async fn search(
        &self,
        keyword: &str,
        params: Option<SearchParams>,
    ) -> Result<SearchResponse> {
        if keyword.trim().is_empty() {
            return Err(CollabError::InvalidArgument(
                "The keyword cannot be empty. Please provide a valid keyword and try the request again.".to_string(),
            ));
        }

        let url = self.search_url(keyword, params);
        log::debug!("Searching for '{keyword}' ({params:?})");
        self.get(&url, RequestKind::Api).await
    }

    /// Fetch the raw HTML of the lyrics page at `path`.
    pub async fn fetch_lyrics_page(&self, path: &str) -> Result<String> {
        if path.trim().is_empty() {
            return Err(CollabError::InvalidArgument(
                "The path cannot be empty. Please provide a valid path and try the request again.".to_string(),
            ));
        }

        let url = self.lyrics_url(path);
        let page = self.get(&url, RequestKind::Page).await?;
        log::debug!("Lyrics page {} returned {} chars", page.url, page.body.len());
        Ok(page.body)
    }

    async fn get(&self, url: &str, kind: RequestKind) -> Result<SearchResponse> {
        match tokio::time::timeout(
            self.config.request_timeout,
            self.get_with_redirects(url, kind),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                log::debug!(
                    "GET {url} exceeded {:?} timeout",
                    self.config.request_timeout
                );
                Err(CollabError::Timeout {
                    url: url.to_string(),
                })
            }
        }
    }

    async fn get_with_redirects(&self, url: &str, kind: RequestKind) -> Result<SearchResponse> {
        let mut current = Url::parse(url)
            .map_err(|e| CollabError::InvalidArgument(format!("Invalid URL {url}: {e}")))?;
        let mut redirect_count = 0;
        let authorization = self.config.authorization_header();

        loop {
            let mut request = Request::new(Method::Get, current.clone());
            match kind {
                RequestKind::Api => add_api_headers(&mut request, &authorization),
                RequestKind::Page => add_page_headers(&mut request, &authorization),
            }

            log::debug!("GET {current}");
            let mut response = self
                .client
                .send(request)
                .await
                .map_err(|e| transport_error(current.as_str(), e))?;
            let status = response.status();
            log::debug!("GET {current} -> {status}");

            // Handle redirects manually
            if status.is_redirection() {
                let location = response
                    .header("location")
                    .and_then(|h| h.get(0))
                    .ok_or_else(|| CollabError::Request {
                        url: current.to_string(),
                        message: format!("{status} redirect without a Location header"),
                    })?;

                if redirect_count >= self.config.max_redirects {
                    return Err(CollabError::TooManyRedirects {
                        url: current.to_string(),
                        limit: self.config.max_redirects,
                    });
                }

                let next = current
                    .join(location.as_str())
                    .map_err(|e| CollabError::Request {
                        url: current.to_string(),
                        message: format!("invalid redirect location '{location}': {e}"),
                    })?;
                log::debug!("Following redirect from {current} to {next}");
                current = next;
                redirect_count += 1;
                continue;
            }

            let code: u16 = status.into();
            if let Some(class) = StatusClass::from_status(code) {
                return Err(CollabError::HttpStatus {
                    status: code,
                    reason: status.canonical_reason().to_string(),
                    class,
                    url: current.to_string(),
                });
            }

            let body = response
                .body_string()
                .await
                .map_err(|e| transport_error(current.as_str(), e))?;

            return Ok(SearchResponse {
                url: current.to_string(),
                status: code,
                body,
            });
        }
    }
}

fn transport_error(url: &str, error: http_types::Error) -> CollabError {
    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::TimedOut {
            return CollabError::Timeout {
                url: url.to_string(),
            };
        }
    }

    CollabError::Request {
        url: url.to_string(),
        message: error.to_string(),
    }
}

#[async_trait(?Send)]
impl LyricsSource for GeniusClient {
    async fn fetch_lyrics(&self, path: &str) -> Result<String> {
        let html = self.fetch_lyrics_page(path).await?;
        Ok(self.extractor.extract_from_html(&html))
    }
}
