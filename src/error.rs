use thiserror::Error;

/// Which half of the HTTP error range a failed response fell in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 4xx responses. The request itself needs fixing.
    Client,
    /// 5xx responses. The request looked fine but the server could not serve it.
    Server,
}

impl StatusClass {
    /// Classify a status code, returning `None` for anything outside 400..=599.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            400..=499 => Some(Self::Client),
            500..=599 => Some(Self::Server),
            _ => None,
        }
    }

    fn hint(self) -> &'static str {
        match self {
            Self::Client => "Client error. The request contains invalid syntax or cannot be fulfilled. Please check URL and parameters and try the request again.",
            Self::Server => "Server error. The request appears valid but the server is unable to fulfill it. Please wait a moment and try the request again.",
        }
    }
}

/// Error types for catalog retrieval and collaborator indexing.
///
/// Every failure the crate can produce is one of these variants, so callers
/// can branch on the kind of failure instead of inspecting messages. Transport
/// variants carry the URL that was attempted.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use genius_collab::{ClientConfig, CollabError, GeniusClient, StatusClass};
///
/// #[tokio::main]
/// async fn main() {
///     let config = ClientConfig::from_env().expect("GENIUS_BEARER_TOKEN must be set");
///     let client = GeniusClient::new(Box::new(http_client::native::NativeClient::new()), config);
///
///     match client.search("Kacey Musgraves", None).await {
///         Ok(response) => println!("{} bytes", response.body.len()),
///         Err(CollabError::HttpStatus { class: StatusClass::Server, .. }) => {
///             eprintln!("Genius is having trouble, try again later");
///         }
///         Err(CollabError::Timeout { url }) => eprintln!("Timed out on {url}"),
///         Err(e) => eprintln!("Other error: {e}"),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum CollabError {
    /// An argument the caller passed was unusable, such as an empty keyword or path.
    #[error("{0}")]
    InvalidArgument(String),

    /// The server answered with a 4xx or 5xx status.
    #[error("HTTP {status} Error: {status} {reason}. URL: {url}. {}", .class.hint())]
    HttpStatus {
        status: u16,
        reason: String,
        class: StatusClass,
        url: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("Timeout Error: URL: {url}. The request timed out. Please check your internet connection and try again.")]
    Timeout { url: String },

    /// The redirect chain exceeded the configured limit.
    #[error("Too Many Redirects: more than {limit} redirects. URL: {url}. The request was redirected too many times. Please clear cookies and browser cache and try again.")]
    TooManyRedirects { url: String, limit: u32 },

    /// Any other transport failure (DNS, connection reset, unreadable body).
    #[error("Request Exception: {message}. URL: {url}. Unexpected request exception occurred. Please check URL and parameters and try the request again.")]
    Request { url: String, message: String },

    /// The search payload was not JSON or lacked the expected top-level shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A single hit in the search payload is missing a required key.
    #[error("Malformed entry at hit {index}: missing or invalid key '{key}'. Please confirm the JSON object contains relevant keys.")]
    MalformedEntry { index: usize, key: String },

    /// A whitespace-insertion rule does not compile or lacks exactly two groups.
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Configuration could not be assembled.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CollabError {
    /// Whether a caller-side retry has a reasonable chance of succeeding.
    ///
    /// The crate itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CollabError::Timeout { .. }
                | CollabError::HttpStatus {
                    class: StatusClass::Server,
                    ..
                }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_class_ranges() {
        assert_eq!(StatusClass::from_status(404), Some(StatusClass::Client));
        assert_eq!(StatusClass::from_status(400), Some(StatusClass::Client));
        assert_eq!(StatusClass::from_status(502), Some(StatusClass::Server));
        assert_eq!(StatusClass::from_status(200), None);
        assert_eq!(StatusClass::from_status(302), None);
    }

    #[test]
    fn test_http_status_message_includes_url_and_hint() {
        let error = CollabError::HttpStatus {
            status: 404,
            reason: "Not Found".to_string(),
            class: StatusClass::Client,
            url: "http://api.genius.com/search?q=Kendrick".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "HTTP 404 Error: 404 Not Found. URL: http://api.genius.com/search?q=Kendrick. Client error. The request contains invalid syntax or cannot be fulfilled. Please check URL and parameters and try the request again."
        );

        let error = CollabError::HttpStatus {
            status: 502,
            reason: "Bad Gateway".to_string(),
            class: StatusClass::Server,
            url: "http://api.genius.com/search?q=Sabrina%20Carpenter".to_string(),
        };
        assert!(error.to_string().contains("Server error."));
        assert!(error.to_string().contains("Sabrina%20Carpenter"));
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(CollabError::Timeout {
            url: "u".to_string()
        }
        .is_retryable());
        assert!(CollabError::HttpStatus {
            status: 503,
            reason: "Service Unavailable".to_string(),
            class: StatusClass::Server,
            url: "u".to_string(),
        }
        .is_retryable());
        assert!(!CollabError::HttpStatus {
            status: 404,
            reason: "Not Found".to_string(),
            class: StatusClass::Client,
            url: "u".to_string(),
        }
        .is_retryable());
        assert!(!CollabError::InvalidArgument("empty".to_string()).is_retryable());
    }
}
