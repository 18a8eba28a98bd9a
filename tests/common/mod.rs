#![allow(dead_code)]

use async_trait::async_trait;
use genius_collab::{ClientConfig, GeniusClient};
use http_client::{HttpClient, Request, Response};
use http_types::StatusCode;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A canned reply for one URL.
#[derive(Debug, Clone)]
pub struct Route {
    status: u16,
    body: String,
    headers: Vec<(&'static str, String)>,
    delay: Option<Duration>,
    failure: Option<String>,
}

impl Route {
    pub fn ok(body: impl Into<String>) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            headers: Vec::new(),
            delay: None,
            failure: None,
        }
    }

    pub fn redirect(location: &str) -> Self {
        Self::status(301, "").header("Location", location)
    }

    /// The transport fails before any response is produced.
    pub fn transport_failure(message: &str) -> Self {
        let mut route = Self::status(200, "");
        route.failure = Some(message.to_string());
        route
    }

    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// One request as seen by the stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub authorization: Option<String>,
    pub accept: Option<String>,
}

#[derive(Debug, Default)]
pub struct Traffic {
    requests: Mutex<Vec<RecordedRequest>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl Traffic {
    pub fn urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.url.clone())
            .collect()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

/// HTTP client that answers from a fixed URL table. Unknown URLs get a 404.
#[derive(Debug, Default)]
pub struct ScriptedClient {
    routes: HashMap<String, Route>,
    traffic: Arc<Traffic>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, url: &str, route: Route) -> Self {
        self.routes.insert(url.to_string(), route);
        self
    }

    pub fn traffic(&self) -> Arc<Traffic> {
        Arc::clone(&self.traffic)
    }
}

fn header_value(req: &Request, name: &'static str) -> Option<String> {
    req.header(name)
        .and_then(|values| values.get(0))
        .map(|value| value.as_str().to_string())
}

#[async_trait]
impl HttpClient for ScriptedClient {
    async fn send(&self, req: Request) -> Result<Response, http_types::Error> {
        let url = req.url().to_string();
        self.traffic.requests.lock().unwrap().push(RecordedRequest {
            url: url.clone(),
            authorization: header_value(&req, "Authorization"),
            accept: header_value(&req, "Accept"),
        });

        let route = self
            .routes
            .get(&url)
            .cloned()
            .unwrap_or_else(|| Route::status(404, "not found"));

        let now = self.traffic.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.traffic.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = route.delay {
            tokio::time::sleep(delay).await;
        }
        self.traffic.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(message) = route.failure {
            return Err(http_types::Error::from_str(
                StatusCode::InternalServerError,
                message,
            ));
        }

        let mut response = Response::new(route.status);
        for (name, value) in &route.headers {
            response.insert_header(*name, value.as_str());
        }
        response.set_body(route.body);
        Ok(response)
    }
}

pub fn genius_client(scripted: ScriptedClient) -> GeniusClient {
    GeniusClient::new(Box::new(scripted), ClientConfig::new("test-token"))
}

pub fn genius_client_with(scripted: ScriptedClient, config: ClientConfig) -> GeniusClient {
    GeniusClient::new(Box::new(scripted), config)
}

pub fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("fixture {path}: {e}"))
}

pub fn search_url(keyword: &str, page: u32, per_page: u32) -> String {
    format!(
        "http://api.genius.com/search?q={}&page={page}&per_page={per_page}",
        urlencoding::encode(keyword)
    )
}

pub fn lyrics_url(path: &str) -> String {
    format!("https://genius.com{path}")
}

/// A minimal lyrics page in the shape Genius serves.
pub fn lyrics_page(title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{title}</title></head><body>\
         <div class=\"header\">{title} Lyrics</div>\
         <div data-lyrics-container=\"true\">{title} Lyrics[Verse 1]{body}</div>\
         <div class=\"footer\">3Embed</div></body></html>"
    )
}

/// One search hit in the shape the API returns.
pub fn hit(title: &str, path: &str, primary: &[&str], featured: &[&str]) -> serde_json::Value {
    let names = |names: &[&str]| -> Vec<serde_json::Value> {
        names
            .iter()
            .map(|name| serde_json::json!({ "name": name }))
            .collect()
    };
    serde_json::json!({
        "index": "song",
        "type": "song",
        "result": {
            "full_title": title,
            "path": path,
            "primary_artists": names(primary),
            "featured_artists": names(featured),
        }
    })
}

pub fn search_body(hits: Vec<serde_json::Value>) -> String {
    serde_json::json!({ "meta": { "status": 200 }, "response": { "hits": hits } }).to_string()
}

pub fn empty_search_body() -> String {
    search_body(Vec::new())
}
