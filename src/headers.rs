use http_client::Request;

/// User agent sent with every request
const USER_AGENT: &str = concat!("genius-collab/", env!("CARGO_PKG_VERSION"));

/// Add headers shared by API and lyrics page requests
pub fn add_common_headers(request: &mut Request, authorization: &str) {
    let _ = request.insert_header("User-Agent", USER_AGENT);
    let _ = request.insert_header("Accept-Language", "en-US,en;q=0.9");
    // Sent to the lyrics host too, which ignores it
    let _ = request.insert_header("Authorization", authorization);
}

/// Add headers for metadata API requests
pub fn add_api_headers(request: &mut Request, authorization: &str) {
    add_common_headers(request, authorization);
    let _ = request.insert_header("Accept", "application/json");
}

/// Add headers for lyrics page requests
pub fn add_page_headers(request: &mut Request, authorization: &str) {
    add_common_headers(request, authorization);
    let _ = request.insert_header(
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
    );
}
