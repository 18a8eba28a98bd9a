use genius_collab::{ClientConfig, GeniusClient};
use serde::Serialize;

/// Create a client from `GENIUS_*` environment variables.
pub fn create_client() -> Result<GeniusClient, Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let http_client = http_client::native::NativeClient::new();
    Ok(GeniusClient::new(Box::new(http_client), config))
}

/// Pretty-print a value as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
