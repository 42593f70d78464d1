use thiserror::Error;

#[derive(Debug, Error)]
pub enum SmokeError {
    #[error("Malformed response from {endpoint}: {source}")]
    MalformedResponse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Cannot connect to server at {url}: {source}")]
    ServerUnreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
