use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unsupported URL scheme '{scheme}' in '{url}'. Use http or https.")]
    UnsupportedScheme { url: String, scheme: String },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Cannot connect to server at {url}: {source}")]
    PreflightUnreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Server at {url} is not responding properly (status {status}).")]
    PreflightStatus { url: String, status: u16 },
}
