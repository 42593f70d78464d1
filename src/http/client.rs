use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{AppError, AppResult, HttpError};

const SUPPORTED_SCHEMES: [&str; 2] = ["http", "https"];

/// Builds the shared client used for every request of a run.
///
/// # Errors
///
/// Returns an error when the TLS backend cannot be initialized.
pub fn build_client(request_timeout: Duration) -> AppResult<Client> {
    Client::builder()
        .timeout(request_timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}

/// Validates the base URL of the service under test.
///
/// # Errors
///
/// Returns an error when the URL does not parse or is not http(s).
pub fn parse_base_url(raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|err| {
        AppError::http(HttpError::InvalidUrl {
            url: raw.to_owned(),
            source: err,
        })
    })?;
    ensure_http_scheme(url)
}

/// Joins a path (with an optional query) onto the base URL.
///
/// Any trailing slash on the base is dropped so `http://host/` and
/// `http://host` resolve `/health` identically, and a base path prefix is
/// preserved.
///
/// # Errors
///
/// Returns an error when the joined URL does not parse.
pub fn endpoint_url(base: &Url, path: &str) -> AppResult<Url> {
    let joined = format!("{}{}", base.as_str().trim_end_matches('/'), path);
    let url = Url::parse(&joined).map_err(|err| {
        AppError::http(HttpError::InvalidUrl {
            url: joined.clone(),
            source: err,
        })
    })?;
    ensure_http_scheme(url)
}

fn ensure_http_scheme(url: Url) -> AppResult<Url> {
    if SUPPORTED_SCHEMES.contains(&url.scheme()) {
        Ok(url)
    } else {
        Err(AppError::http(HttpError::UnsupportedScheme {
            scheme: url.scheme().to_owned(),
            url: url.to_string(),
        }))
    }
}
