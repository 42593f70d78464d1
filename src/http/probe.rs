use futures_util::StreamExt;
use reqwest::Client;
use tokio::time::Instant;
use tracing::warn;
use url::Url;

use crate::metrics::ProbeResult;

/// Sends one GET and records its status and latency.
///
/// Anything that prevents a full response (timeout, refused connection,
/// DNS, a broken body) is recorded as status 0 instead of an error.
#[must_use]
pub async fn probe(client: &Client, url: &Url) -> ProbeResult {
    let started = Instant::now();
    let status = match client.get(url.clone()).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            match drain_body(response).await {
                Ok(()) => Some(status),
                Err(err) => {
                    warn!("Response body from {} failed: {}", url, err);
                    None
                }
            }
        }
        Err(err) => {
            warn!("Request to {} failed: {}", url, err);
            None
        }
    };
    let elapsed = started.elapsed();
    status.map_or_else(
        || ProbeResult::transport_failure(elapsed),
        |code| ProbeResult::new(code, elapsed),
    )
}

/// Reads the body to completion, discarding it.
///
/// # Errors
///
/// Returns the transport error when the body stream breaks.
pub async fn drain_body(response: reqwest::Response) -> Result<(), reqwest::Error> {
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        chunk?;
    }
    Ok(())
}
