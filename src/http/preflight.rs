use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::info;
use url::Url;

use crate::error::{AppError, AppResult, HttpError};

use super::probe::drain_body;

/// Confirms the service answers its health path with 200 before any load is
/// sent.
///
/// # Errors
///
/// Returns `PreflightUnreachable` when no response arrives within `timeout`
/// and `PreflightStatus` for any status other than 200.
pub async fn check_health(client: &Client, url: &Url, timeout: Duration) -> AppResult<()> {
    let response = client
        .get(url.clone())
        .timeout(timeout)
        .send()
        .await
        .map_err(|err| {
            AppError::http(HttpError::PreflightUnreachable {
                url: url.to_string(),
                source: err,
            })
        })?;
    let status = response.status();
    drop(drain_body(response).await);
    if status != StatusCode::OK {
        return Err(AppError::http(HttpError::PreflightStatus {
            url: url.to_string(),
            status: status.as_u16(),
        }));
    }
    info!("Pre-flight check against {} succeeded", url);
    Ok(())
}
