use std::sync::Arc;

use reqwest::Client;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error};
use url::Url;

use crate::args::PositiveUsize;
use crate::metrics::{AggregateReport, ProbeResult};

use super::probe::probe;

/// Issues `requests` GETs against `url` with at most `workers` in flight and
/// reduces them into a report.
///
/// The dispatcher waits for a free permit before spawning each task, so
/// submission blocks while the pool is saturated. Every task hands its
/// result back through its join handle; a task that panics is recorded as a
/// transport failure so the report always covers exactly `requests` probes.
///
/// The pool never holds more permits than there are requests, so any
/// `workers` value is accepted.
#[must_use]
pub async fn run_load(
    client: &Client,
    url: &Url,
    requests: PositiveUsize,
    workers: PositiveUsize,
) -> AggregateReport {
    let total = requests.get();
    let pool = workers.get().min(total).min(Semaphore::MAX_PERMITS);
    let permits = Arc::new(Semaphore::new(pool));
    let mut handles: Vec<(Instant, JoinHandle<ProbeResult>)> = Vec::with_capacity(total);

    let started = Instant::now();
    for _ in 0..total {
        let permit = match Arc::clone(&permits).acquire_owned().await {
            Ok(permit) => permit,
            Err(err) => {
                error!("Worker pool closed early: {}", err);
                break;
            }
        };
        let client = client.clone();
        let url = url.clone();
        let dispatched = Instant::now();
        let handle = tokio::spawn(async move {
            let result = probe(&client, &url).await;
            drop(permit);
            result
        });
        handles.push((dispatched, handle));
    }

    let mut results = Vec::with_capacity(handles.len());
    for (dispatched, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(err) => {
                error!("Probe task failed: {}", err);
                ProbeResult::transport_failure(dispatched.elapsed())
            }
        };
        results.push(result);
    }
    let wall_clock = started.elapsed();

    debug!(
        "Completed {} requests against {} in {} ms",
        results.len(),
        url,
        wall_clock.as_millis()
    );
    AggregateReport::from_results(&results, wall_clock)
}
