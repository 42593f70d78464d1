use std::ops::Range;
use std::time::Duration;

/// Status recorded for a request that never received an HTTP response.
pub const TRANSPORT_FAILURE_STATUS: u16 = 0;

const SUCCESS_STATUS_RANGE: Range<u16> = 200..300;

/// Outcome of one dispatched request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeResult {
    pub status_code: u16,
    pub elapsed: Duration,
}

impl ProbeResult {
    #[must_use]
    pub const fn new(status_code: u16, elapsed: Duration) -> Self {
        Self {
            status_code,
            elapsed,
        }
    }

    #[must_use]
    pub const fn transport_failure(elapsed: Duration) -> Self {
        Self::new(TRANSPORT_FAILURE_STATUS, elapsed)
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        SUCCESS_STATUS_RANGE.contains(&self.status_code)
    }

    #[must_use]
    pub const fn is_transport_failure(&self) -> bool {
        self.status_code == TRANSPORT_FAILURE_STATUS
    }
}

/// Statistics for one batch, derived from scratch from its probe results.
///
/// Rates are fixed-point with two decimals: `success_rate_x100 == 7000`
/// means 70.00 %, `throughput_x100 == 20000` means 200.00 requests/s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateReport {
    pub total: u64,
    pub successful: u64,
    pub failed: u64,
    pub transport_failures: u64,
    pub success_rate_x100: u64,
    pub mean: Duration,
    pub median: Duration,
    pub min: Duration,
    pub max: Duration,
    pub p95: Duration,
    pub p99: Duration,
    pub throughput_x100: u64,
    pub wall_clock: Duration,
}
