use std::time::Duration;

use super::percentiles::{PERCENTILE_P95, PERCENTILE_P99, median, nanos_to_duration, nearest_rank};
use super::types::{AggregateReport, ProbeResult};

/// Scale for two-decimal percentages (100 % == 10_000).
const PERCENT_X100: u128 = 10_000;
/// Scale for two-decimal per-second rates over nanosecond durations.
const NANOS_PER_SEC_X100: u128 = 100_000_000_000;

impl AggregateReport {
    /// Reduces a batch of probe results into aggregate statistics.
    ///
    /// `wall_clock` is the span from first dispatch to last completion and
    /// drives the throughput figure; it is not the sum of the latencies.
    /// An empty batch yields an all-zero report.
    #[must_use]
    pub fn from_results(results: &[ProbeResult], wall_clock: Duration) -> Self {
        let total = u64::try_from(results.len()).unwrap_or(u64::MAX);
        let successful = u64::try_from(results.iter().filter(|result| result.is_success()).count())
            .unwrap_or(u64::MAX);
        let transport_failures = u64::try_from(
            results
                .iter()
                .filter(|result| result.is_transport_failure())
                .count(),
        )
        .unwrap_or(u64::MAX);
        let failed = total.saturating_sub(successful);

        let mut latencies: Vec<Duration> = results.iter().map(|result| result.elapsed).collect();
        latencies.sort_unstable();

        let latency_sum = latencies
            .iter()
            .fold(0u128, |sum, latency| sum.saturating_add(latency.as_nanos()));
        let mean = nanos_to_duration(
            latency_sum
                .checked_div(u128::from(total))
                .unwrap_or(0),
        );

        Self {
            total,
            successful,
            failed,
            transport_failures,
            success_rate_x100: ratio_x100(successful, total),
            mean,
            median: median(&latencies),
            min: latencies.first().copied().unwrap_or(Duration::ZERO),
            max: latencies.last().copied().unwrap_or(Duration::ZERO),
            p95: nearest_rank(&latencies, PERCENTILE_P95),
            p99: nearest_rank(&latencies, PERCENTILE_P99),
            throughput_x100: throughput_x100(total, wall_clock),
            wall_clock,
        }
    }
}

/// `part / total` as a two-decimal percentage; zero when `total` is zero.
#[must_use]
pub fn ratio_x100(part: u64, total: u64) -> u64 {
    let scaled = u128::from(part)
        .saturating_mul(PERCENT_X100)
        .checked_div(u128::from(total))
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

fn throughput_x100(total: u64, wall_clock: Duration) -> u64 {
    let scaled = u128::from(total)
        .saturating_mul(NANOS_PER_SEC_X100)
        .checked_div(wall_clock.as_nanos())
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}
