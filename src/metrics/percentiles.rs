use std::time::Duration;

pub(super) const PERCENTILE_P95: u64 = 95;
pub(super) const PERCENTILE_P99: u64 = 99;
const PERCENT_DIVISOR: u64 = 100;

/// Nearest-rank percentile over an ascending slice.
///
/// Picks index `floor(count * percentile / 100)` with no interpolation, so
/// small samples are biased high (one sample: every percentile is that
/// sample; twenty samples: p95 is the maximum).
pub(super) fn nearest_rank(sorted: &[Duration], percentile: u64) -> Duration {
    let count = u64::try_from(sorted.len()).unwrap_or(u64::MAX);
    let index = count
        .saturating_mul(percentile)
        .checked_div(PERCENT_DIVISOR)
        .unwrap_or(0);
    let last = sorted.len().saturating_sub(1);
    let idx = usize::try_from(index).map_or(last, |idx| idx.min(last));
    sorted.get(idx).copied().unwrap_or(Duration::ZERO)
}

/// Statistical median: the middle sample, or the mean of the two middle
/// samples for an even count.
pub(super) fn median(sorted: &[Duration]) -> Duration {
    let len = sorted.len();
    let mid = len.checked_div(2).unwrap_or(0);
    if len.checked_rem(2) == Some(1) {
        return sorted.get(mid).copied().unwrap_or(Duration::ZERO);
    }
    let lower = mid.checked_sub(1).and_then(|idx| sorted.get(idx));
    match (lower, sorted.get(mid)) {
        (Some(lower), Some(upper)) => {
            let sum = lower.as_nanos().saturating_add(upper.as_nanos());
            nanos_to_duration(sum.checked_div(2).unwrap_or(0))
        }
        _ => Duration::ZERO,
    }
}

pub(super) fn nanos_to_duration(nanos: u128) -> Duration {
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}
