use super::percentiles::{PERCENTILE_P99, median, nearest_rank};
use super::*;
use std::time::Duration;

const fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

const fn ok(latency_ms: u64) -> ProbeResult {
    ProbeResult::new(200, ms(latency_ms))
}

#[test]
fn success_range_is_half_open() -> Result<(), String> {
    let cases = [
        (0, false),
        (199, false),
        (200, true),
        (204, true),
        (299, true),
        (300, false),
        (404, false),
        (503, false),
    ];
    for (status, expected) in cases {
        let result = ProbeResult::new(status, ms(1));
        if result.is_success() != expected {
            return Err(format!("status {} success should be {}", status, expected));
        }
    }
    if !ProbeResult::transport_failure(ms(1)).is_transport_failure() {
        return Err("Expected transport failure marker".to_owned());
    }
    Ok(())
}

#[test]
fn empty_batch_yields_zero_report() -> Result<(), String> {
    let report = AggregateReport::from_results(&[], Duration::ZERO);
    if report.total != 0
        || report.successful != 0
        || report.success_rate_x100 != 0
        || report.throughput_x100 != 0
        || report.p99 != Duration::ZERO
        || report.mean != Duration::ZERO
    {
        return Err(format!("Unexpected empty report: {:?}", report));
    }
    Ok(())
}

#[test]
fn single_sample_fills_every_statistic() -> Result<(), String> {
    let report = AggregateReport::from_results(&[ok(42)], ms(50));
    for (name, value) in [
        ("mean", report.mean),
        ("median", report.median),
        ("min", report.min),
        ("max", report.max),
        ("p95", report.p95),
        ("p99", report.p99),
    ] {
        if value != ms(42) {
            return Err(format!("{} was {:?}", name, value));
        }
    }
    if report.success_rate_x100 != 10_000 {
        return Err(format!("Unexpected rate {}", report.success_rate_x100));
    }
    Ok(())
}

#[test]
fn twenty_samples_put_p95_on_the_maximum() -> Result<(), String> {
    let results: Vec<ProbeResult> = (1..=20).map(ok).collect();
    let report = AggregateReport::from_results(&results, ms(1000));
    if report.p95 != ms(20) || report.p99 != ms(20) {
        return Err(format!("p95 {:?} p99 {:?}", report.p95, report.p99));
    }
    if report.min != ms(1) || report.max != ms(20) {
        return Err(format!("min {:?} max {:?}", report.min, report.max));
    }
    Ok(())
}

#[test]
fn hundred_samples_use_floor_index() -> Result<(), String> {
    let results: Vec<ProbeResult> = (1..=100).rev().map(ok).collect();
    let report = AggregateReport::from_results(&results, ms(1000));
    if report.p95 != ms(96) {
        return Err(format!("p95 {:?}", report.p95));
    }
    if report.p99 != ms(100) {
        return Err(format!("p99 {:?}", report.p99));
    }
    Ok(())
}

#[test]
fn ordering_holds_for_uneven_latencies() -> Result<(), String> {
    let latencies = [3, 900, 14, 14, 250, 7, 61, 1, 480, 33, 12];
    let results: Vec<ProbeResult> = latencies.into_iter().map(ok).collect();
    let report = AggregateReport::from_results(&results, ms(2000));
    let ordered = report.min <= report.median
        && report.median <= report.p95
        && report.p95 <= report.p99
        && report.p99 <= report.max
        && report.min <= report.mean
        && report.mean <= report.max;
    if !ordered {
        return Err(format!("Statistics out of order: {:?}", report));
    }
    Ok(())
}

#[test]
fn even_count_median_averages_middle_pair() -> Result<(), String> {
    let results = [ok(10), ok(40), ok(20), ok(30)];
    let report = AggregateReport::from_results(&results, ms(100));
    if report.median != ms(25) {
        return Err(format!("median {:?}", report.median));
    }
    if report.mean != ms(25) {
        return Err(format!("mean {:?}", report.mean));
    }
    Ok(())
}

#[test]
fn mixed_statuses_count_failures_and_rate() -> Result<(), String> {
    let mut results = Vec::new();
    results.extend((0..70).map(|_| ok(5)));
    results.extend((0..20).map(|_| ProbeResult::new(500, ms(5))));
    results.extend((0..10).map(|_| ProbeResult::transport_failure(ms(5))));
    let report = AggregateReport::from_results(&results, ms(1000));
    if report.total != 100 || report.successful != 70 || report.failed != 30 {
        return Err(format!("Unexpected counts: {:?}", report));
    }
    if report.transport_failures != 10 {
        return Err(format!("transport failures {}", report.transport_failures));
    }
    if report.success_rate_x100 != 7000 {
        return Err(format!("rate {}", report.success_rate_x100));
    }
    Ok(())
}

#[test]
fn throughput_uses_wall_clock_not_latency_sum() -> Result<(), String> {
    let results: Vec<ProbeResult> = (0..100).map(|_| ok(50)).collect();
    let report = AggregateReport::from_results(&results, ms(500));
    if report.throughput_x100 != 20_000 {
        return Err(format!("throughput {}", report.throughput_x100));
    }
    if report.wall_clock != ms(500) {
        return Err(format!("wall clock {:?}", report.wall_clock));
    }
    Ok(())
}

#[test]
fn nearest_rank_clamps_to_last_sample() -> Result<(), String> {
    let sorted = [ms(1), ms(2), ms(3)];
    if nearest_rank(&sorted, 100) != ms(3) {
        return Err("Expected clamp to the last sample".to_owned());
    }
    if nearest_rank(&[], PERCENTILE_P99) != Duration::ZERO {
        return Err("Expected zero for empty input".to_owned());
    }
    if median(&[]) != Duration::ZERO {
        return Err("Expected zero median for empty input".to_owned());
    }
    Ok(())
}
