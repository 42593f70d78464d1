//! Probe results and their reduction into aggregate latency statistics.
mod aggregate;
mod percentiles;
mod types;

#[cfg(test)]
mod tests;

pub use aggregate::ratio_x100;
pub use types::{AggregateReport, ProbeResult, TRANSPORT_FAILURE_STATUS};
