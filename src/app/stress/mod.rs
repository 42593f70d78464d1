//! Multi-endpoint stress plan: pre-flight, one bounded batch per endpoint,
//! per-endpoint and overall verdicts.
mod plan;
mod runner;
mod summary;


pub(crate) use runner::run_stress;
pub(crate) use summary::PlanSummary;
