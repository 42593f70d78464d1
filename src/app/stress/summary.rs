use colored::Colorize;

use crate::app::console;
use crate::app::format::{format_secs, format_x100};
use crate::app::verdict::{AVERAGE_FINE_PER_X100, OverallVerdict, Verdict};
use crate::metrics::AggregateReport;

/// Result of one endpoint whose batch ran to completion.
#[derive(Debug, Clone)]
pub(crate) struct EndpointOutcome {
    pub(crate) path: String,
    pub(crate) report: AggregateReport,
    pub(crate) verdict: Verdict,
}

impl EndpointOutcome {
    pub(crate) fn new(path: String, report: AggregateReport) -> Self {
        let verdict = Verdict::from_success_rate(report.success_rate_x100);
        Self {
            path,
            report,
            verdict,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PlanSummary {
    pub(crate) outcomes: Vec<EndpointOutcome>,
    /// Mean of the per-endpoint success rates (x100, rounded), zero with no
    /// outcomes. The verdict is decided on the unrounded mean.
    pub(crate) average_success_x100: u64,
    pub(crate) verdict: OverallVerdict,
    pub(crate) interrupted: bool,
}

impl PlanSummary {
    pub(crate) fn from_outcomes(outcomes: Vec<EndpointOutcome>, interrupted: bool) -> Self {
        let count = u128::try_from(outcomes.len()).unwrap_or(u128::MAX);
        let rate_sum = outcomes.iter().fold(0u128, |sum, outcome| {
            sum.saturating_add(fine_success_rate(&outcome.report))
        });
        let average_fine = rate_sum.checked_div(count).unwrap_or(0);
        let rounded = average_fine
            .saturating_add(AVERAGE_FINE_PER_X100 / 2)
            .checked_div(AVERAGE_FINE_PER_X100)
            .unwrap_or(0);
        Self {
            outcomes,
            average_success_x100: u64::try_from(rounded).unwrap_or(u64::MAX),
            verdict: OverallVerdict::from_average(average_fine),
            interrupted,
        }
    }
}

/// Success rate from the raw counts, scaled past x100 so averaging several
/// endpoints does not compound the per-endpoint flooring.
fn fine_success_rate(report: &AggregateReport) -> u128 {
    u128::from(report.successful)
        .saturating_mul(10_000)
        .saturating_mul(AVERAGE_FINE_PER_X100)
        .checked_div(u128::from(report.total))
        .unwrap_or(0)
}

pub(super) fn print_endpoint_outcome(outcome: &EndpointOutcome) {
    let report = &outcome.report;
    console::section_header(&format!("Results: {}", outcome.path));
    console::field("Total Requests", &report.total.to_string());
    console::field(
        "Successful",
        &format!(
            "{} ({}%)",
            report.successful,
            format_x100(report.success_rate_x100)
        ),
    );
    console::field("Failed", &report.failed.to_string());
    if report.transport_failures > 0 {
        console::field("No Response", &report.transport_failures.to_string());
    }
    console::field("Avg Response", &format_secs(report.mean));
    console::field("Median Response", &format_secs(report.median));
    console::field("Min Response", &format_secs(report.min));
    console::field("Max Response", &format_secs(report.max));
    console::field("95th Percentile", &format_secs(report.p95));
    console::field("99th Percentile", &format_secs(report.p99));
    console::field("Requests/sec", &format_x100(report.throughput_x100));
    console::field("Total Time", &format_secs(report.wall_clock));
    println!();
    print_verdict(outcome.verdict);
}

fn print_verdict(verdict: Verdict) {
    match verdict {
        Verdict::Passed => console::success(&format!("{} (>= 99% success)", verdict)),
        Verdict::Warning => console::warning(&format!("{} (>= 95% success)", verdict)),
        Verdict::Failed => console::failure(&format!("{} (< 95% success)", verdict)),
    }
}

pub(super) fn print_plan_summary(summary: &PlanSummary) {
    console::banner("STRESS TEST SUMMARY");
    if summary.outcomes.is_empty() {
        console::warning("No endpoint completed.");
    }
    for outcome in &summary.outcomes {
        let report = &outcome.report;
        println!("\n{}", outcome.path.bold());
        console::field(
            "Success Rate",
            &format!("{}%", format_x100(report.success_rate_x100)),
        );
        console::field("Avg Response", &format_secs(report.mean));
        console::field("Requests/sec", &format_x100(report.throughput_x100));
        console::field("Verdict", outcome.verdict.label());
    }
    if summary.interrupted {
        println!();
        console::warning("Run was interrupted; remaining endpoints were skipped.");
    }

    println!();
    let line = format!(
        "Overall: {} (average success {}%)",
        summary.verdict,
        format_x100(summary.average_success_x100)
    );
    match summary.verdict {
        OverallVerdict::Passed => console::success(&line),
        OverallVerdict::NeedsImprovement => console::warning(&line),
    }
}
