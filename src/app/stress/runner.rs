use reqwest::Client;
use tracing::{error, info};

use crate::app::console;
use crate::app::export::export_stress_json;
use crate::app::format::format_secs;
use crate::args::TesterArgs;
use crate::error::AppResult;
use crate::http::{build_client, check_health, endpoint_url, run_load};
use crate::shutdown::{
    ShutdownReceiver, ShutdownSender, interrupt_requested, pause_unless_interrupted,
};

use super::plan::{EndpointPlan, StressPlan};
use super::summary::{EndpointOutcome, PlanSummary, print_endpoint_outcome, print_plan_summary};

/// Runs the full stress flow and returns its summary.
///
/// # Errors
///
/// Returns an error when the plan is invalid, the pre-flight check fails, or
/// the JSON export cannot be written. Individual endpoint failures are
/// logged and skipped.
pub(crate) async fn run_stress(
    args: &TesterArgs,
    shutdown_tx: &ShutdownSender,
) -> AppResult<PlanSummary> {
    let plan = StressPlan::from_args(args)?;
    let mut shutdown_rx = shutdown_tx.subscribe();

    console::banner("servstress: API stress test");
    console::info(&format!("Target: {}", plan.base_url));

    let client = build_client(plan.request_timeout)?;
    let preflight_url = endpoint_url(&plan.base_url, &plan.preflight_path)?;
    console::action("Checking if server is running...");
    check_health(&client, &preflight_url, plan.preflight_timeout).await?;
    console::success("Server is running!");

    let summary = run_plan(&client, &plan, &mut shutdown_rx).await;
    print_plan_summary(&summary);

    if let Some(path) = plan.export_json.as_deref() {
        export_stress_json(path, &plan.base_url, &summary).await?;
        console::success(&format!("Summary written to {}", path));
    }
    Ok(summary)
}

/// Runs each endpoint in order, stopping early on interrupt.
pub(crate) async fn run_plan(
    client: &Client,
    plan: &StressPlan,
    shutdown_rx: &mut ShutdownReceiver,
) -> PlanSummary {
    let mut outcomes = Vec::with_capacity(plan.endpoints.len());
    let mut interrupted = false;
    let mut endpoints = plan.endpoints.iter().peekable();

    while let Some(endpoint) = endpoints.next() {
        if interrupt_requested(shutdown_rx) {
            console::warning("Interrupted; no further endpoints will be started.");
            interrupted = true;
            break;
        }

        match run_endpoint(client, plan, endpoint).await {
            Ok(outcome) => {
                print_endpoint_outcome(&outcome);
                outcomes.push(outcome);
            }
            Err(err) => {
                error!("Stress test of {} failed: {}", endpoint.path, err);
                console::error(&format!("Error testing {}: {}", endpoint.path, err));
            }
        }

        if endpoints.peek().is_none() {
            break;
        }
        if let Some(pause) = plan.pause {
            console::info(&format!("Waiting {} before next test...", format_secs(pause)));
            if pause_unless_interrupted(pause, shutdown_rx).await {
                console::warning("Interrupted during pause; stopping.");
                interrupted = true;
                break;
            }
        }
    }

    PlanSummary::from_outcomes(outcomes, interrupted)
}

async fn run_endpoint(
    client: &Client,
    plan: &StressPlan,
    endpoint: &EndpointPlan,
) -> AppResult<EndpointOutcome> {
    let url = endpoint_url(&plan.base_url, &endpoint.path)?;
    console::section_header(&format!("Testing: {}", endpoint.path));
    console::field("Requests", &endpoint.requests.get().to_string());
    console::field("Workers", &endpoint.workers.get().to_string());
    info!(
        "Starting {} requests against {} with {} workers",
        endpoint.requests.get(),
        url,
        endpoint.workers.get()
    );

    let report = run_load(client, &url, endpoint.requests, endpoint.workers).await;
    Ok(EndpointOutcome::new(endpoint.path.clone(), report))
}
