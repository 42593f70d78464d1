use std::path::Path;

use chrono::Utc;
use tokio::io::{AsyncWriteExt, BufWriter};
use url::Url;

use crate::error::{AppError, AppResult, ReportError};

use super::format::format_x100;
use super::smoke::CheckLog;
use super::stress::PlanSummary;

pub(crate) fn stress_json(base_url: &Url, summary: &PlanSummary) -> serde_json::Value {
    let endpoints: Vec<serde_json::Value> = summary
        .outcomes
        .iter()
        .map(|outcome| {
            let report = &outcome.report;
            serde_json::json!({
                "path": outcome.path,
                "total": report.total,
                "successful": report.successful,
                "failed": report.failed,
                "transport_failures": report.transport_failures,
                "success_rate": format_x100(report.success_rate_x100),
                "avg_ms": report.mean.as_millis(),
                "median_ms": report.median.as_millis(),
                "min_ms": report.min.as_millis(),
                "max_ms": report.max.as_millis(),
                "p95_ms": report.p95.as_millis(),
                "p99_ms": report.p99.as_millis(),
                "requests_per_second": format_x100(report.throughput_x100),
                "total_time_ms": report.wall_clock.as_millis(),
                "verdict": outcome.verdict.label()
            })
        })
        .collect();

    serde_json::json!({
        "base_url": base_url.as_str(),
        "generated_at": Utc::now().to_rfc3339(),
        "endpoints": endpoints,
        "overall": {
            "completed_endpoints": summary.outcomes.len(),
            "average_success_rate": format_x100(summary.average_success_x100),
            "verdict": summary.verdict.label(),
            "interrupted": summary.interrupted
        }
    })
}

pub(crate) fn smoke_json(base_url: &Url, log: &CheckLog) -> serde_json::Value {
    let checks: Vec<serde_json::Value> = log
        .results()
        .iter()
        .map(|result| {
            serde_json::json!({
                "name": result.name,
                "endpoint": result.endpoint,
                "method": result.method,
                "status_code": result.status_code,
                "passed": result.passed,
                "message": result.message,
                "response_time_ms": result.response_time.as_millis(),
                "timestamp": result.timestamp.to_rfc3339()
            })
        })
        .collect();

    serde_json::json!({
        "base_url": base_url.as_str(),
        "generated_at": Utc::now().to_rfc3339(),
        "summary": {
            "total": log.total(),
            "passed": log.passed(),
            "failed": log.failed(),
            "pass_rate": format_x100(log.passed_x100()),
            "average_response_ms": log.average_response_time().as_millis()
        },
        "checks": checks
    })
}

/// Writes the stress plan summary as pretty JSON.
///
/// # Errors
///
/// Returns an error when the file cannot be created or written.
pub(crate) async fn export_stress_json(
    path: &str,
    base_url: &Url,
    summary: &PlanSummary,
) -> AppResult<()> {
    write_json(path, &stress_json(base_url, summary)).await
}

/// Writes the smoke results as pretty JSON.
///
/// # Errors
///
/// Returns an error when the file cannot be created or written.
pub(crate) async fn export_smoke_json(path: &str, base_url: &Url, log: &CheckLog) -> AppResult<()> {
    write_json(path, &smoke_json(base_url, log)).await
}

async fn write_json(path: &str, payload: &serde_json::Value) -> AppResult<()> {
    let json = serde_json::to_vec_pretty(payload)
        .map_err(|err| AppError::report(ReportError::Serialize { source: err }))?;
    write_file(Path::new(path), &json)
        .await
        .map_err(|err| {
            AppError::report(ReportError::Write {
                path: path.into(),
                source: err,
            })
        })
}

async fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes).await?;
    writer.flush().await?;
    Ok(())
}
