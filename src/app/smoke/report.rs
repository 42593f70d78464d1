use chrono::{DateTime, Utc};
use url::Url;

use crate::app::format::{format_secs, format_x100, write_line};
use crate::error::{AppError, AppResult, ReportError};

use super::checks::{CheckLog, CheckResult};

const PASSED_ICON: &str = "✅";
const FAILED_ICON: &str = "❌";

const RECOMMENDATIONS_ON_FAILURE: [&str; 4] = [
    "Review failed checks and fix issues",
    "Check database connectivity",
    "Verify authentication is working properly",
    "Test with actual data in the database",
];
const RECOMMENDATIONS_ALL_PASSED: [&str; 4] = [
    "All checks passed successfully!",
    "Consider adding more edge case checks",
    "Run the stress plan against the same deployment",
    "Add integration tests",
];

const fn icon(result: &CheckResult) -> &'static str {
    if result.passed {
        PASSED_ICON
    } else {
        FAILED_ICON
    }
}

/// Renders the smoke results as a Markdown document.
pub(super) fn render_markdown(
    log: &CheckLog,
    base_url: &Url,
    generated_at: DateTime<Utc>,
) -> AppResult<String> {
    let mut output = String::new();
    write_line(&mut output, "# API Smoke Check Report")?;
    write_line(
        &mut output,
        &format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC")),
    )?;
    write_line(&mut output, &format!("Base URL: {}", base_url))?;
    write_line(&mut output, "")?;

    write_line(&mut output, "## Executive Summary")?;
    write_line(&mut output, "")?;
    write_line(&mut output, &format!("- **Total Checks:** {}", log.total()))?;
    write_line(
        &mut output,
        &format!(
            "- **Passed:** {} ({}%)",
            log.passed(),
            format_x100(log.passed_x100())
        ),
    )?;
    write_line(
        &mut output,
        &format!(
            "- **Failed:** {} ({}%)",
            log.failed(),
            format_x100(log.failed_x100())
        ),
    )?;
    write_line(
        &mut output,
        &format!(
            "- **Average Response Time:** {}",
            format_secs(log.average_response_time())
        ),
    )?;
    write_line(&mut output, "")?;

    write_line(&mut output, "## Check Results")?;
    write_line(&mut output, "")?;
    for result in log.results() {
        write_line(&mut output, &format!("### {} {}", icon(result), result.name))?;
        write_line(
            &mut output,
            &format!("- **Endpoint:** `{} {}`", result.method, result.endpoint),
        )?;
        write_line(
            &mut output,
            &format!("- **Status Code:** {}", result.status_code),
        )?;
        write_line(
            &mut output,
            &format!(
                "- **Response Time:** {}",
                format_secs(result.response_time)
            ),
        )?;
        write_line(&mut output, &format!("- **Message:** {}", result.message))?;
        write_line(
            &mut output,
            &format!("- **Timestamp:** {}", result.timestamp.to_rfc3339()),
        )?;
        write_line(&mut output, "")?;
    }

    write_line(&mut output, "## Endpoints Tested")?;
    write_line(&mut output, "")?;
    for (endpoint, results) in log.by_endpoint() {
        write_line(&mut output, &format!("### {}", endpoint))?;
        for result in results {
            write_line(
                &mut output,
                &format!(
                    "- {} {} ({}) - {}",
                    icon(result),
                    result.name,
                    result.method,
                    format_secs(result.response_time)
                ),
            )?;
        }
        write_line(&mut output, "")?;
    }

    write_line(&mut output, "## Recommendations")?;
    write_line(&mut output, "")?;
    let recommendations = if log.failed() > 0 {
        RECOMMENDATIONS_ON_FAILURE
    } else {
        RECOMMENDATIONS_ALL_PASSED
    };
    for (index, line) in recommendations.iter().enumerate() {
        write_line(
            &mut output,
            &format!("{}. {}", index.saturating_add(1), line),
        )?;
    }
    Ok(output)
}

/// Renders and writes the Markdown report to `path`.
///
/// # Errors
///
/// Returns an error when rendering fails or the file cannot be written.
pub(super) async fn write_markdown_report(path: &str, log: &CheckLog, base_url: &Url) -> AppResult<()> {
    let content = render_markdown(log, base_url, Utc::now())?;
    tokio::fs::write(path, content).await.map_err(|err| {
        AppError::report(ReportError::Write {
            path: path.into(),
            source: err,
        })
    })
}
