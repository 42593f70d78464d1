use chrono::Utc;
use colored::Colorize;
use reqwest::{Client, Method, StatusCode};
use tokio::time::Instant;
use tracing::{error, info, warn};
use url::Url;

use crate::app::console;
use crate::app::export::export_smoke_json;
use crate::app::format::{format_secs, format_x100};
use crate::args::{Credential, SmokeArgs, TesterArgs, default_credentials};
use crate::error::{AppError, AppResult, SmokeError};
use crate::http::{build_client, drain_body, endpoint_url, parse_base_url};

use super::auth::{LoginRequest, Session, decode_login, error_message};
use super::checks::{
    AUTHENTICATED_GROUPS, BRANCH_GROUP, CheckGroup, CheckLog, CheckResult, CheckSpec, HEALTH_GROUP,
    Scope,
};
use super::report::write_markdown_report;

const LOGIN_CHECK: &str = "User Login";
const LOGIN_PATH: &str = "/auth/login";
const ALL_LOGINS_FAILED_STATUS: u16 = 401;

/// Where the suite sends its requests.
#[derive(Debug, Clone)]
pub(super) struct SmokeTarget {
    pub(super) base_url: Url,
    pub(super) api_prefix: String,
}

impl SmokeTarget {
    fn url_for(&self, scope: Scope, target: &str) -> AppResult<Url> {
        match scope {
            Scope::Root => endpoint_url(&self.base_url, target),
            Scope::Api => endpoint_url(&self.base_url, &self.api_path(target)),
        }
    }

    fn api_path(&self, path: &str) -> String {
        format!("{}{}", self.api_prefix.trim_end_matches('/'), path)
    }

    fn label(&self, scope: Scope, label: &str) -> String {
        match scope {
            Scope::Root => label.to_owned(),
            Scope::Api => self.api_path(label),
        }
    }
}

/// Runs the smoke suite end to end and writes the requested reports.
///
/// # Errors
///
/// Returns an error when the base URL is invalid, the server cannot be
/// reached at all, or a report cannot be written. Individual check failures
/// are recorded, not returned.
pub(crate) async fn run_smoke(args: &TesterArgs, smoke: &SmokeArgs) -> AppResult<CheckLog> {
    let target = SmokeTarget {
        base_url: parse_base_url(&args.base_url)?,
        api_prefix: smoke.api_prefix.clone(),
    };
    let credentials = if smoke.credentials.is_empty() {
        default_credentials()
    } else {
        smoke.credentials.clone()
    };

    console::banner("servstress: API smoke checks");
    console::info(&format!("Base URL: {}", target.base_url));
    console::info(&format!("API prefix: {}", target.api_prefix));

    let client = build_client(args.request_timeout)?;
    check_availability(&client, &target, args).await?;

    let log = run_suite(&client, &target, &credentials).await?;
    print_smoke_summary(&log);

    if let Some(path) = smoke.report_md.as_deref() {
        write_markdown_report(path, &log, &target.base_url).await?;
        console::success(&format!("Markdown report written to {}", path));
    }
    if let Some(path) = smoke.export_json.as_deref() {
        export_smoke_json(path, &target.base_url, &log).await?;
        console::success(&format!("JSON results written to {}", path));
    }
    Ok(log)
}

async fn check_availability(
    client: &Client,
    target: &SmokeTarget,
    args: &TesterArgs,
) -> AppResult<()> {
    let url = target.url_for(Scope::Root, &args.preflight_path)?;
    console::action("Checking server availability...");
    let response = client
        .get(url.clone())
        .timeout(args.preflight_timeout)
        .send()
        .await
        .map_err(|err| {
            AppError::smoke(SmokeError::ServerUnreachable {
                url: url.to_string(),
                source: err,
            })
        })?;
    let status = response.status();
    drop(drain_body(response).await);
    if status == StatusCode::OK {
        console::success("Server is running!");
    } else {
        warn!("Availability probe returned {}", status);
        console::warning(&format!("Server returned status code: {}", status.as_u16()));
    }
    Ok(())
}

/// Runs every check group in order and collects the results.
///
/// # Errors
///
/// Returns an error only when a check URL cannot be built.
pub(super) async fn run_suite(
    client: &Client,
    target: &SmokeTarget,
    credentials: &[Credential],
) -> AppResult<CheckLog> {
    let mut log = CheckLog::default();
    run_group(client, target, &HEALTH_GROUP, None, &mut log).await?;

    console::banner("AUTHENTICATION TESTS");
    let session = login(client, target, credentials, &mut log).await?;
    if session.is_none() {
        console::warning("Authentication failed, some checks will be skipped");
    }

    run_group(client, target, &BRANCH_GROUP, None, &mut log).await?;
    for group in &AUTHENTICATED_GROUPS {
        run_group(client, target, group, session.as_ref(), &mut log).await?;
    }
    Ok(log)
}

async fn run_group(
    client: &Client,
    target: &SmokeTarget,
    group: &CheckGroup,
    session: Option<&Session>,
    log: &mut CheckLog,
) -> AppResult<()> {
    console::banner(group.title);
    if group.requires_auth && session.is_none() {
        console::warning(&format!(
            "Skipping {} checks: no authentication token",
            group.subject
        ));
        return Ok(());
    }
    for check in group.checks {
        let result = run_check(client, target, check, session).await?;
        print_check(&result);
        log.record(result);
    }
    Ok(())
}

async fn run_check(
    client: &Client,
    target: &SmokeTarget,
    check: &CheckSpec,
    session: Option<&Session>,
) -> AppResult<CheckResult> {
    let url = target.url_for(check.scope, check.target)?;
    let endpoint = target.label(check.scope, check.label);
    console::action(&format!("Testing: GET {}", endpoint));

    let mut request = client.request(Method::GET, url);
    if let Some(session) = session {
        request = request.bearer_auth(&session.token);
    }

    let started = Instant::now();
    let outcome = match request.send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            drop(drain_body(response).await);
            Ok(status)
        }
        Err(err) => Err(err),
    };
    let response_time = started.elapsed();

    let (status_code, passed, message) = match outcome {
        Ok(status) if check.accepts(status) => (
            status,
            true,
            format!("{} (status {})", check.passed_message, status),
        ),
        Ok(status) => (
            status,
            false,
            format!("{} (status {})", check.failed_message, status),
        ),
        Err(err) => {
            warn!("{} request failed: {}", check.name, err);
            (0, false, format!("{}: {}", check.failed_message, err))
        }
    };

    Ok(CheckResult {
        name: check.name.to_owned(),
        endpoint,
        method: "GET",
        status_code,
        passed,
        message,
        response_time,
        timestamp: Utc::now(),
    })
}

/// Tries each credential in order; the first decodable 200 wins.
async fn login(
    client: &Client,
    target: &SmokeTarget,
    credentials: &[Credential],
    log: &mut CheckLog,
) -> AppResult<Option<Session>> {
    let url = target.url_for(Scope::Api, LOGIN_PATH)?;
    let endpoint = target.label(Scope::Api, LOGIN_PATH);

    for credential in credentials {
        console::action(&format!(
            "Testing: POST {} (with {})",
            endpoint, credential.email
        ));
        let started = Instant::now();
        let sent = client
            .post(url.clone())
            .json(&LoginRequest {
                email: &credential.email,
                password: &credential.password,
            })
            .send()
            .await;
        let response = match sent {
            Ok(response) => response,
            Err(err) => {
                console::warning(&format!("Login failed: {}", err));
                continue;
            }
        };
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                console::warning(&format!("Login failed: {}", err));
                continue;
            }
        };
        let response_time = started.elapsed();

        if status != StatusCode::OK {
            let reason = error_message(&body).unwrap_or_else(|| "Unknown error".to_owned());
            console::warning(&format!("Login failed: {}", reason));
            continue;
        }

        match decode_login(&endpoint, &body) {
            Ok(session) => {
                info!(
                    "Logged in as {} (user {})",
                    credential.email,
                    session.user_id.as_deref().unwrap_or("unknown")
                );
                let message = format!("Login successful with {}", credential.email);
                console::success(&message);
                log.record(login_result(&endpoint, status.as_u16(), true, message, response_time));
                return Ok(Some(session));
            }
            Err(err) => {
                error!("{}", err);
                console::failure(&err.to_string());
                log.record(login_result(
                    &endpoint,
                    status.as_u16(),
                    false,
                    err.to_string(),
                    response_time,
                ));
            }
        }
    }

    console::failure("All login attempts failed");
    log.record(login_result(
        &endpoint,
        ALL_LOGINS_FAILED_STATUS,
        false,
        "All login attempts failed".to_owned(),
        std::time::Duration::ZERO,
    ));
    Ok(None)
}

fn login_result(
    endpoint: &str,
    status_code: u16,
    passed: bool,
    message: String,
    response_time: std::time::Duration,
) -> CheckResult {
    CheckResult {
        name: LOGIN_CHECK.to_owned(),
        endpoint: endpoint.to_owned(),
        method: "POST",
        status_code,
        passed,
        message,
        response_time,
        timestamp: Utc::now(),
    }
}

fn print_check(result: &CheckResult) {
    let line = format!(
        "Status: {} ({})",
        result.status_code,
        format_secs(result.response_time)
    );
    if result.passed {
        console::success(&line);
    } else {
        console::failure(&format!("{} - {}", line, result.message));
    }
}

fn print_smoke_summary(log: &CheckLog) {
    console::banner("TEST SUMMARY");
    println!("{}", format!("Total Checks: {}", log.total()).bold());
    println!(
        "{}",
        format!(
            "Passed: {} ({}%)",
            log.passed(),
            format_x100(log.passed_x100())
        )
        .green()
    );
    println!(
        "{}",
        format!(
            "Failed: {} ({}%)",
            log.failed(),
            format_x100(log.failed_x100())
        )
        .red()
    );
    println!(
        "{}",
        format!(
            "Average Response Time: {}",
            format_secs(log.average_response_time())
        )
        .blue()
    );
}
