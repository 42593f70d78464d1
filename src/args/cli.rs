use clap::{Args, Parser, Subcommand};
use std::time::Duration;

use super::defaults::{
    DEFAULT_API_PREFIX, DEFAULT_BASE_URL, DEFAULT_PAUSE, DEFAULT_PREFLIGHT_PATH,
    DEFAULT_PREFLIGHT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, DEFAULT_REQUESTS, DEFAULT_WORKERS,
};
use super::parsers::{
    parse_credential, parse_duration_arg, parse_endpoint, parse_positive_usize,
};
use super::types::{Credential, EndpointArg, PositiveUsize};

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the functional API smoke checks instead of the stress plan
    Smoke(SmokeArgs),
}

#[derive(Debug, Args, Clone)]
pub struct SmokeArgs {
    /// Path prefix of the versioned API routes
    #[arg(long = "api-prefix", default_value = DEFAULT_API_PREFIX)]
    pub api_prefix: String,

    /// Login credential in 'EMAIL:PASSWORD' format (repeatable, tried in order)
    #[arg(long = "credential", value_parser = parse_credential)]
    pub credentials: Vec<Credential>,

    /// Write a Markdown report of every check to this path
    #[arg(long = "report-md")]
    pub report_md: Option<String>,

    /// Write the check results as JSON to this path
    #[arg(long = "export-json")]
    pub export_json: Option<String>,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Stress and smoke-check client for the iPhone Service HTTP API: bounded worker pool, nearest-rank latency stats, and pass/warn/fail verdicts."
)]
pub struct TesterArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to config file (TOML or JSON); defaults to ./servstress.toml or ./servstress.json
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// Base URL of the service under test
    #[arg(long = "base-url", short = 'b', default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Endpoint to stress as 'PATH[:REQUESTS[:WORKERS]]' (repeatable)
    #[arg(long = "endpoint", short = 'e', value_parser = parse_endpoint)]
    pub endpoints: Vec<EndpointArg>,

    /// Requests per endpoint when the endpoint does not set its own
    #[arg(long, short = 'n', default_value = DEFAULT_REQUESTS, value_parser = parse_positive_usize)]
    pub requests: PositiveUsize,

    /// Concurrent workers per endpoint when the endpoint does not set its own
    #[arg(long, short = 'w', alias = "concurrency", default_value = DEFAULT_WORKERS, value_parser = parse_positive_usize)]
    pub workers: PositiveUsize,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", short = 't', default_value = DEFAULT_REQUEST_TIMEOUT, value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Health path probed before any load is sent
    #[arg(long = "preflight-path", default_value = DEFAULT_PREFLIGHT_PATH)]
    pub preflight_path: String,

    /// Timeout of the health probe (supports ms/s/m/h)
    #[arg(long = "preflight-timeout", default_value = DEFAULT_PREFLIGHT_TIMEOUT, value_parser = parse_duration_arg)]
    pub preflight_timeout: Duration,

    /// Pause between endpoints (supports ms/s/m/h)
    #[arg(long, default_value = DEFAULT_PAUSE, value_parser = parse_duration_arg)]
    pub pause: Duration,

    /// Start the next endpoint immediately
    #[arg(long = "no-pause")]
    pub no_pause: bool,

    /// Write the stress summary as JSON to this path
    #[arg(long = "export-json")]
    pub export_json: Option<String>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}
