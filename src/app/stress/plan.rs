use std::time::Duration;

use url::Url;

use crate::args::{PositiveUsize, TesterArgs, default_endpoints};
use crate::error::AppResult;
use crate::http::parse_base_url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EndpointPlan {
    pub(crate) path: String,
    pub(crate) requests: PositiveUsize,
    pub(crate) workers: PositiveUsize,
}

/// Everything a stress run needs, resolved from the CLI and config layers.
#[derive(Debug, Clone)]
pub(crate) struct StressPlan {
    pub(crate) base_url: Url,
    pub(crate) preflight_path: String,
    pub(crate) preflight_timeout: Duration,
    pub(crate) request_timeout: Duration,
    /// `None` runs endpoints back to back.
    pub(crate) pause: Option<Duration>,
    pub(crate) endpoints: Vec<EndpointPlan>,
    pub(crate) export_json: Option<String>,
}

impl StressPlan {
    /// Endpoints without explicit counts take `--requests` / `--workers`;
    /// with no endpoints configured the built-in set is used.
    pub(crate) fn from_args(args: &TesterArgs) -> AppResult<Self> {
        let base_url = parse_base_url(&args.base_url)?;
        let configured = if args.endpoints.is_empty() {
            default_endpoints()
        } else {
            args.endpoints.clone()
        };
        let endpoints = configured
            .iter()
            .map(|endpoint| EndpointPlan {
                path: endpoint.path.clone(),
                requests: endpoint.requests_or(args.requests),
                workers: endpoint.workers_or(args.workers),
            })
            .collect();

        Ok(Self {
            base_url,
            preflight_path: args.preflight_path.clone(),
            preflight_timeout: args.preflight_timeout,
            request_timeout: args.request_timeout,
            pause: if args.no_pause || args.pause.is_zero() {
                None
            } else {
                Some(args.pause)
            },
            endpoints,
            export_json: args.export_json.clone(),
        })
    }
}
