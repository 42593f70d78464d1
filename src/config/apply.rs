use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{Credential, EndpointArg, PositiveUsize, SmokeArgs, TesterArgs};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, CredentialConfig, DurationValue, EndpointConfig, SmokeConfig};

/// Applies configuration values to CLI arguments.
///
/// Values passed on the command line always win over the config file.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_config(
    args: &mut TesterArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "base_url")
        && let Some(base_url) = config.base_url.clone()
    {
        args.base_url = base_url;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = to_duration(timeout, "timeout")?;
    }

    if !is_cli(matches, "preflight_path")
        && let Some(path) = config.preflight_path.clone()
    {
        args.preflight_path = path;
    }

    if !is_cli(matches, "preflight_timeout")
        && let Some(timeout) = config.preflight_timeout.as_ref()
    {
        args.preflight_timeout = to_duration(timeout, "preflight_timeout")?;
    }

    if !is_cli(matches, "pause")
        && let Some(pause) = config.pause.as_ref()
    {
        args.pause = to_duration(pause, "pause")?;
    }

    if !is_cli(matches, "no_pause")
        && let Some(no_pause) = config.no_pause
    {
        args.no_pause = no_pause;
    }

    if !is_cli(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = ensure_positive_usize(requests, "requests")?;
    }

    if !is_cli(matches, "workers")
        && let Some(workers) = config.workers
    {
        args.workers = ensure_positive_usize(workers, "workers")?;
    }

    if !is_cli(matches, "export_json")
        && let Some(path) = config.export_json.clone()
    {
        args.export_json = Some(path);
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    if !is_cli(matches, "endpoints")
        && let Some(endpoints) = config.endpoints.as_ref()
    {
        args.endpoints = convert_endpoints(endpoints)?;
    }

    Ok(())
}

/// Applies the `[smoke]` config section to the smoke subcommand arguments.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_smoke_config(
    args: &mut SmokeArgs,
    matches: &ArgMatches,
    config: &SmokeConfig,
) -> AppResult<()> {
    if !is_cli(matches, "api_prefix")
        && let Some(prefix) = config.api_prefix.clone()
    {
        args.api_prefix = prefix;
    }

    if !is_cli(matches, "credentials")
        && let Some(credentials) = config.credentials.as_ref()
    {
        args.credentials = convert_credentials(credentials)?;
    }

    if !is_cli(matches, "report_md")
        && let Some(path) = config.report_md.clone()
    {
        args.report_md = Some(path);
    }

    if !is_cli(matches, "export_json")
        && let Some(path) = config.export_json.clone()
    {
        args.export_json = Some(path);
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn to_duration(value: &DurationValue, field: &'static str) -> AppResult<std::time::Duration> {
    value
        .to_duration()
        .map_err(|err| AppError::config(ConfigError::InvalidDuration { field, source: err }))
}

fn convert_endpoints(endpoints: &[EndpointConfig]) -> AppResult<Vec<EndpointArg>> {
    if endpoints.is_empty() {
        return Err(AppError::config(ConfigError::EndpointsEmpty));
    }
    let mut converted = Vec::with_capacity(endpoints.len());
    for (index, endpoint) in endpoints.iter().enumerate() {
        let path = endpoint.path.trim();
        if !path.starts_with('/') {
            return Err(AppError::config(ConfigError::EndpointPathNotAbsolute {
                index,
            }));
        }
        let requests = endpoint
            .requests
            .map(|value| ensure_positive_usize(value, &format!("endpoints[{}].requests", index)))
            .transpose()?;
        let workers = endpoint
            .workers
            .map(|value| ensure_positive_usize(value, &format!("endpoints[{}].workers", index)))
            .transpose()?;
        converted.push(EndpointArg {
            path: path.to_owned(),
            requests,
            workers,
        });
    }
    Ok(converted)
}

fn convert_credentials(credentials: &[CredentialConfig]) -> AppResult<Vec<Credential>> {
    let mut converted = Vec::with_capacity(credentials.len());
    for (index, credential) in credentials.iter().enumerate() {
        let email = credential.email.trim();
        if email.is_empty() || credential.password.is_empty() {
            return Err(AppError::config(ConfigError::CredentialFieldEmpty {
                index,
            }));
        }
        converted.push(Credential {
            email: email.to_owned(),
            password: credential.password.clone(),
        });
    }
    Ok(converted)
}
