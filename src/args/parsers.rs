use std::time::Duration;

use super::types::{Credential, EndpointArg, PositiveUsize};
use crate::error::ValidationError;

pub(super) fn parse_positive_usize(s: &str) -> Result<PositiveUsize, ValidationError> {
    s.parse::<PositiveUsize>()
}

/// Parses `PATH`, `PATH:REQUESTS` or `PATH:REQUESTS:WORKERS`.
pub(crate) fn parse_endpoint(s: &str) -> Result<EndpointArg, ValidationError> {
    let value = s.trim();
    let mut parts = value.splitn(3, ':');
    let path = parts
        .next()
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .ok_or_else(|| ValidationError::InvalidEndpointFormat {
            value: value.to_owned(),
        })?;
    if !path.starts_with('/') {
        return Err(ValidationError::EndpointPathNotAbsolute {
            value: value.to_owned(),
        });
    }

    let requests = parts
        .next()
        .map(|raw| parse_endpoint_count(value, "requests", raw))
        .transpose()?;
    let workers = parts
        .next()
        .map(|raw| parse_endpoint_count(value, "workers", raw))
        .transpose()?;

    Ok(EndpointArg {
        path: path.to_owned(),
        requests,
        workers,
    })
}

fn parse_endpoint_count(
    value: &str,
    field: &'static str,
    raw: &str,
) -> Result<PositiveUsize, ValidationError> {
    raw.parse::<PositiveUsize>()
        .map_err(|err| ValidationError::InvalidEndpointCount {
            value: value.to_owned(),
            field,
            source: Box::new(err),
        })
}

/// Parses `EMAIL:PASSWORD`; the password may itself contain ':'.
pub(crate) fn parse_credential(s: &str) -> Result<Credential, ValidationError> {
    let (email, password) = s
        .split_once(':')
        .ok_or(ValidationError::InvalidCredentialFormat)?;
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::CredentialFieldEmpty);
    }
    Ok(Credential {
        email: email.to_owned(),
        password: password.to_owned(),
    })
}

pub(crate) fn parse_duration_arg(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let mut digits_len = 0usize;
    for ch in value.chars() {
        if ch.is_ascii_digit() {
            digits_len = digits_len.saturating_add(1);
        } else {
            break;
        }
    }
    if digits_len == 0 {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;

    let unit = if unit_part.is_empty() { "s" } else { unit_part };
    let duration = match unit {
        "ms" => Duration::from_millis(number),
        "s" => Duration::from_secs(number),
        "m" => {
            let secs = number
                .checked_mul(60)
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        "h" => {
            let secs = number
                .checked_mul(60)
                .and_then(|seconds| seconds.checked_mul(60))
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        _ => {
            return Err(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            });
        }
    };

    if duration.as_millis() == 0 {
        return Err(ValidationError::DurationZero);
    }

    Ok(duration)
}
