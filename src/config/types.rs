use std::time::Duration;

use serde::Deserialize;

use crate::args::parse_duration_arg;
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub timeout: Option<DurationValue>,
    pub preflight_path: Option<String>,
    pub preflight_timeout: Option<DurationValue>,
    pub pause: Option<DurationValue>,
    pub no_pause: Option<bool>,
    pub requests: Option<usize>,
    #[serde(alias = "concurrency")]
    pub workers: Option<usize>,
    pub export_json: Option<String>,
    pub no_color: Option<bool>,
    pub endpoints: Option<Vec<EndpointConfig>>,
    pub smoke: Option<SmokeConfig>,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    pub path: String,
    pub requests: Option<usize>,
    #[serde(alias = "concurrency")]
    pub workers: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct SmokeConfig {
    pub api_prefix: Option<String>,
    pub credentials: Option<Vec<CredentialConfig>>,
    pub report_md: Option<String>,
    pub export_json: Option<String>,
}

#[derive(Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct CredentialConfig {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A duration given either as whole seconds or as a string with a unit.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}
