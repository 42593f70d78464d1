use std::num::NonZeroUsize;

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveUsize(NonZeroUsize);

impl PositiveUsize {
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for PositiveUsize {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(value)
            .map(PositiveUsize)
            .ok_or(ValidationError::ValueTooSmall { min: 1 })
    }
}

impl std::str::FromStr for PositiveUsize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s
            .trim()
            .parse()
            .map_err(|err| ValidationError::InvalidNumber { source: err })?;
        PositiveUsize::try_from(value)
    }
}

impl From<PositiveUsize> for usize {
    fn from(value: PositiveUsize) -> Self {
        value.get()
    }
}

/// One endpoint to stress, as given on the CLI or in the config file.
///
/// Missing counts fall back to the run-wide `--requests` / `--workers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointArg {
    pub path: String,
    pub requests: Option<PositiveUsize>,
    pub workers: Option<PositiveUsize>,
}

impl EndpointArg {
    #[must_use]
    pub fn requests_or(&self, default: PositiveUsize) -> PositiveUsize {
        self.requests.unwrap_or(default)
    }

    #[must_use]
    pub fn workers_or(&self, default: PositiveUsize) -> PositiveUsize {
        self.workers.unwrap_or(default)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
