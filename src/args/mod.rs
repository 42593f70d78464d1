//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::{Command, SmokeArgs, TesterArgs};
pub use types::{Credential, EndpointArg, PositiveUsize};

pub(crate) use defaults::{DEFAULT_USER_AGENT, default_credentials, default_endpoints};
pub(crate) use parsers::parse_duration_arg;

#[cfg(test)]
pub(crate) use defaults::DEFAULT_API_PREFIX;
