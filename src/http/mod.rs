//! HTTP plumbing: client construction, single probes, the bounded load
//! harness, and the pre-flight health check.
mod client;
mod harness;
mod preflight;
mod probe;


pub use client::{build_client, endpoint_url, parse_base_url};
pub use harness::run_load;
pub use preflight::check_health;
pub use probe::{drain_body, probe};
