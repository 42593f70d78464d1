use super::types::{Credential, EndpointArg, PositiveUsize};

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("servstress/", env!("CARGO_PKG_VERSION"));

pub(crate) const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub(crate) const DEFAULT_API_PREFIX: &str = "/api/v1";
pub(crate) const DEFAULT_PREFLIGHT_PATH: &str = "/health";

pub(crate) const DEFAULT_REQUESTS: &str = "1000";
pub(crate) const DEFAULT_WORKERS: &str = "50";
pub(crate) const DEFAULT_REQUEST_TIMEOUT: &str = "10s";
pub(crate) const DEFAULT_PREFLIGHT_TIMEOUT: &str = "5s";
pub(crate) const DEFAULT_PAUSE: &str = "2s";

/// Endpoints exercised when neither the CLI nor the config names any.
const DEFAULT_ENDPOINTS: [(&str, usize, usize); 3] = [
    ("/health", 1000, 50),
    ("/api/v1/branches", 500, 30),
    ("/api/v1/auth/login", 200, 10),
];

/// Accounts tried in order by the smoke suite login step.
const DEFAULT_CREDENTIALS: [(&str, &str); 2] = [
    ("admin@test.com", "Test123!@#"),
    ("test@example.com", "password123"),
];

pub(crate) fn default_endpoints() -> Vec<EndpointArg> {
    DEFAULT_ENDPOINTS
        .iter()
        .map(|(path, requests, workers)| EndpointArg {
            path: (*path).to_owned(),
            requests: PositiveUsize::try_from(*requests).ok(),
            workers: PositiveUsize::try_from(*workers).ok(),
        })
        .collect()
}

pub(crate) fn default_credentials() -> Vec<Credential> {
    DEFAULT_CREDENTIALS
        .iter()
        .map(|(email, password)| Credential {
            email: (*email).to_owned(),
            password: (*password).to_owned(),
        })
        .collect()
}
