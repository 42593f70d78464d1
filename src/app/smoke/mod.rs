//! Functional smoke checks against the service's health, auth, branch and
//! account routes.
mod auth;
mod checks;
mod report;
mod runner;


pub(crate) use checks::CheckLog;
pub(crate) use runner::run_smoke;
