//! Core library for the `servstress` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, configuration parsing, the bounded HTTP load harness, and latency
//! aggregation. The primary user-facing interface is the `servstress`
//! command-line application; library APIs may evolve as the CLI grows.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;

#[cfg(test)]
mod test_server;
