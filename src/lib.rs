// file: src/lib.rs
// version: 1.0.0
// guid: d82472d1-7f0f-4eb4-b0a3-6e1547103eb4

//! # civo-cluster
//!
//! Runs the Civo CLI inside a throwaway container to list, inspect and
//! create k3s clusters and to report the CLI version.
//!
//! Every operation builds a fresh image with a pinned Civo CLI release,
//! runs one command in it and returns the captured stdout.

pub mod cli;
pub mod cluster;
pub mod config;
pub mod credential;
pub mod environment;
pub mod error;
pub mod logging;
pub mod network;
pub mod runner;
pub mod utils;

pub use cluster::ClusterClient;
pub use config::RunnerConfig;
pub use credential::Credential;
pub use error::{ClusterError, Result, Stage};
pub use runner::CreateOptions;
