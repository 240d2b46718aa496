// file: src/cli/args.rs
// version: 2.0.0
// guid: f6g7h8i9-j0k1-2345-6789-012345fghijk

//! Command line argument definitions

use crate::credential::CREDENTIAL_ENV_VAR;
use crate::runner::invocation::{DEFAULT_K3S_VERSION, DEFAULT_NODE_COUNT, DEFAULT_NODE_SIZE};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "civo-cluster")]
#[command(about = "Manage Civo k3s clusters through a containerised Civo CLI")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(short, long, global = true, help = "Runner configuration file (YAML)")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Docker-compatible container runtime binary")]
    pub runtime: Option<String>,

    #[arg(long, global = true, help = "Deadline in seconds for each build and run")]
    pub timeout: Option<u64>,

    #[arg(long, global = true, help = "Civo CLI release to install")]
    pub civo_version: Option<String>,

    #[arg(long, global = true, help = "Skip the release archive reachability check")]
    pub no_preflight: bool,

    #[arg(long, global = true, help = "Keep the built image after the command")]
    pub keep_image: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List clusters in a region
    ClusterList {
        #[arg(long, default_value = CREDENTIAL_ENV_VAR, help = "Environment variable holding the Civo API token")]
        api_token_env: String,

        #[arg(short, long, help = "Region to list clusters in")]
        region: String,
    },

    /// Show details of one cluster
    ClusterShow {
        #[arg(long, default_value = CREDENTIAL_ENV_VAR, help = "Environment variable holding the Civo API token")]
        api_token_env: String,

        #[arg(short, long)]
        region: String,

        #[arg(short, long, help = "Cluster name as shown by cluster-list")]
        name: String,
    },

    /// Create a cluster and wait until it is ready
    ClusterCreate {
        #[arg(long, default_value = CREDENTIAL_ENV_VAR, help = "Environment variable holding the Civo API token")]
        api_token_env: String,

        #[arg(short, long, help = "Region the new cluster should reside in")]
        region: String,

        #[arg(short, long)]
        name: String,

        #[arg(long, default_value = DEFAULT_NODE_COUNT, help = "Number of nodes (the master also acts as a node)")]
        node_count: String,

        #[arg(long, default_value = DEFAULT_NODE_SIZE, help = "Node size, see `civo size list -s kubernetes`")]
        node_size: String,

        #[arg(long = "k3s-version", default_value = DEFAULT_K3S_VERSION, help = "k3s version, e.g. 1.21.2+k3s1")]
        k3s_version: String,
    },

    /// Print the Civo CLI version
    Version,
}
