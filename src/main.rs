// file: src/main.rs
// version: 1.1.0
// guid: h8i9j0k1-l2m3-4567-8901-234567hijklm

//! civo-cluster - Main entry point

use civo_cluster::{
    cli::{
        args::{Cli, Commands},
        commands::*,
    },
    environment,
    logging::logger,
    CreateOptions, Result,
};
use clap::Parser;
use tokio::signal;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logger::init_logger(cli.verbose, cli.quiet)?;

    let config = resolve_config(&cli)?;
    let runtime = config.runtime.clone();

    // The command future is dropped before cleanup, killing any running child
    let shutdown_signal = async {
        if signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
        warn!("Received Ctrl+C, aborting");
    };

    let command_future = async {
        match cli.command {
            Commands::ClusterList {
                api_token_env,
                region,
            } => cluster_list_command(config, &api_token_env, &region).await,
            Commands::ClusterShow {
                api_token_env,
                region,
                name,
            } => cluster_show_command(config, &api_token_env, &region, &name).await,
            Commands::ClusterCreate {
                api_token_env,
                region,
                name,
                node_count,
                node_size,
                k3s_version,
            } => {
                let options = CreateOptions {
                    node_count,
                    node_size,
                    version: k3s_version,
                };
                cluster_create_command(config, &api_token_env, &region, &name, options).await
            }
            Commands::Version => version_command(config).await,
        }
    };

    let outcome = tokio::select! {
        result = command_future => Some(result),
        _ = shutdown_signal => None,
    };

    match outcome {
        Some(result) => result,
        None => {
            warn!("Interrupted by user, removing containers and images of this run");
            environment::cleanup_session(&runtime).await;
            std::process::exit(130); // Standard exit code for Ctrl+C
        }
    }
}
