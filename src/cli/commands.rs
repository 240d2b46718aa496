// file: src/cli/commands.rs
// version: 2.0.0
// guid: g7h8i9j0-k1l2-3456-7890-123456ghijkl

//! Command implementations for the CLI

use super::args::Cli;
use crate::{
    config::{loader::ConfigLoader, RunnerConfig},
    ClusterClient, CreateOptions, Credential, Result,
};
use std::io::Write;
use tracing::info;

/// Resolve runner configuration: file (or defaults), then CLI overrides
pub fn resolve_config(cli: &Cli) -> Result<RunnerConfig> {
    let loader = ConfigLoader::new();
    let mut config = loader.load_or_default(cli.config.as_deref())?;

    if let Some(runtime) = &cli.runtime {
        config.runtime = runtime.clone();
    }
    if let Some(secs) = cli.timeout {
        config.timeout_secs = Some(secs);
    }
    if let Some(version) = &cli.civo_version {
        config.civo_version = version.clone();
    }
    if cli.no_preflight {
        config.preflight = false;
    }
    if cli.keep_image {
        config.keep_image = true;
    }

    config.validate()?;
    Ok(config)
}

/// List clusters in a region
pub async fn cluster_list_command(
    config: RunnerConfig,
    api_token_env: &str,
    region: &str,
) -> Result<()> {
    let credential = Credential::from_env(api_token_env)?;
    info!("Listing clusters in {}", region);

    let client = ClusterClient::new(config)?;
    let output = client.cluster_list(&credential, region).await?;
    emit(&output)
}

/// Show one cluster
pub async fn cluster_show_command(
    config: RunnerConfig,
    api_token_env: &str,
    region: &str,
    name: &str,
) -> Result<()> {
    let credential = Credential::from_env(api_token_env)?;
    info!("Showing cluster {} in {}", name, region);

    let client = ClusterClient::new(config)?;
    let output = client.cluster_show(&credential, region, name).await?;
    emit(&output)
}

/// Create a cluster
pub async fn cluster_create_command(
    config: RunnerConfig,
    api_token_env: &str,
    region: &str,
    name: &str,
    options: CreateOptions,
) -> Result<()> {
    let credential = Credential::from_env(api_token_env)?;
    info!(
        "Creating cluster {} in {} ({} x {}, k3s {})",
        name, region, options.node_count, options.node_size, options.version
    );

    let client = ClusterClient::new(config)?;
    let output = client
        .cluster_create(&credential, region, name, options)
        .await?;
    emit(&output)
}

/// Print the Civo CLI version
pub async fn version_command(config: RunnerConfig) -> Result<()> {
    let client = ClusterClient::new(config)?;
    let output = client.version().await?;
    emit(&output)
}

/// Write captured output to stdout unchanged
fn emit(output: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClusterError;
    use clap::Parser;

    #[test]
    fn test_resolve_config_applies_overrides() {
        let cli = Cli::parse_from([
            "civo-cluster",
            "--runtime",
            "podman",
            "--timeout",
            "120",
            "--civo-version",
            "1.1.0",
            "--no-preflight",
            "version",
        ]);

        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.runtime, "podman");
        assert_eq!(config.timeout_secs, Some(120));
        assert_eq!(config.civo_version, "1.1.0");
        assert!(!config.preflight);
        assert!(!config.keep_image);
    }

    #[test]
    fn test_resolve_config_rejects_zero_timeout() {
        let cli = Cli::parse_from(["civo-cluster", "--timeout", "0", "version"]);
        assert!(resolve_config(&cli).is_err());
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_any_work() {
        let err = cluster_list_command(
            RunnerConfig::default(),
            "CIVO_CLUSTER_TEST_NO_SUCH_TOKEN",
            "NYC1",
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ClusterError::CredentialError(_)));
    }
}
