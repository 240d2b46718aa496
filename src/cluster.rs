// file: src/cluster.rs
// version: 1.1.0
// guid: 71c5e2a9-3b08-4d6f-9e14-a2d87b0c6f53

//! Public cluster operations.
//!
//! Each call builds its own environment, runs exactly one Civo command in
//! it and removes it again. Nothing is shared between calls, so a single
//! client can serve concurrent operations.

use crate::config::RunnerConfig;
use crate::credential::Credential;
use crate::error::ClusterError;
use crate::environment::EnvironmentBuilder;
use crate::logging::logger::with_async_operation_span;
use crate::runner::{ClusterCommand, CommandRunner, CreateOptions};
use crate::Result;
use tracing::{debug, info};

/// Entry point for listing, inspecting and creating Civo k3s clusters
#[derive(Debug, Clone, Default)]
pub struct ClusterClient {
    config: RunnerConfig,
}

impl ClusterClient {
    /// Create a client after validating `config`
    pub fn new(config: RunnerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// `civo k3s list --region <region>`
    pub async fn cluster_list(&self, credential: &Credential, region: &str) -> Result<String> {
        self.execute(
            Some(credential),
            ClusterCommand::List {
                region: region.to_string(),
            },
        )
        .await
    }

    /// `civo k3s get <name> --region <region>`
    pub async fn cluster_show(
        &self,
        credential: &Credential,
        region: &str,
        name: &str,
    ) -> Result<String> {
        self.execute(
            Some(credential),
            ClusterCommand::Show {
                region: region.to_string(),
                name: name.to_string(),
            },
        )
        .await
    }

    /// `civo k3s create <name> ... --wait`
    ///
    /// Not idempotent: a second call asks Civo for a second cluster.
    pub async fn cluster_create(
        &self,
        credential: &Credential,
        region: &str,
        name: &str,
        options: CreateOptions,
    ) -> Result<String> {
        self.execute(
            Some(credential),
            ClusterCommand::Create {
                region: region.to_string(),
                name: name.to_string(),
                options,
            },
        )
        .await
    }

    /// `civo version`, run without a credential
    pub async fn version(&self) -> Result<String> {
        self.execute(None, ClusterCommand::Version).await
    }

    async fn execute(
        &self,
        credential: Option<&Credential>,
        command: ClusterCommand,
    ) -> Result<String> {
        with_async_operation_span(command.name(), || self.run_once(credential, &command)).await
    }

    /// Credential to attach for `command`: required for cluster commands,
    /// never attached to commands that do not need one.
    fn attach_credential(
        credential: Option<&Credential>,
        command: &ClusterCommand,
    ) -> Result<Option<Credential>> {
        if !command.requires_credential() {
            return Ok(None);
        }

        credential.cloned().map(Some).ok_or_else(|| {
            ClusterError::CredentialError(format!("{} requires an API token", command.name()))
        })
    }

    /// Build, run, discard
    async fn run_once(
        &self,
        credential: Option<&Credential>,
        command: &ClusterCommand,
    ) -> Result<String> {
        let credential = Self::attach_credential(credential, command)?;

        let builder = EnvironmentBuilder::new(self.config.clone());
        let env = builder.build(credential).await?;

        let result = CommandRunner::new(self.config.timeout())
            .run(&env, command)
            .await;

        if self.config.keep_image {
            info!("Keeping environment image {}", env.image());
        } else {
            env.discard().await;
        }

        if result.is_ok() {
            debug!("{} completed", command.name());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_config() {
        let result = ClusterClient::new(RunnerConfig {
            civo_version: String::new(),
            ..Default::default()
        });
        assert!(matches!(result, Err(ClusterError::ConfigError(_))));
    }

    #[test]
    fn test_credential_attached_only_when_required() {
        let token = Credential::new("token");
        let list = ClusterCommand::List {
            region: "NYC1".to_string(),
        };

        let attached = ClusterClient::attach_credential(Some(&token), &list).unwrap();
        assert!(attached.is_some());

        let attached =
            ClusterClient::attach_credential(Some(&token), &ClusterCommand::Version).unwrap();
        assert!(attached.is_none());
    }

    #[test]
    fn test_missing_credential_is_config_error() {
        let list = ClusterCommand::List {
            region: "NYC1".to_string(),
        };

        let err = ClusterClient::attach_credential(None, &list).unwrap_err();
        assert!(matches!(err, ClusterError::CredentialError(_)));
        assert_eq!(err.stage(), crate::Stage::Config);
    }

    #[tokio::test]
    async fn test_setup_failure_is_reported_before_running() {
        let client = ClusterClient::new(RunnerConfig {
            runtime: "nonexistent-runtime-12345".to_string(),
            preflight: false,
            ..Default::default()
        })
        .unwrap();

        let err = client
            .cluster_list(&Credential::new("token"), "NYC1")
            .await
            .unwrap_err();

        assert!(err.is_setup_failure());
    }
}
