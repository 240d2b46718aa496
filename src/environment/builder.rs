// file: src/environment/builder.rs
// version: 1.1.0
// guid: 6b1e9d35-7f24-4a8c-b0e2-83c5d9a1f674

//! Builds a fresh Civo CLI image for each operation

use super::{dockerfile, Environment};
use crate::config::{Platform, RunnerConfig};
use crate::credential::Credential;
use crate::error::{ClusterError, Stage};
use crate::network::ReleaseCheck;
use crate::utils::SystemUtils;
use crate::Result;
use tokio::process::Command;
use tracing::{debug, info};

const IMAGE_REPOSITORY: &str = "civo-cluster-env";
const CONTAINER_PREFIX: &str = "civo-cluster-run";
const PLATFORM_FORMAT: &str = "{{.Server.Os}}/{{.Server.Arch}}";

/// Environment builder driving a Docker-compatible runtime
pub struct EnvironmentBuilder {
    config: RunnerConfig,
}

impl EnvironmentBuilder {
    /// Create a new environment builder
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Build an environment, attaching `credential` when given.
    ///
    /// Every step either succeeds or returns a setup error; no partially
    /// built image is handed back.
    pub async fn build(&self, credential: Option<Credential>) -> Result<Environment> {
        self.ensure_runtime()?;

        let platform = self.detect_platform().await?;
        info!("Preparing Civo CLI {} for {}", self.config.civo_version, platform);

        if self.config.preflight {
            ReleaseCheck::new()
                .ensure_reachable(&self.config.release_url(&platform))
                .await?;
        }

        let tag = Self::unique_tag();
        self.build_image(&tag, &platform).await?;

        Ok(Environment::new(
            tag,
            Self::unique_container_name(),
            platform,
            self.config.runtime.clone(),
            credential,
        ))
    }

    fn ensure_runtime(&self) -> Result<()> {
        if SystemUtils::command_exists(&self.config.runtime) {
            Ok(())
        } else {
            Err(ClusterError::PlatformError(format!(
                "Container runtime '{}' not found",
                self.config.runtime
            )))
        }
    }

    /// Ask the runtime which os/arch its containers run on
    pub async fn detect_platform(&self) -> Result<Platform> {
        let mut command = Command::new(&self.config.runtime);
        command.args(["version", "--format", PLATFORM_FORMAT]);

        let output = SystemUtils::execute_captured(
            command,
            None,
            self.config.timeout(),
            Stage::Setup,
        )
        .await
        .map_err(|e| match e {
            ClusterError::ProcessError { stderr, .. } => ClusterError::PlatformError(stderr),
            other => other,
        })?;

        if !output.status.success() {
            return Err(ClusterError::PlatformError(format!(
                "{} version exited with {:?}: {}",
                self.config.runtime,
                output.status.code(),
                SystemUtils::diagnostics(&output)
            )));
        }

        let platform: Platform = String::from_utf8_lossy(&output.stdout).parse()?;
        debug!("Detected runtime platform {}", platform);
        Ok(platform)
    }

    async fn build_image(&self, tag: &str, platform: &Platform) -> Result<()> {
        let recipe = dockerfile::render(&self.config, platform);
        debug!("Building {} from:\n{}", tag, recipe);

        let mut command = Command::new(&self.config.runtime);
        command.args([
            "build",
            "--platform",
            platform.as_runtime_platform().as_str(),
            "--label",
            super::session_label().as_str(),
            "--tag",
            tag,
            "-",
        ]);

        let output = SystemUtils::execute_captured(
            command,
            Some(recipe.as_bytes()),
            self.config.timeout(),
            Stage::Setup,
        )
        .await
        .map_err(|e| match e {
            ClusterError::ProcessError { stderr, .. } => ClusterError::BuildError(stderr),
            other => other,
        })?;

        if !output.status.success() {
            return Err(ClusterError::BuildError(format!(
                "{} build exited with {:?}: {}",
                self.config.runtime,
                output.status.code(),
                SystemUtils::diagnostics(&output)
            )));
        }

        info!("Built environment image {}", tag);
        Ok(())
    }

    fn unique_tag() -> String {
        format!("{}:{}", IMAGE_REPOSITORY, uuid::Uuid::new_v4().simple())
    }

    fn unique_container_name() -> String {
        format!("{}-{}", CONTAINER_PREFIX, uuid::Uuid::new_v4().simple())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_tags_differ() {
        let first = EnvironmentBuilder::unique_tag();
        let second = EnvironmentBuilder::unique_tag();

        assert!(first.starts_with("civo-cluster-env:"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_unique_container_names_differ() {
        let first = EnvironmentBuilder::unique_container_name();
        let second = EnvironmentBuilder::unique_container_name();

        assert!(first.starts_with("civo-cluster-run-"));
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_missing_runtime_is_platform_error() {
        let builder = EnvironmentBuilder::new(RunnerConfig {
            runtime: "nonexistent-runtime-12345".to_string(),
            ..Default::default()
        });

        let err = builder.build(None).await.unwrap_err();
        assert!(matches!(err, ClusterError::PlatformError(_)));
        assert!(err.is_setup_failure());
    }

    #[tokio::test]
    async fn test_failing_runtime_fails_platform_detection() {
        // `false` exists everywhere and always exits 1
        let builder = EnvironmentBuilder::new(RunnerConfig {
            runtime: "false".to_string(),
            preflight: false,
            ..Default::default()
        });

        let err = builder.detect_platform().await.unwrap_err();
        assert!(matches!(err, ClusterError::PlatformError(_)));
    }
}
