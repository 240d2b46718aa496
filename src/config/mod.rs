// file: src/config/mod.rs
// version: 2.0.0
// guid: a1b2c3d4-e5f6-7a8b-9c0d-1e2f3a4b5c6d

//! Configuration module for civo-cluster
//!
//! Handles the pinned Civo CLI version, the container runtime to drive and
//! the per-process deadline.

pub mod loader;
pub mod platform;

pub use platform::Platform;

use crate::error::ClusterError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Civo CLI release baked into every environment unless overridden
pub const DEFAULT_CIVO_VERSION: &str = "1.0.75";

/// Base image the environment is built from
pub const DEFAULT_BASE_IMAGE: &str = "alpine:latest";

/// Docker-compatible runtime binary
pub const DEFAULT_RUNTIME: &str = "docker";

const RELEASE_BASE_URL: &str = "https://github.com/civo/cli/releases/download";

/// Settings shared by every cluster operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Civo CLI release version (without the leading `v`)
    pub civo_version: String,
    /// Image the environment starts from
    pub base_image: String,
    /// Container runtime binary name or path
    pub runtime: String,
    /// Check the release archive URL is reachable before building
    pub preflight: bool,
    /// Deadline applied to each external process
    pub timeout_secs: Option<u64>,
    /// Leave the built image in place after the operation
    pub keep_image: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            civo_version: DEFAULT_CIVO_VERSION.to_string(),
            base_image: DEFAULT_BASE_IMAGE.to_string(),
            runtime: DEFAULT_RUNTIME.to_string(),
            preflight: true,
            timeout_secs: None,
            keep_image: false,
        }
    }
}

impl RunnerConfig {
    /// Validate runner configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.civo_version.trim().is_empty() {
            return Err(ClusterError::ConfigError(
                "civo_version must not be empty".to_string(),
            ));
        }

        if self.civo_version.starts_with('v') {
            return Err(ClusterError::ConfigError(format!(
                "civo_version must not carry a 'v' prefix: {}",
                self.civo_version
            )));
        }

        if self.base_image.trim().is_empty() {
            return Err(ClusterError::ConfigError(
                "base_image must not be empty".to_string(),
            ));
        }

        if self.runtime.trim().is_empty() {
            return Err(ClusterError::ConfigError(
                "runtime must not be empty".to_string(),
            ));
        }

        if self.timeout_secs == Some(0) {
            return Err(ClusterError::ConfigError(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Download URL of the release archive for a platform
    pub fn release_url(&self, platform: &Platform) -> String {
        format!(
            "{base}/v{ver}/civo-{ver}-{suffix}.tar.gz",
            base = RELEASE_BASE_URL,
            ver = self.civo_version,
            suffix = platform.release_suffix()
        )
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RunnerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.civo_version, "1.0.75");
        assert_eq!(config.runtime, "docker");
        assert!(config.preflight);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_release_url() {
        let config = RunnerConfig::default();
        let url = config.release_url(&Platform::new("linux", "arm64"));
        assert_eq!(
            url,
            "https://github.com/civo/cli/releases/download/v1.0.75/civo-1.0.75-linux-arm64.tar.gz"
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = RunnerConfig {
            civo_version: "v1.0.75".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = RunnerConfig {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = RunnerConfig {
            runtime: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
