// file: src/error.rs
// version: 1.1.0
// guid: 3f0c9a52-6d1e-4b7a-9e48-c2a17d5b80f3

use std::fmt;
use thiserror::Error;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, ClusterError>;

/// Which part of an operation an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Configuration or credential could not be resolved
    Config,
    /// The execution environment could not be prepared
    Setup,
    /// The Civo CLI ran and failed
    Execution,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Config => write!(f, "configuration"),
            Stage::Setup => write!(f, "environment setup"),
            Stage::Execution => write!(f, "command execution"),
        }
    }
}

/// Error types for civo-cluster
#[derive(Error, Debug)]
pub enum ClusterError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Credential error: {0}")]
    CredentialError(String),

    #[error("Platform detection failed: {0}")]
    PlatformError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Environment build failed: {0}")]
    BuildError(String),

    #[error("Command '{command}' failed with exit code {exit_code:?}: {stderr}")]
    ProcessError {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Timed out after {secs}s during {stage}")]
    Timeout { stage: Stage, secs: u64 },

    #[error("IO error during {stage}: {source}")]
    ChildIoError {
        stage: Stage,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl ClusterError {
    /// Classify the error by the stage that produced it
    pub fn stage(&self) -> Stage {
        match self {
            ClusterError::ConfigError(_)
            | ClusterError::CredentialError(_)
            | ClusterError::YamlError(_) => Stage::Config,
            ClusterError::PlatformError(_)
            | ClusterError::NetworkError(_)
            | ClusterError::BuildError(_)
            | ClusterError::IoError(_) => Stage::Setup,
            ClusterError::ProcessError { .. } => Stage::Execution,
            ClusterError::Timeout { stage, .. } | ClusterError::ChildIoError { stage, .. } => {
                *stage
            }
        }
    }

    /// True when the environment could not be prepared
    pub fn is_setup_failure(&self) -> bool {
        self.stage() == Stage::Setup
    }

    /// True when the Civo CLI itself reported failure
    pub fn is_execution_failure(&self) -> bool {
        self.stage() == Stage::Execution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_classification() {
        assert_eq!(
            ClusterError::PlatformError("no runtime".into()).stage(),
            Stage::Setup
        );
        assert_eq!(
            ClusterError::BuildError("curl: (22) 404".into()).stage(),
            Stage::Setup
        );
        assert_eq!(
            ClusterError::CredentialError("unset".into()).stage(),
            Stage::Config
        );

        let failed = ClusterError::ProcessError {
            command: "civo k3s list".into(),
            exit_code: Some(1),
            stderr: "invalid region".into(),
        };
        assert!(failed.is_execution_failure());
        assert!(!failed.is_setup_failure());
    }

    #[test]
    fn test_timeout_keeps_its_stage() {
        let err = ClusterError::Timeout {
            stage: Stage::Setup,
            secs: 30,
        };
        assert!(err.is_setup_failure());
        assert_eq!(err.to_string(), "Timed out after 30s during environment setup");
    }

    #[test]
    fn test_child_io_error_keeps_its_stage() {
        let err = ClusterError::ChildIoError {
            stage: Stage::Execution,
            source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed"),
        };
        assert!(err.is_execution_failure());
        assert!(!err.is_setup_failure());
        assert_eq!(
            err.to_string(),
            "IO error during command execution: pipe closed"
        );

        let plain = ClusterError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "config.yaml",
        ));
        assert!(plain.is_setup_failure());
    }

    #[test]
    fn test_process_error_carries_diagnostics() {
        let err = ClusterError::ProcessError {
            command: "civo k3s get missing".into(),
            exit_code: Some(1),
            stderr: "Error: cluster not found".into(),
        };
        let message = err.to_string();
        assert!(message.contains("civo k3s get missing"));
        assert!(message.contains("Error: cluster not found"));
    }
}
