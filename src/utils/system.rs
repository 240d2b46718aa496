// file: src/utils/system.rs
// version: 2.0.0
// guid: w3x4y5z6-a7b8-9012-3456-789012wxyzab

//! System utility functions

use crate::error::{ClusterError, Stage};
use crate::Result;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// System utility functions
pub struct SystemUtils;

impl SystemUtils {
    /// Check if a command exists in PATH (or is an executable path)
    pub fn command_exists(command: &str) -> bool {
        which::which(command).is_ok()
    }

    /// Run a command to completion, capturing stdout and stderr.
    ///
    /// `stdin` is written to the child and then closed. When `timeout` is
    /// set and expires the child is killed and a `Timeout` error tagged
    /// with `stage` is returned. A non-zero exit is *not* an error here.
    pub async fn execute_captured(
        mut command: Command,
        stdin: Option<&[u8]>,
        timeout: Option<Duration>,
        stage: Stage,
    ) -> Result<Output> {
        command
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let program = command.as_std().get_program().to_string_lossy().to_string();
        let mut child = command.spawn().map_err(|e| ClusterError::ProcessError {
            command: program.clone(),
            exit_code: None,
            stderr: format!("Failed to spawn: {}", e),
        })?;

        let io_error = |source: std::io::Error| ClusterError::ChildIoError { stage, source };

        if let Some(input) = stdin {
            if let Some(mut pipe) = child.stdin.take() {
                pipe.write_all(input).await.map_err(io_error)?;
                pipe.shutdown().await.map_err(io_error)?;
            }
        }

        let output = match timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| ClusterError::Timeout {
                    stage,
                    secs: limit.as_secs(),
                })?
                .map_err(io_error)?,
            None => child.wait_with_output().await.map_err(io_error)?,
        };

        debug!(
            "{} exited with {:?} ({} bytes stdout)",
            program,
            output.status.code(),
            output.stdout.len()
        );
        Ok(output)
    }

    /// Diagnostic text of a failed process: stderr, or stdout if stderr is empty
    pub fn diagnostics(output: &Output) -> String {
        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.trim().is_empty() {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        } else {
            stderr.trim().to_string()
        }
    }
}
