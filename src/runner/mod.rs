// file: src/runner/mod.rs
// version: 1.1.0
// guid: 4e8c1a7b-d2f9-4063-9b5e-0c6a3f8d2e17

//! Runs one Civo CLI command inside a built environment

pub mod cache_buster;
pub mod invocation;

pub use invocation::{ClusterCommand, CreateOptions};

use crate::credential::CREDENTIAL_ENV_VAR;
use crate::environment::{dockerfile::EPHEMERAL_LABEL, session_label, Environment};
use crate::error::{ClusterError, Stage};
use crate::utils::SystemUtils;
use crate::Result;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error, info, warn};

/// Executes commands with `<runtime> run --rm`
pub struct CommandRunner {
    timeout: Option<Duration>,
}

impl CommandRunner {
    /// Create a runner; `timeout` bounds the container run
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Runtime arguments for one run.
    ///
    /// The container is named and labelled so it can be found and removed
    /// if the runtime client is killed before `--rm` takes effect.
    /// The credential is passed by name only (`-e CIVO_TOKEN`); its value
    /// travels in the runtime process environment, never on the command line.
    pub fn run_args(env: &Environment, marker: &str, command: &ClusterCommand) -> Vec<String> {
        let mut args = vec![
            "run".to_string(),
            "--rm".to_string(),
            "--name".to_string(),
            env.container().to_string(),
            "--label".to_string(),
            EPHEMERAL_LABEL.to_string(),
            "--label".to_string(),
            session_label(),
            "--env".to_string(),
            format!("{}={}", cache_buster::CACHE_BUSTER_VAR, marker),
        ];

        if env.has_credential() {
            args.push("--env".to_string());
            args.push(CREDENTIAL_ENV_VAR.to_string());
        }

        args.push(env.image().to_string());
        args.extend(command.args());
        args
    }

    /// Run `command` and return its stdout.
    ///
    /// A non-zero exit becomes a `ProcessError` carrying the tool's
    /// diagnostic text. On timeout the named container is force-removed
    /// before the `Timeout` error is returned.
    pub async fn run(&self, env: &Environment, command: &ClusterCommand) -> Result<String> {
        let marker = cache_buster::marker();
        let args = Self::run_args(env, &marker, command);
        let command_line = format!("civo {}", command.args().join(" "));

        info!("Running: {}", command_line);
        debug!("{} {}", env.runtime(), args.join(" "));

        let mut process = Command::new(env.runtime());
        process.args(&args);
        if let Some(credential) = env.credential() {
            process.env(CREDENTIAL_ENV_VAR, credential.expose());
        }

        let output =
            match SystemUtils::execute_captured(process, None, self.timeout, Stage::Execution)
                .await
            {
                Ok(output) => output,
                Err(e @ ClusterError::Timeout { .. }) => {
                    warn!("{} timed out, removing {}", command_line, env.container());
                    env.remove_container().await;
                    return Err(e);
                }
                Err(e) => return Err(e),
            };

        if !output.status.success() {
            let exit_code = output.status.code();
            let diagnostics = SystemUtils::diagnostics(&output);
            error!("{} failed with exit code {:?}", command_line, exit_code);

            return Err(ClusterError::ProcessError {
                command: command_line,
                exit_code,
                stderr: diagnostics,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
