// file: src/environment/mod.rs
// version: 1.1.0
// guid: 2d7f4a90-c1e3-4b65-9a08-6f3e1b2c7d45

//! Disposable execution environments holding the Civo CLI

pub mod builder;
pub mod dockerfile;

pub use builder::EnvironmentBuilder;

use crate::config::Platform;
use crate::credential::Credential;
use crate::error::Stage;
use crate::utils::SystemUtils;
use std::sync::OnceLock;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Label key shared by every image and container this process creates
pub const SESSION_LABEL_KEY: &str = "io.civo-cluster.session";

/// Identifier of the current process, stamped on everything it creates
pub fn session_id() -> &'static str {
    static SESSION: OnceLock<String> = OnceLock::new();
    SESSION.get_or_init(|| uuid::Uuid::new_v4().simple().to_string())
}

/// `key=value` label tying images and containers to this process
pub fn session_label() -> String {
    format!("{}={}", SESSION_LABEL_KEY, session_id())
}

/// Remove every container and image labelled with this process's session.
///
/// Used after an interrupt, when the operation futures were dropped
/// before they could clean up. Failures are logged, not returned.
pub async fn cleanup_session(runtime: &str) {
    let filter = format!("label={}", session_label());

    let containers = list_ids(
        runtime,
        &["ps", "--all", "--quiet", "--filter", filter.as_str()],
    )
    .await;
    if !containers.is_empty() {
        let mut args = vec!["rm".to_string(), "--force".to_string()];
        args.extend(containers);
        remove_quietly(runtime, &args, "containers").await;
    }

    let images = list_ids(
        runtime,
        &["image", "ls", "--quiet", "--filter", filter.as_str()],
    )
    .await;
    if !images.is_empty() {
        let mut args = vec!["rmi".to_string(), "--force".to_string()];
        args.extend(images);
        remove_quietly(runtime, &args, "images").await;
    }
}

async fn list_ids(runtime: &str, args: &[&str]) -> Vec<String> {
    let mut command = Command::new(runtime);
    command.args(args);

    match SystemUtils::execute_captured(command, None, None, Stage::Setup).await {
        Ok(output) if output.status.success() => String::from_utf8_lossy(&output.stdout)
            .split_whitespace()
            .map(str::to_string)
            .collect(),
        Ok(output) => {
            warn!(
                "{} {} failed: {}",
                runtime,
                args.join(" "),
                SystemUtils::diagnostics(&output)
            );
            Vec::new()
        }
        Err(e) => {
            warn!("{} {} failed: {}", runtime, args.join(" "), e);
            Vec::new()
        }
    }
}

async fn remove_quietly(runtime: &str, args: &[String], what: &str) {
    let mut command = Command::new(runtime);
    command.args(args);

    match SystemUtils::execute_captured(command, None, None, Stage::Setup).await {
        Ok(output) if output.status.success() => {
            info!("Removed {} left by this session", what);
        }
        Ok(output) => warn!(
            "Failed to remove {}: {}",
            what,
            SystemUtils::diagnostics(&output)
        ),
        Err(e) => warn!("Failed to remove {}: {}", what, e),
    }
}

/// A built image ready to run one Civo command.
///
/// Created per operation and consumed by [`Environment::discard`].
#[derive(Debug)]
pub struct Environment {
    image: String,
    container: String,
    platform: Platform,
    runtime: String,
    credential: Option<Credential>,
}

impl Environment {
    pub(crate) fn new(
        image: String,
        container: String,
        platform: Platform,
        runtime: String,
        credential: Option<Credential>,
    ) -> Self {
        Self {
            image,
            container,
            platform,
            runtime,
            credential,
        }
    }

    /// Image tag the environment was built as
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Name given to the container that runs the command
    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub(crate) fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Force-remove the named run container, e.g. after a timeout killed
    /// the runtime client but left the container itself running.
    pub async fn remove_container(&self) {
        let mut command = Command::new(&self.runtime);
        command.args(["rm", "--force", self.container.as_str()]);

        match SystemUtils::execute_captured(command, None, None, Stage::Execution).await {
            Ok(output) if output.status.success() => {
                debug!("Removed container {}", self.container);
            }
            Ok(output) => {
                warn!(
                    "Failed to remove container {}: {}",
                    self.container,
                    SystemUtils::diagnostics(&output)
                );
            }
            Err(e) => warn!("Failed to remove container {}: {}", self.container, e),
        }
    }

    /// Remove the image from the runtime. Failures are logged, not returned.
    pub async fn discard(self) {
        let mut command = Command::new(&self.runtime);
        command.args(["rmi", "--force", self.image.as_str()]);

        match SystemUtils::execute_captured(command, None, None, Stage::Setup).await {
            Ok(output) if output.status.success() => {
                debug!("Removed image {}", self.image);
            }
            Ok(output) => {
                warn!(
                    "Failed to remove image {}: {}",
                    self.image,
                    SystemUtils::diagnostics(&output)
                );
            }
            Err(e) => warn!("Failed to remove image {}: {}", self.image, e),
        }
    }
}
