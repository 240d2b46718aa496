// file: src/network/release.rs
// version: 1.1.0
// guid: u1v2w3x4-y5z6-7890-1234-567890uvwxyz

//! Release archive reachability check

use crate::error::ClusterError;
use crate::Result;
use std::time::Duration;
use tracing::{debug, info};

const CHECK_TIMEOUT: Duration = Duration::from_secs(20);

/// Checks that a release archive can be fetched before an image build
/// spends time on it
pub struct ReleaseCheck {
    client: reqwest::Client,
}

impl ReleaseCheck {
    /// Create a new release check
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fail with a `NetworkError` unless a HEAD request on `url` succeeds
    pub async fn ensure_reachable(&self, url: &str) -> Result<()> {
        debug!("Checking release archive: {}", url);

        let response = self
            .client
            .head(url)
            .timeout(CHECK_TIMEOUT)
            .send()
            .await
            .map_err(|e| ClusterError::NetworkError(format!("Failed to reach {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(ClusterError::NetworkError(format!(
                "Release archive {} returned status: {}",
                url,
                response.status()
            )));
        }

        if let Some(size) = response.content_length() {
            info!("Release archive available ({} bytes)", size);
        }
        Ok(())
    }
}

impl Default for ReleaseCheck {
    fn default() -> Self {
        Self::new()
    }
}
