// file: src/environment/dockerfile.rs
// version: 1.0.0
// guid: 9e3b7c41-2a58-4f0d-8c16-d4a9e07f5b23

//! Dockerfile for the Civo CLI environment

use crate::config::{Platform, RunnerConfig};

/// Label set on every image so leftovers can be found with `--filter`
pub const EPHEMERAL_LABEL: &str = "io.civo-cluster.ephemeral=true";

const ARCHIVE_PATH: &str = "/tmp/civo.tar.gz";
const INSTALL_PATH: &str = "/usr/local/bin/civo";

/// Render the build recipe for one platform.
///
/// Each step runs in its own layer so a failed download stops the build
/// at that step (`curl -f` turns HTTP errors into a non-zero exit).
pub fn render(config: &RunnerConfig, platform: &Platform) -> String {
    let steps = [
        format!("FROM {}", config.base_image),
        format!("LABEL {}", EPHEMERAL_LABEL),
        "RUN apk add --no-cache curl".to_string(),
        format!(
            "RUN curl -fsSL -o {} {}",
            ARCHIVE_PATH,
            config.release_url(platform)
        ),
        format!("RUN tar -xzf {} -C /tmp", ARCHIVE_PATH),
        format!("RUN mv /tmp/civo {}", INSTALL_PATH),
        format!("RUN chmod +x {}", INSTALL_PATH),
        "ENTRYPOINT [\"civo\"]".to_string(),
    ];

    let mut dockerfile = steps.join("\n");
    dockerfile.push('\n');
    dockerfile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_default_dockerfile() {
        let config = RunnerConfig::default();
        let dockerfile = render(&config, &Platform::new("linux", "amd64"));
        let lines: Vec<&str> = dockerfile.lines().collect();

        assert_eq!(lines.first(), Some(&"FROM alpine:latest"));
        assert!(lines.contains(&"RUN apk add --no-cache curl"));
        assert!(lines.contains(
            &"RUN curl -fsSL -o /tmp/civo.tar.gz https://github.com/civo/cli/releases/download/v1.0.75/civo-1.0.75-linux-amd64.tar.gz"
        ));
        assert!(lines.contains(&"RUN tar -xzf /tmp/civo.tar.gz -C /tmp"));
        assert!(lines.contains(&"RUN chmod +x /usr/local/bin/civo"));
        assert_eq!(lines.last(), Some(&"ENTRYPOINT [\"civo\"]"));
    }

    #[test]
    fn test_render_follows_config() {
        let config = RunnerConfig {
            civo_version: "1.1.2".to_string(),
            base_image: "alpine:3.20".to_string(),
            ..Default::default()
        };
        let dockerfile = render(&config, &Platform::new("linux", "arm64"));

        assert!(dockerfile.starts_with("FROM alpine:3.20\n"));
        assert!(dockerfile.contains("/v1.1.2/civo-1.1.2-linux-arm64.tar.gz"));
    }
}
