// file: src/config/platform.rs
// version: 1.0.0
// guid: 5c2d8f17-93ae-4e06-b7c1-4a6f0d2e9b58

//! Container runtime platform (os/arch pair)

use crate::error::ClusterError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating system and CPU architecture of the container runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    /// Create a platform, normalising architecture aliases
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        let arch = arch.into();
        Self {
            os: os.into().to_lowercase(),
            arch: normalize_arch(&arch).to_string(),
        }
    }

    /// Platform string in runtime notation, e.g. `linux/amd64`
    pub fn as_runtime_platform(&self) -> String {
        format!("{}/{}", self.os, self.arch)
    }

    /// Platform suffix used in Civo CLI release archive names, e.g. `linux-amd64`
    pub fn release_suffix(&self) -> String {
        format!("{}-{}", self.os, self.arch)
    }
}

fn normalize_arch(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        other => other,
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}

impl std::str::FromStr for Platform {
    type Err = ClusterError;

    /// Parse `os/arch[/variant]`; the variant is dropped
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('/');
        match (parts.next(), parts.next()) {
            (Some(os), Some(arch)) if !os.is_empty() && !arch.is_empty() => {
                Ok(Platform::new(os, arch.to_lowercase()))
            }
            _ => Err(ClusterError::PlatformError(format!(
                "Unrecognised platform string: '{}'",
                s.trim()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_platform() {
        let platform: Platform = "linux/amd64".parse().unwrap();
        assert_eq!(platform, Platform::new("linux", "amd64"));
        assert_eq!(platform.release_suffix(), "linux-amd64");
        assert_eq!(platform.as_runtime_platform(), "linux/amd64");
    }

    #[test]
    fn test_parse_platform_with_variant_and_alias() {
        let platform: Platform = "linux/arm64/v8\n".parse().unwrap();
        assert_eq!(platform.arch, "arm64");

        let platform: Platform = "Linux/x86_64".parse().unwrap();
        assert_eq!(platform.to_string(), "linux/amd64");
    }

    #[test]
    fn test_parse_platform_rejects_garbage() {
        assert!("".parse::<Platform>().is_err());
        assert!("linux".parse::<Platform>().is_err());
        assert!("/amd64".parse::<Platform>().is_err());
    }
}
