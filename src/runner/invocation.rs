// file: src/runner/invocation.rs
// version: 1.0.0
// guid: c48a2f6e-1d97-4b3c-85e0-a7f92d6b1c38

//! Argument vectors for the Civo CLI

/// Default number of nodes for a new cluster (the master also acts as a node)
pub const DEFAULT_NODE_COUNT: &str = "3";
/// Default node size; list others with `civo size list -s kubernetes`
pub const DEFAULT_NODE_SIZE: &str = "g4s.kube.medium";
/// Default k3s version
pub const DEFAULT_K3S_VERSION: &str = "latest";

/// Optional parameters of `k3s create`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOptions {
    pub node_count: String,
    pub node_size: String,
    /// k3s version, e.g. `1.21.2+k3s1`
    pub version: String,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            node_count: DEFAULT_NODE_COUNT.to_string(),
            node_size: DEFAULT_NODE_SIZE.to_string(),
            version: DEFAULT_K3S_VERSION.to_string(),
        }
    }
}

/// One Civo CLI invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterCommand {
    List {
        region: String,
    },
    Show {
        region: String,
        name: String,
    },
    Create {
        region: String,
        name: String,
        options: CreateOptions,
    },
    Version,
}

impl ClusterCommand {
    /// Arguments passed to the `civo` entrypoint
    pub fn args(&self) -> Vec<String> {
        let args: Vec<&str> = match self {
            ClusterCommand::List { region } => vec!["k3s", "list", "--region", region.as_str()],
            ClusterCommand::Show { region, name } => {
                vec!["k3s", "get", name.as_str(), "--region", region.as_str()]
            }
            ClusterCommand::Create {
                region,
                name,
                options,
            } => vec![
                "k3s",
                "create",
                name.as_str(),
                "--region",
                region.as_str(),
                "--nodes",
                options.node_count.as_str(),
                "--size",
                options.node_size.as_str(),
                "--version",
                options.version.as_str(),
                "--wait",
            ],
            ClusterCommand::Version => vec!["version"],
        };

        args.into_iter().map(str::to_string).collect()
    }

    /// Whether the command talks to the Civo API
    pub fn requires_credential(&self) -> bool {
        !matches!(self, ClusterCommand::Version)
    }

    /// Short name used for spans and logs
    pub fn name(&self) -> &'static str {
        match self {
            ClusterCommand::List { .. } => "cluster-list",
            ClusterCommand::Show { .. } => "cluster-show",
            ClusterCommand::Create { .. } => "cluster-create",
            ClusterCommand::Version => "version",
        }
    }
}
