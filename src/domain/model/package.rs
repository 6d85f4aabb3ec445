use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A directed dependency declaration. Only the target name matters to the
/// bridge; version constraints are never inspected.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct DependencyLink {
    pub target: String,
}

impl DependencyLink {
    pub fn new(target: impl Into<String>) -> Self {
        DependencyLink {
            target: target.into(),
        }
    }
}

impl fmt::Display for DependencyLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.target)
    }
}

/// A package as described by the host package manager's graph snapshot.
/// Read-only to the bridge.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub requires: Vec<DependencyLink>,
    #[serde(default)]
    pub dev_requires: Vec<DependencyLink>,
    #[serde(default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An installed dependency of the root project, with the absolute path the
/// host installed it to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VendorPackage {
    #[serde(flatten)]
    pub package: Package,
    pub install_path: PathBuf,
}
