//! The host package manager's view of the project, handed to the bridge as
//! a JSON graph snapshot.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::model::{Package, VendorPackage};

/// Everything the bridge needs to know about one install/update run: the
/// root package and the flat set of installed vendor packages.
///
/// All of it is transient; a snapshot lives for exactly one orchestration
/// run and nothing is written back.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProjectSnapshot {
    pub root: Package,
    #[serde(default)]
    pub packages: Vec<VendorPackage>,
}

impl ProjectSnapshot {
    #[tracing::instrument]
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read graph snapshot at {:?}", path))?;
        let snapshot: ProjectSnapshot = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse graph snapshot at {:?}", path))?;
        Ok(snapshot)
    }
}
