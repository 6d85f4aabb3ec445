use log::warn;
use serde::Deserialize;
use std::time::Duration;

use super::Package;

/// The `extra` key a package uses to configure the bridge.
pub const EXTRA_KEY: &str = "npm-bridge";

/// Per-package bridge configuration, read from `extra["npm-bridge"]`.
///
/// `optional` downgrades an unavailable npm to a skip instead of a failure.
/// `timeout` overrides the default subprocess timeout for that package's
/// npm invocation only.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct BridgeConfig {
    pub optional: bool,
    pub timeout: Option<u64>,
}

impl BridgeConfig {
    /// Read the bridge configuration out of a package's `extra` map.
    ///
    /// A missing entry yields the defaults. A malformed entry also yields
    /// the defaults, with a warning: junk metadata in one vendor package
    /// must not abort the whole run.
    pub fn for_package(package: &Package) -> Self {
        let Some(value) = package.extra.get(EXTRA_KEY) else {
            return BridgeConfig::default();
        };

        match serde_json::from_value(value.clone()) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Ignoring malformed {:?} configuration for {}: {}",
                    EXTRA_KEY, package.name, e
                );
                BridgeConfig::default()
            }
        }
    }

    /// The timeout override as a duration, if one is set.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}
