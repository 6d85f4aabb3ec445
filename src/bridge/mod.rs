//! The bridge orchestrator: decides, per package, whether to run npm and
//! with which overrides, and narrates every decision to the progress sink.

use anyhow::Result;
use log::debug;

use crate::domain::model::{BridgeConfig, Package};
use crate::npm::NpmClient;
use crate::progress::Progress;
use crate::project::ProjectSnapshot;

mod classifier;
mod scanner;
pub mod services;

pub use classifier::{DependencyClassifier, DEFAULT_SENTINEL};
pub use scanner::VendorFinder;

/// Runs npm installs and updates for one project snapshot.
///
/// Failure policy: the first command failure or non-optional unavailability
/// aborts the whole run. A package marked `optional` whose npm step cannot
/// run because npm is missing is skipped with a message; nothing else is
/// ever skipped.
pub struct NpmBridge<C: NpmClient, P: Progress> {
    client: C,
    classifier: DependencyClassifier,
    finder: VendorFinder,
    progress: P,
}

impl<C: NpmClient, P: Progress> NpmBridge<C, P> {
    pub fn new(
        client: C,
        classifier: DependencyClassifier,
        finder: VendorFinder,
        progress: P,
    ) -> Self {
        NpmBridge {
            client,
            classifier,
            finder,
            progress,
        }
    }

    /// Install npm dependencies for the root project, then for every
    /// opted-in vendor package.
    #[tracing::instrument(skip(self, snapshot))]
    pub async fn install(&self, snapshot: &ProjectSnapshot, dev_mode: bool) -> Result<()> {
        self.progress
            .write("Installing npm dependencies for the root project");

        if self.classifier.is_dependant(&snapshot.root, dev_mode) {
            let config = BridgeConfig::for_package(&snapshot.root);
            if self.skip_if_unavailable(&snapshot.root, &config) {
                // Skip line already emitted.
            } else {
                self.client.install(None, dev_mode, config.timeout()).await?;
            }
        } else {
            self.progress.write("Nothing to install");
        }

        self.install_for_vendors(snapshot).await
    }

    /// Update npm dependencies for the root project, then install for every
    /// opted-in vendor package.
    ///
    /// An update always re-installs afterward to materialize the updated
    /// tree, and always considers the root's dev dependencies.
    #[tracing::instrument(skip(self, snapshot))]
    pub async fn update(&self, snapshot: &ProjectSnapshot) -> Result<()> {
        self.progress
            .write("Updating npm dependencies for the root project");

        if self.classifier.is_dependant(&snapshot.root, true) {
            let config = BridgeConfig::for_package(&snapshot.root);
            if self.skip_if_unavailable(&snapshot.root, &config) {
                // Skip line already emitted.
            } else {
                self.client.update(None, config.timeout()).await?;
                self.client.install(None, true, config.timeout()).await?;
            }
        } else {
            self.progress.write("Nothing to update");
        }

        self.install_for_vendors(snapshot).await
    }

    async fn install_for_vendors(&self, snapshot: &ProjectSnapshot) -> Result<()> {
        self.progress
            .write("Installing npm dependencies for vendor packages");

        let packages = self.finder.find(&snapshot.packages);
        if packages.is_empty() {
            self.progress.write("Nothing to install");
            return Ok(());
        }
        debug!("{} vendor package(s) opted into bridging", packages.len());

        for vendor in packages {
            let config = BridgeConfig::for_package(&vendor.package);
            if self.skip_if_unavailable(&vendor.package, &config) {
                continue;
            }

            self.progress.write(&format!(
                "Installing npm dependencies for {}",
                vendor.package.name
            ));
            // Vendor packages are consumed as libraries, not developed in
            // place: always production mode, regardless of the root's.
            self.client
                .install(Some(&vendor.install_path), false, config.timeout())
                .await?;
        }

        Ok(())
    }

    /// The one non-fatal path: npm missing and the package marked optional.
    /// Execution failures are never downgraded by optionality.
    fn skip_if_unavailable(&self, package: &Package, config: &BridgeConfig) -> bool {
        if config.optional && !self.client.is_available() {
            self.progress.write(&format!(
                "Skipping npm dependencies for {} (npm is unavailable)",
                package.name
            ));
            return true;
        }
        false
    }
}
