//! Service factory for building the bridge's dependencies.
//!
//! Construction of the concrete executable locator, process runner, and
//! npm client is kept out of the orchestrator so tests can wire mocks in
//! their place.

use crate::exec::{PathLocator, TokioProcessRunner};
use crate::npm::CommandNpmClient;
use crate::progress::ConsoleProgress;

use super::{DependencyClassifier, NpmBridge, VendorFinder};

/// Build a locator that resolves programs against the `PATH` environment
/// variable.
pub fn build_locator() -> PathLocator {
    PathLocator
}

/// Build a runner backed by tokio subprocesses.
pub fn build_runner() -> TokioProcessRunner {
    TokioProcessRunner
}

/// Build an npm client wired to the real locator and runner.
pub fn build_client() -> CommandNpmClient<PathLocator, TokioProcessRunner> {
    CommandNpmClient::new(build_locator(), build_runner())
}

/// Build the full bridge, writing progress to stdout.
pub fn build_bridge(
    sentinel: &str,
) -> NpmBridge<CommandNpmClient<PathLocator, TokioProcessRunner>, ConsoleProgress> {
    let classifier = DependencyClassifier::new(sentinel);
    let finder = VendorFinder::new(classifier.clone());
    NpmBridge::new(build_client(), classifier, finder, ConsoleProgress)
}
