use crate::domain::model::Package;

/// The dependency name a package declares to opt into npm bridging.
///
/// This matches the marker most existing projects already declare; hosts
/// targeting another ecosystem can substitute their own via the CLI.
pub const DEFAULT_SENTINEL: &str = "eloquent/composer-npm-bridge";

/// Decides whether a package has opted into npm bridging.
#[derive(Debug, Clone)]
pub struct DependencyClassifier {
    sentinel: String,
}

impl DependencyClassifier {
    pub fn new(sentinel: impl Into<String>) -> Self {
        DependencyClassifier {
            sentinel: sentinel.into(),
        }
    }

    /// True iff one of the package's dependency links targets the sentinel.
    /// Runtime links are checked first; dev links only when `include_dev`.
    pub fn is_dependant(&self, package: &Package, include_dev: bool) -> bool {
        if package
            .requires
            .iter()
            .any(|link| link.target == self.sentinel)
        {
            return true;
        }

        include_dev
            && package
                .dev_requires
                .iter()
                .any(|link| link.target == self.sentinel)
    }
}

impl Default for DependencyClassifier {
    fn default() -> Self {
        DependencyClassifier::new(DEFAULT_SENTINEL)
    }
}
