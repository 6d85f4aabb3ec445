use crate::domain::model::VendorPackage;

use super::DependencyClassifier;

/// Filters the installed vendor set down to the packages that opted into
/// bridging.
#[derive(Debug, Clone)]
pub struct VendorFinder {
    classifier: DependencyClassifier,
}

impl VendorFinder {
    pub fn new(classifier: DependencyClassifier) -> Self {
        VendorFinder { classifier }
    }

    /// Order-preserving filter over the installed set. Dev dependencies of
    /// vendor packages are never eligible; only runtime links count here.
    pub fn find<'a>(&self, packages: &'a [VendorPackage]) -> Vec<&'a VendorPackage> {
        packages
            .iter()
            .filter(|vendor| self.classifier.is_dependant(&vendor.package, false))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::DEFAULT_SENTINEL;
    use crate::domain::model::{DependencyLink, Package};
    use std::path::PathBuf;

    fn vendor(name: &str, requires: &[&str], dev_requires: &[&str]) -> VendorPackage {
        VendorPackage {
            package: Package {
                name: name.to_string(),
                requires: requires.iter().copied().map(DependencyLink::new).collect(),
                dev_requires: dev_requires.iter().copied().map(DependencyLink::new).collect(),
                ..Package::default()
            },
            install_path: PathBuf::from(format!("/vendor/{}", name)),
        }
    }

    #[test]
    fn test_find_preserves_input_order() {
        let finder = VendorFinder::new(DependencyClassifier::default());
        let packages = vec![
            vendor("acme/c", &[DEFAULT_SENTINEL], &[]),
            vendor("acme/a", &[], &[]),
            vendor("acme/b", &[DEFAULT_SENTINEL], &[]),
        ];

        let found = finder.find(&packages);
        let names: Vec<&str> = found.iter().map(|v| v.package.name.as_str()).collect();
        assert_eq!(names, vec!["acme/c", "acme/b"]);
    }

    #[test]
    fn test_find_is_idempotent() {
        let finder = VendorFinder::new(DependencyClassifier::default());
        let packages = vec![
            vendor("acme/a", &[DEFAULT_SENTINEL], &[]),
            vendor("acme/b", &[], &[]),
        ];

        assert_eq!(finder.find(&packages), finder.find(&packages));
    }

    #[test]
    fn test_vendor_dev_dependencies_are_never_eligible() {
        let finder = VendorFinder::new(DependencyClassifier::default());
        let packages = vec![vendor("acme/devonly", &[], &[DEFAULT_SENTINEL])];
        assert!(finder.find(&packages).is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let finder = VendorFinder::new(DependencyClassifier::default());
        assert!(finder.find(&[]).is_empty());
    }
}
