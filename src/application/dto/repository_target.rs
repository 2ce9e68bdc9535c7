use crate::inspection::domain::{PackageType, RepoPath};

/// RepositoryTarget - One repository to process in a pass
///
/// The package type is resolved by the caller (configuration), not probed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryTarget {
    pub key: String,
    pub package_type: PackageType,
}

impl RepositoryTarget {
    pub fn new(key: &str, package_type: PackageType) -> Self {
        Self {
            key: key.to_string(),
            package_type,
        }
    }

    pub fn root(&self) -> RepoPath {
        RepoPath::root(&self.key)
    }
}
