use crate::application::dto::SyncSettings;
use crate::inspection::domain::{ProjectNode, PropertyKeys, RepoPath};
use crate::ports::outbound::PropertyStore;
use crate::shared::Result;

/// Names of the BOM project version a repository maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectNaming {
    pub project_name: String,
    pub version_name: String,
}

impl ProjectNaming {
    /// Reads the names from the repository root, falling back to the
    /// repository key and the configured default version
    pub fn resolve<S: PropertyStore>(store: &S, root: &RepoPath, settings: &SyncSettings) -> Result<Self> {
        let project_name = store
            .get_property(root, &settings.keys.project_name())?
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| root.repo_key().to_string());
        let version_name = store
            .get_property(root, &settings.keys.project_version_name())?
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| settings.default_project_version.clone());

        Ok(Self {
            project_name,
            version_name,
        })
    }

    pub fn project_node(&self) -> ProjectNode {
        ProjectNode::new(&self.project_name, &self.version_name)
    }

    pub fn to_properties(&self, keys: &PropertyKeys) -> Vec<(String, String)> {
        vec![
            (keys.project_name(), self.project_name.clone()),
            (keys.project_version_name(), self.version_name.clone()),
        ]
    }
}
