use super::artifact_metadata::PolicyStatus;
use super::external_id::OriginKey;

/// A project version in the BOM service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectVersion {
    pub project_name: String,
    pub version_name: String,
    /// Canonical link of the project version resource
    pub url: String,
}

impl ProjectVersion {
    pub fn new(project_name: &str, version_name: &str, url: &str) -> Self {
        Self {
            project_name: project_name.to_string(),
            version_name: version_name.to_string(),
            url: url.to_string(),
        }
    }
}

/// One entry of a project version's bill of materials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomComponent {
    pub component_name: String,
    pub version_name: String,
    /// Link of the referenced component version
    pub component_version_url: String,
    pub policy_status: PolicyStatus,
    /// Origin summary as listed on the BOM entry, used for cheap filtering
    pub origins: Vec<OriginKey>,
}

impl BomComponent {
    pub fn new(component_name: &str, version_name: &str, component_version_url: &str, policy_status: PolicyStatus) -> Self {
        Self {
            component_name: component_name.to_string(),
            version_name: version_name.to_string(),
            component_version_url: component_version_url.to_string(),
            policy_status,
            origins: Vec::new(),
        }
    }

    pub fn with_origin(mut self, origin: OriginKey) -> Self {
        self.origins.push(origin);
        self
    }
}

/// A component version resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentVersion {
    pub url: String,
    pub version_name: String,
    pub origins_url: String,
    pub vulnerabilities_url: String,
}

impl ComponentVersion {
    pub fn new(url: &str, version_name: &str) -> Self {
        let base = url.trim_end_matches('/');
        Self {
            url: url.to_string(),
            version_name: version_name.to_string(),
            origins_url: format!("{}/origins", base),
            vulnerabilities_url: format!("{}/vulnerabilities", base),
        }
    }
}

/// A declared origin of a component version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentOrigin {
    pub forge: String,
    pub origin_id: String,
}

impl ComponentOrigin {
    pub fn new(forge: &str, origin_id: &str) -> Self {
        Self {
            forge: forge.to_string(),
            origin_id: origin_id.to_string(),
        }
    }

    pub fn key(&self) -> OriginKey {
        OriginKey::new(&self.forge, &self.origin_id)
    }
}

/// Join of a BOM entry, its component version and that version's origins
///
/// A model whose component version could not be fetched is a placeholder: it
/// has no component version and no origins, so it contributes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeComponentModel {
    pub bom_component: BomComponent,
    pub component_version: Option<ComponentVersion>,
    pub origins: Vec<ComponentOrigin>,
}

impl CompositeComponentModel {
    pub fn new(bom_component: BomComponent, component_version: ComponentVersion, origins: Vec<ComponentOrigin>) -> Self {
        Self {
            bom_component,
            component_version: Some(component_version),
            origins,
        }
    }

    pub fn placeholder(bom_component: BomComponent) -> Self {
        Self {
            bom_component,
            component_version: None,
            origins: Vec::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.component_version.is_none()
    }
}
