use crate::inspection::domain::{ExternalId, LayoutInfo, PackageType};

/// Side-channel name and version written onto an artifact by its package format
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredCoordinates {
    pub name: Option<String>,
    pub version: Option<String>,
}

impl DeclaredCoordinates {
    pub fn new(name: Option<&str>, version: Option<&str>) -> Self {
        Self {
            name: name.map(str::to_string),
            version: version.map(str::to_string),
        }
    }
}

/// IdentityResolver derives the canonical external id of an artifact
///
/// This service contains pure business logic; reading the properties and the
/// layout is the caller's job.
///
/// Resolution order:
/// 1. declared name and version properties, when both are non-blank
/// 2. layout metadata (organization/module/revision)
pub struct IdentityResolver;

impl IdentityResolver {
    /// Returns `None` when neither source yields a non-blank name and version
    pub fn resolve(
        package_type: &PackageType,
        declared: &DeclaredCoordinates,
        layout: Option<&LayoutInfo>,
    ) -> Option<ExternalId> {
        let forge = package_type.forge()?;

        if let (Some(name), Some(version)) = (non_blank(&declared.name), non_blank(&declared.version)) {
            if let Ok(id) = ExternalId::new(forge, name, version) {
                return Some(id);
            }
        }

        let layout = layout?;
        let module = non_blank(&layout.module)?;
        let revision = non_blank(&layout.base_revision)?;

        match non_blank(&layout.organization) {
            Some(organization) if forge.is_module_style() => {
                ExternalId::with_group(forge, organization, module, revision).ok()
            }
            _ => ExternalId::new(forge, module, revision).ok(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
