use super::package_type::Forge;
use crate::shared::Result;
use std::fmt;

/// Maximum length for names and versions (security limit)
const MAX_COMPONENT_LENGTH: usize = 255;

/// Canonical identity of a component within its forge
///
/// Immutable value object; the origin id derived from it is the
/// repository-local key under which BOM metadata is matched back to artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalId {
    forge: Forge,
    group: Option<String>,
    name: String,
    version: String,
}

impl ExternalId {
    pub fn new(forge: Forge, name: &str, version: &str) -> Result<Self> {
        Ok(Self {
            forge,
            group: None,
            name: validate_part(name, "name")?,
            version: validate_part(version, "version")?,
        })
    }

    /// Builds a module-style id (organization, module, revision)
    pub fn with_group(forge: Forge, group: &str, name: &str, version: &str) -> Result<Self> {
        let mut id = Self::new(forge, name, version)?;
        id.group = Some(validate_part(group, "group")?);
        Ok(id)
    }

    pub fn forge(&self) -> Forge {
        self.forge
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Ecosystem-specific identity of this component version
    pub fn origin_id(&self) -> String {
        let separator = self.forge.separator();
        match &self.group {
            Some(group) if self.forge.is_module_style() => {
                format!("{}{sep}{}{sep}{}", group, self.name, self.version, sep = separator)
            }
            _ => format!("{}{}{}", self.name, separator, self.version),
        }
    }

    pub fn origin_key(&self) -> OriginKey {
        OriginKey::new(self.forge.name(), &self.origin_id())
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.forge, self.origin_id())
    }
}

fn validate_part(value: &str, label: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        anyhow::bail!("External id {} cannot be blank", label);
    }
    if trimmed.len() > MAX_COMPONENT_LENGTH {
        anyhow::bail!(
            "External id {} is too long ({} bytes). Maximum allowed: {} bytes",
            label,
            trimmed.len(),
            MAX_COMPONENT_LENGTH
        );
    }
    Ok(trimmed.to_string())
}

/// Repository-local key of a component origin: `(forge, originId)`
///
/// Two artifacts with equal keys are the same component origin and must carry
/// identical metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OriginKey {
    forge: String,
    origin_id: String,
}

impl OriginKey {
    pub fn new(forge: &str, origin_id: &str) -> Self {
        Self {
            forge: forge.trim().to_string(),
            origin_id: origin_id.trim().to_string(),
        }
    }

    pub fn forge(&self) -> &str {
        &self.forge
    }

    pub fn origin_id(&self) -> &str {
        &self.origin_id
    }

    /// Keys with a blank half cannot be matched against artifact properties
    pub fn is_blank(&self) -> bool {
        self.forge.is_empty() || self.origin_id.is_empty()
    }
}

impl fmt::Display for OriginKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.forge, self.origin_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slash_separated_origin_id() {
        let id = ExternalId::new(Forge::NPMJS, "lodash", "4.17.21").unwrap();
        assert_eq!(id.origin_id(), "lodash/4.17.21");
        assert_eq!(id.origin_key().to_string(), "npmjs:lodash/4.17.21");
    }

    #[test]
    fn test_module_style_origin_id() {
        let id = ExternalId::with_group(Forge::MAVEN, "org.slf4j", "slf4j-api", "2.0.9").unwrap();
        assert_eq!(id.origin_id(), "org.slf4j:slf4j-api:2.0.9");
        assert_eq!(id.group(), Some("org.slf4j"));
    }

    #[test]
    fn test_group_ignored_for_non_module_forge() {
        let id = ExternalId::with_group(Forge::PYPI, "ignored", "requests", "2.31.0").unwrap();
        assert_eq!(id.origin_id(), "requests/2.31.0");
    }

    #[test]
    fn test_anaconda_separator() {
        let id = ExternalId::new(Forge::ANACONDA, "numpy", "1.26.0").unwrap();
        assert_eq!(id.origin_id(), "numpy=1.26.0");
    }

    #[test]
    fn test_blank_parts_rejected() {
        assert!(ExternalId::new(Forge::NPMJS, "  ", "1.0.0").is_err());
        assert!(ExternalId::new(Forge::NPMJS, "lodash", "").is_err());
        assert!(ExternalId::with_group(Forge::MAVEN, "", "a", "1").is_err());
    }

    #[test]
    fn test_parts_are_trimmed() {
        let id = ExternalId::new(Forge::RUBYGEMS, " rails ", " 7.1.0 ").unwrap();
        assert_eq!(id.name(), "rails");
        assert_eq!(id.version(), "7.1.0");
    }

    #[test]
    fn test_overlong_name_rejected() {
        let name = "a".repeat(MAX_COMPONENT_LENGTH + 1);
        let result = ExternalId::new(Forge::NPMJS, &name, "1.0.0");
        assert!(result.unwrap_err().to_string().contains("too long"));
    }

    #[test]
    fn test_origin_key_blank() {
        assert!(OriginKey::new("", "a/1").is_blank());
        assert!(OriginKey::new("npmjs", " ").is_blank());
        assert!(!OriginKey::new("npmjs", "a/1").is_blank());
    }
}
