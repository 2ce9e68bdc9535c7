use serde::{Deserialize, Serialize};
use std::fmt;

/// A package ecosystem as known to the BOM service
///
/// The separator joins name and version into an origin id. Module-style forges
/// (Maven) additionally prefix the organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Forge {
    name: &'static str,
    separator: char,
}

impl Forge {
    pub const ANACONDA: Forge = Forge::new("anaconda", '=');
    pub const BOWER: Forge = Forge::new("bower", '/');
    pub const COCOAPODS: Forge = Forge::new("cocoapods", ':');
    pub const CRAN: Forge = Forge::new("cran", '/');
    pub const GOLANG: Forge = Forge::new("golang", ':');
    pub const MAVEN: Forge = Forge::new("maven", ':');
    pub const NPMJS: Forge = Forge::new("npmjs", '/');
    pub const NUGET: Forge = Forge::new("nuget", '/');
    pub const PACKAGIST: Forge = Forge::new("packagist", ':');
    pub const PYPI: Forge = Forge::new("pypi", '/');
    pub const RUBYGEMS: Forge = Forge::new("rubygems", '/');

    const fn new(name: &'static str, separator: char) -> Self {
        Self { name, separator }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Whether origin ids of this forge carry the organization as a leading segment
    pub fn is_module_style(&self) -> bool {
        *self == Forge::MAVEN
    }
}

impl fmt::Display for Forge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Package-manager type of a repository
///
/// Closed set of supported package managers with an explicit `Unsupported`
/// variant carrying the raw name for anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PackageType {
    Bower,
    Cocoapods,
    Composer,
    Conda,
    Cran,
    Gems,
    Go,
    Gradle,
    Maven,
    Npm,
    Nuget,
    Pypi,
    Unsupported(String),
}

impl PackageType {
    /// All supported package types, in configuration order
    pub const SUPPORTED: [PackageType; 12] = [
        PackageType::Bower,
        PackageType::Cocoapods,
        PackageType::Composer,
        PackageType::Conda,
        PackageType::Cran,
        PackageType::Gems,
        PackageType::Go,
        PackageType::Gradle,
        PackageType::Maven,
        PackageType::Npm,
        PackageType::Nuget,
        PackageType::Pypi,
    ];

    /// Parses a package type name. Unknown names map to `Unsupported`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "bower" => PackageType::Bower,
            "cocoapods" => PackageType::Cocoapods,
            "composer" => PackageType::Composer,
            "conda" => PackageType::Conda,
            "cran" => PackageType::Cran,
            "gems" => PackageType::Gems,
            "go" => PackageType::Go,
            "gradle" => PackageType::Gradle,
            "maven" => PackageType::Maven,
            "npm" => PackageType::Npm,
            "nuget" => PackageType::Nuget,
            "pypi" => PackageType::Pypi,
            _ => PackageType::Unsupported(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PackageType::Bower => "bower",
            PackageType::Cocoapods => "cocoapods",
            PackageType::Composer => "composer",
            PackageType::Conda => "conda",
            PackageType::Cran => "cran",
            PackageType::Gems => "gems",
            PackageType::Go => "go",
            PackageType::Gradle => "gradle",
            PackageType::Maven => "maven",
            PackageType::Npm => "npm",
            PackageType::Nuget => "nuget",
            PackageType::Pypi => "pypi",
            PackageType::Unsupported(raw) => raw,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, PackageType::Unsupported(_))
    }

    pub fn forge(&self) -> Option<Forge> {
        let forge = match self {
            PackageType::Bower => Forge::BOWER,
            PackageType::Cocoapods => Forge::COCOAPODS,
            PackageType::Composer => Forge::PACKAGIST,
            PackageType::Conda => Forge::ANACONDA,
            PackageType::Cran => Forge::CRAN,
            PackageType::Gems => Forge::RUBYGEMS,
            PackageType::Go => Forge::GOLANG,
            PackageType::Gradle | PackageType::Maven => Forge::MAVEN,
            PackageType::Npm => Forge::NPMJS,
            PackageType::Nuget => Forge::NUGET,
            PackageType::Pypi => Forge::PYPI,
            PackageType::Unsupported(_) => return None,
        };
        Some(forge)
    }

    /// Default comma-separated name patterns used when none are configured
    pub fn default_patterns(&self) -> &'static str {
        match self {
            PackageType::Bower | PackageType::Cocoapods => "*.tar.gz,*.tgz",
            PackageType::Composer | PackageType::Go => "*.zip",
            PackageType::Conda => "*.tar.bz2",
            PackageType::Cran => "*.tar.gz",
            PackageType::Gems => "*.gem",
            PackageType::Gradle | PackageType::Maven => "*.jar",
            PackageType::Npm => "*.tgz",
            PackageType::Nuget => "*.nupkg",
            PackageType::Pypi => "*.whl,*.tar.gz,*.zip,*.egg",
            PackageType::Unsupported(_) => "",
        }
    }

    /// Side-channel property keys `(name, version)` written by the package format
    pub fn name_version_properties(&self) -> Option<(&'static str, &'static str)> {
        match self {
            PackageType::Bower => Some(("bower.name", "bower.version")),
            PackageType::Cocoapods => Some(("pods.name", "pods.version")),
            PackageType::Composer => Some(("composer.name", "composer.version")),
            PackageType::Conda => Some(("conda.name", "conda.version")),
            PackageType::Cran => Some(("cran.name", "cran.version")),
            PackageType::Gems => Some(("gem.name", "gem.version")),
            PackageType::Go => Some(("go.name", "go.version")),
            PackageType::Npm => Some(("npm.name", "npm.version")),
            PackageType::Nuget => Some(("nuget.id", "nuget.version")),
            PackageType::Pypi => Some(("pypi.name", "pypi.version")),
            PackageType::Gradle | PackageType::Maven | PackageType::Unsupported(_) => None,
        }
    }
}

impl From<String> for PackageType {
    fn from(value: String) -> Self {
        PackageType::parse(&value)
    }
}

impl From<PackageType> for String {
    fn from(value: PackageType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
