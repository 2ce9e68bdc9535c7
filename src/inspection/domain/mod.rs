pub mod artifact_metadata;
pub mod composite_component;
pub mod dependency_graph;
pub mod external_id;
pub mod inspection_status;
pub mod notification;
pub mod package_type;
pub mod property_keys;
pub mod repo_path;

pub use artifact_metadata::{ArtifactMetaData, PolicyStatus, SeverityCounts, VulnerabilitySeverity};
pub use composite_component::{
    BomComponent, ComponentOrigin, ComponentVersion, CompositeComponentModel, ProjectVersion,
};
pub use dependency_graph::{DependencyGraph, ProjectNode};
pub use external_id::{ExternalId, OriginKey};
pub use inspection_status::{InspectionStatus, UpdateStatus};
pub use notification::{Notification, NotificationBatch, NotificationKind};
pub use package_type::{Forge, PackageType};
pub use property_keys::PropertyKeys;
pub use repo_path::{LayoutInfo, RepoPath};
