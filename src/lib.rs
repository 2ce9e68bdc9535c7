//! bom-artifact-sync - keeps repository artifacts in step with a BOM service
//!
//! This library identifies the artifacts of a repository manager against an
//! external Bill-of-Materials service, writes the service's vulnerability and
//! policy metadata back onto each artifact as properties, and refreshes that
//! metadata incrementally from the service's change notifications.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`inspection`): Identity, status and metadata models with pure services
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use bom_artifact_sync::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<()> {
//! let client = BomServiceClient::new("https://bom.example.com", None, Duration::from_secs(30))?;
//! let store = InMemoryPropertyStore::new();
//! store.add_repository("npm-local");
//!
//! let use_case = SyncRepositoriesUseCase::new(
//!     CachingBomService::new(client),
//!     store,
//!     StderrProgressReporter::new(),
//!     SyncSettings::default(),
//! );
//!
//! let targets = vec![RepositoryTarget::new("npm-local", PackageType::Npm)];
//! let report = use_case.run(&targets).await;
//! println!("{} repositories with failures", report.failure_count());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod inspection;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::PropertySnapshotFile;
    pub use crate::adapters::outbound::network::{BomServiceClient, CachingBomService};
    pub use crate::adapters::outbound::storage::InMemoryPropertyStore;
    pub use crate::application::dto::{
        RepositoryOutcome, RepositoryReport, RepositoryTarget, SyncReport, SyncSettings,
    };
    pub use crate::application::use_cases::SyncRepositoriesUseCase;
    pub use crate::inspection::domain::{
        ExternalId, InspectionStatus, OriginKey, PackageType, PropertyKeys, RepoPath,
        UpdateStatus,
    };
    pub use crate::ports::inbound::RepositorySyncPort;
    pub use crate::ports::outbound::{BomService, ProgressReporter, PropertyStore};
    pub use crate::shared::Result;
}
