/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod repository_target;
mod sync_report;
mod sync_settings;

pub use repository_target::RepositoryTarget;
pub use sync_report::{RepositoryOutcome, RepositoryReport, SyncReport};
pub use sync_settings::{SyncSettings, DEFAULT_MAX_CONCURRENCY, DEFAULT_PROJECT_VERSION};
