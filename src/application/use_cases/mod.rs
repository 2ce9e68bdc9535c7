/// Use cases module containing application business logic orchestration
mod identify_artifacts;
mod populate_metadata;
mod sync_repositories;
mod update_metadata;

pub use identify_artifacts::IdentifyArtifactsUseCase;
pub use populate_metadata::PopulateMetadataUseCase;
pub use sync_repositories::SyncRepositoriesUseCase;
pub use update_metadata::UpdateMetadataUseCase;
