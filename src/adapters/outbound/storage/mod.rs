/// Property store adapters
mod in_memory_property_store;

pub use in_memory_property_store::{ArtifactRecord, InMemoryPropertyStore};
