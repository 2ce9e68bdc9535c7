/// Filesystem adapters for the property snapshot
mod property_snapshot;

pub use property_snapshot::PropertySnapshotFile;
