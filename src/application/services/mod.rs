/// Application services - stateful helpers shared by the use cases
///
/// Unlike the domain services these talk to the outbound ports.
mod artifact_identifier;
mod component_resolver;
mod date_codec;
mod inspection_status_store;
mod metadata_aggregator;
mod project_naming;

#[cfg(test)]
pub(crate) mod test_support;

pub use artifact_identifier::{origin_properties, ArtifactIdentifier};
pub use component_resolver::CompositeComponentResolver;
pub use date_codec::{DateCodec, DEFAULT_DATE_TIME_PATTERN};
pub use inspection_status_store::InspectionStatusStore;
pub use metadata_aggregator::{ApplyOutcome, AggregationOutcome, MetadataAggregator};
pub use project_naming::ProjectNaming;
