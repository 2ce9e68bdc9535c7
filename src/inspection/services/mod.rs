mod dependency_graph_builder;
mod identity_resolver;
mod metadata_fold;
mod pattern_matcher;

pub use dependency_graph_builder::{DependencyGraphBuilder, IdentifiedArtifact};
pub use identity_resolver::{DeclaredCoordinates, IdentityResolver};
pub use metadata_fold::MetadataFold;
pub use pattern_matcher::PatternMatcher;
