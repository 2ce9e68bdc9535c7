use crate::inspection::domain::{DependencyGraph, ExternalId, ProjectNode, RepoPath};

/// An artifact path paired with its resolved identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifiedArtifact {
    pub path: RepoPath,
    pub external_id: ExternalId,
}

impl IdentifiedArtifact {
    pub fn new(path: RepoPath, external_id: ExternalId) -> Self {
        Self { path, external_id }
    }
}

/// DependencyGraphBuilder assembles identified artifacts under a project root
///
/// Pure logic: one node per distinct origin key, every node a direct child of
/// the synthetic project node.
pub struct DependencyGraphBuilder;

impl DependencyGraphBuilder {
    pub fn build(project: ProjectNode, artifacts: &[IdentifiedArtifact]) -> DependencyGraph {
        let mut graph = DependencyGraph::new(project);
        for artifact in artifacts {
            graph.add_child(artifact.external_id.clone());
        }
        graph
    }
}
