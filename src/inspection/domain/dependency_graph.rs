use super::external_id::{ExternalId, OriginKey};
use std::collections::HashSet;

/// Synthetic root node naming the project version a graph is uploaded as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectNode {
    pub name: String,
    pub version: String,
}

impl ProjectNode {
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
        }
    }
}

/// DependencyGraph aggregate: a project root with one child per identified component
///
/// Children are unique by origin key; the graph is submitted as one unit.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    project: ProjectNode,
    children: Vec<ExternalId>,
    seen: HashSet<OriginKey>,
}

impl DependencyGraph {
    pub fn new(project: ProjectNode) -> Self {
        Self {
            project,
            children: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Attaches a component under the root. Returns false for a duplicate origin.
    pub fn add_child(&mut self, external_id: ExternalId) -> bool {
        if !self.seen.insert(external_id.origin_key()) {
            return false;
        }
        self.children.push(external_id);
        true
    }

    pub fn project(&self) -> &ProjectNode {
        &self.project
    }

    pub fn children(&self) -> &[ExternalId] {
        &self.children
    }

    pub fn component_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
