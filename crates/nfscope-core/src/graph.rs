//! Dependency graph using petgraph::StableDiGraph
//!
//! Files point at the units they reference. Queries follow exactly one
//! edge: a file that depends on a unit which in turn depends on a changed
//! unit is not reported.

use crate::model::{Edge, EdgeKind, UnitId};
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// A node is either a scanned file or a referenced unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DepNode {
    File(PathBuf),
    Unit(UnitId),
}

pub struct DependencyGraph {
    inner: StableDiGraph<DepNode, Edge>,
    files: HashMap<PathBuf, NodeIndex>,
    units: HashMap<UnitId, NodeIndex>,
}

impl std::fmt::Debug for DependencyGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyGraph")
            .field("file_count", &self.files.len())
            .field("unit_count", &self.units.len())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl DependencyGraph {
    pub fn new() -> Self {
        DependencyGraph {
            inner: StableDiGraph::new(),
            files: HashMap::new(),
            units: HashMap::new(),
        }
    }

    fn file_node(&mut self, path: &Path) -> NodeIndex {
        if let Some(&idx) = self.files.get(path) {
            return idx;
        }
        let idx = self.inner.add_node(DepNode::File(path.to_path_buf()));
        self.files.insert(path.to_path_buf(), idx);
        idx
    }

    fn unit_node(&mut self, unit: &UnitId) -> NodeIndex {
        if let Some(&idx) = self.units.get(unit) {
            return idx;
        }
        let idx = self.inner.add_node(DepNode::Unit(unit.clone()));
        self.units.insert(unit.clone(), idx);
        idx
    }

    /// Add an edge, creating its file and unit nodes on first sight.
    pub fn add_edge(&mut self, edge: Edge) {
        let source = self.file_node(&edge.source);
        let target = self.unit_node(&edge.target);
        self.inner.add_edge(source, target, edge);
    }

    /// Register a scanned file even if it declares no edges.
    pub fn add_file(&mut self, path: &Path) {
        self.file_node(path);
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Units a file references through edges of `kind`.
    pub fn dependencies_of(&self, file: &Path, kind: EdgeKind) -> BTreeSet<&UnitId> {
        let Some(&idx) = self.files.get(file) else {
            return BTreeSet::new();
        };
        self.inner
            .edges_directed(idx, Direction::Outgoing)
            .filter_map(|edge_ref| self.inner.edge_weight(edge_ref.id()))
            .filter(|edge| edge.kind == kind)
            .map(|edge| &edge.target)
            .collect()
    }

    /// Files holding a `kind` edge into any of `changed`. One hop only.
    pub fn dependents<'a, I>(&self, changed: I, kind: EdgeKind) -> BTreeSet<PathBuf>
    where
        I: IntoIterator<Item = &'a UnitId>,
    {
        let mut result = BTreeSet::new();
        for unit in changed {
            let Some(&idx) = self.units.get(unit) else {
                continue;
            };
            for edge_ref in self.inner.edges_directed(idx, Direction::Incoming) {
                let Some(edge) = self.inner.edge_weight(edge_ref.id()) else {
                    continue;
                };
                if edge.kind != kind {
                    continue;
                }
                if let Some(DepNode::File(path)) = self.inner.node_weight(edge_ref.source()) {
                    tracing::debug!(
                        "{} depends on '{}' via {} (line {})",
                        path.display(),
                        unit,
                        kind,
                        edge.line
                    );
                    result.insert(path.clone());
                }
            }
        }
        result
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Edge> for DependencyGraph {
    fn from_iter<T: IntoIterator<Item = Edge>>(iter: T) -> Self {
        let mut graph = DependencyGraph::new();
        for edge in iter {
            graph.add_edge(edge);
        }
        graph
    }
}

impl Extend<Edge> for DependencyGraph {
    fn extend<T: IntoIterator<Item = Edge>>(&mut self, iter: T) {
        for edge in iter {
            self.add_edge(edge);
        }
    }
}
