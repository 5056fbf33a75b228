//! Finds test files that depend on changed units
//!
//! Two independent lookups, both one hop deep:
//! - setup dependents: nf-test files whose `run("X")` names a changed unit;
//! - include dependents: nf-test files next to a Nextflow source whose
//!   `include { X }` names a changed unit.
//!
//! If C includes B and B includes the changed unit A, C is not reported
//! unless C also names A itself.

use crate::extractors::{extract_file, extractor_for};
use crate::locator::Locator;
use nfscope_core::{ConfigError, DependencyGraph, EdgeKind, UnitId, DEPENDENCY_ROOTS};
use rayon::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

pub struct ImpactResolver {
    roots: Vec<PathBuf>,
    tests: Locator,
    sources: Locator,
}

impl ImpactResolver {
    pub fn new(roots: Vec<PathBuf>) -> Result<Self, ConfigError> {
        Ok(ImpactResolver {
            roots,
            tests: Locator::test_files()?,
            sources: Locator::source_files()?,
        })
    }

    /// Resolver over `modules/`, `subworkflows/` and `workflows/` of `root`.
    pub fn for_repository(root: &Path) -> Result<Self, ConfigError> {
        Self::new(DEPENDENCY_ROOTS.iter().map(|d| root.join(d)).collect())
    }

    pub fn recursive_siblings(mut self, recursive: bool) -> Self {
        self.tests = self.tests.recursive_siblings(recursive);
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Build the graph of `kind` edges over every file `locator` finds.
    pub fn scan(&self, locator: &Locator, kind: EdgeKind) -> DependencyGraph {
        let files = locator.locate(&self.roots);
        let extractor = extractor_for(kind);

        let edges: Vec<_> = files
            .par_iter()
            .flat_map_iter(|file| extract_file(extractor.as_ref(), file))
            .collect();

        let mut graph = DependencyGraph::new();
        for file in &files {
            graph.add_file(file);
        }
        graph.extend(edges);

        tracing::debug!(
            "Scanned {} files for {} edges: {:?}",
            files.len(),
            kind,
            graph
        );
        graph
    }

    /// nf-test files whose setup runs a changed unit.
    pub fn setup_dependents(&self, changed: &HashSet<UnitId>) -> BTreeSet<PathBuf> {
        if changed.is_empty() {
            return BTreeSet::new();
        }
        let graph = self.scan(&self.tests, EdgeKind::Run);
        graph.dependents(changed, EdgeKind::Run)
    }

    /// nf-test files belonging to sources that include a changed unit.
    pub fn include_dependents(&self, changed: &HashSet<UnitId>) -> BTreeSet<PathBuf> {
        if changed.is_empty() {
            return BTreeSet::new();
        }
        let graph = self.scan(&self.sources, EdgeKind::Include);
        let sources = graph.dependents(changed, EdgeKind::Include);
        self.tests.locate(&sources).into_iter().collect()
    }

    /// Union of [`Self::setup_dependents`] and [`Self::include_dependents`].
    pub fn find_dependents(&self, changed: &HashSet<UnitId>) -> BTreeSet<PathBuf> {
        let mut all = self.setup_dependents(changed);
        all.extend(self.include_dependents(changed));
        all
    }
}
