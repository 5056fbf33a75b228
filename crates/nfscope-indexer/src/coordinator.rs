//! Orchestrates impact resolution for one set of changed paths

use crate::classifier::classify;
use crate::locator::Locator;
use crate::resolver::ImpactResolver;
use nfscope_core::{
    expand_includes, filter_paths, fold_paths, relativize, ConfigError, IgnoreSet, IncludeMapping,
    UnitId, UnitKind,
};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

/// Everything one resolution run needs.
#[derive(Debug, Clone)]
pub struct ImpactRequest {
    /// Repository root; output paths are relative to it.
    pub root: PathBuf,
    /// Changed paths, relative to `root`.
    pub changed: Vec<PathBuf>,
    pub ignore: IgnoreSet,
    pub include: Option<IncludeMapping>,
    /// Test types to select from the directly changed files.
    pub types: Vec<UnitKind>,
    /// Ancestor levels to fold output paths to; 0 keeps files.
    pub depth: usize,
    pub recursive_siblings: bool,
}

impl ImpactRequest {
    /// A request with the default ignore list, all four types and depth 0.
    pub fn new(root: impl Into<PathBuf>, changed: Vec<PathBuf>) -> Result<Self, ConfigError> {
        Ok(ImpactRequest {
            root: root.into(),
            changed,
            ignore: IgnoreSet::with_defaults()?,
            include: None,
            types: UnitKind::ALL.to_vec(),
            depth: 0,
            recursive_siblings: false,
        })
    }

    pub fn with_ignore(mut self, ignore: IgnoreSet) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn with_include(mut self, include: Option<IncludeMapping>) -> Self {
        self.include = include;
        self
    }

    pub fn with_types(mut self, types: Vec<UnitKind>) -> Self {
        self.types = types;
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_recursive_siblings(mut self, recursive: bool) -> Self {
        self.recursive_siblings = recursive;
        self
    }
}

/// Result of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpactReport {
    /// Sorted, root-relative test files (or folded directories).
    pub components: Vec<String>,
    /// Selected test files that changed themselves.
    pub changed_tests: usize,
    /// Test files pulled in through `run(...)` setup statements.
    pub setup_dependents: usize,
    /// Test files pulled in through `include { ... }` statements.
    pub include_dependents: usize,
}

impl ImpactReport {
    /// The `components` list as a JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.components)
    }
}

pub struct Coordinator;

impl Coordinator {
    pub fn new() -> Self {
        Coordinator
    }

    pub fn run(&self, request: &ImpactRequest) -> Result<ImpactReport, ConfigError> {
        let root = request.root.as_path();

        let kept = filter_paths(&request.changed, &request.ignore);
        tracing::info!(
            "{} changed paths, {} after ignore filter",
            request.changed.len(),
            kept.len()
        );

        let mut changed: Vec<PathBuf> = kept.iter().map(|p| root.join(p)).collect();
        if let Some(mapping) = &request.include {
            let extra = expand_includes(&changed, mapping, root);
            tracing::info!("Include mapping added {} paths", extra.len());
            changed.extend(extra);
        }

        let test_locator = Locator::test_files()?.recursive_siblings(request.recursive_siblings);
        let changed_tests = test_locator.locate(&changed);
        let table = classify(&changed_tests);
        if tracing::enabled!(tracing::Level::DEBUG) {
            match serde_json::to_string(&table) {
                Ok(json) => tracing::debug!("Classification: {}", json),
                Err(e) => tracing::warn!("Cannot serialize classification: {}", e),
            }
        }

        let selected = table.select(&request.types);
        let changed_units: HashSet<UnitId> = selected.iter().map(|u| u.id()).collect();
        let mut impacted: BTreeSet<PathBuf> = selected.iter().map(|u| u.path.clone()).collect();
        tracing::info!(
            "{} changed test files, {} selected ({} units)",
            changed_tests.len(),
            impacted.len(),
            changed_units.len()
        );

        let resolver =
            ImpactResolver::for_repository(root)?.recursive_siblings(request.recursive_siblings);
        let setup = resolver.setup_dependents(&changed_units);
        let include = resolver.include_dependents(&changed_units);
        tracing::info!(
            "{} setup dependents, {} include dependents",
            setup.len(),
            include.len()
        );

        let report = ImpactReport {
            changed_tests: impacted.len(),
            setup_dependents: setup.len(),
            include_dependents: include.len(),
            components: Vec::new(),
        };
        impacted.extend(setup);
        impacted.extend(include);

        Ok(ImpactReport {
            components: render(&impacted, request.depth, root),
            ..report
        })
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

fn render(paths: &BTreeSet<PathBuf>, depth: usize, root: &Path) -> Vec<String> {
    let rendered: BTreeSet<String> = fold_paths(paths, depth, root)
        .iter()
        .map(|p| relativize(p, root))
        .collect();
    rendered.into_iter().collect()
}
