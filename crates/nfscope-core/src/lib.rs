//! nfscope core: unit model, path patterns and the dependency graph

pub mod classification;
pub mod error;
pub mod graph;
pub mod model;
pub mod paths;
pub mod pattern;


pub use classification::{Classification, TestUnit};
pub use error::ConfigError;
pub use graph::DependencyGraph;
pub use model::{Edge, EdgeKind, UnitId, UnitKind, PIPELINE_KIND, PIPELINE_NAME};
pub use paths::{expand_includes, filter_paths, fold_paths, nth_parent, relativize};
pub use pattern::{IgnoreSet, IncludeMapping, PathPattern};

/// Ignore globs applied to the changed-path list when none are given.
pub const DEFAULT_IGNORED: &[&str] = &[
    ".git/*",
    ".gitpod.yml",
    ".prettierignore",
    ".prettierrc.yml",
    "*.md",
    "*.png",
    "modules.json",
    "pyproject.toml",
    "tower.yml",
];

/// Directories (relative to the repository root) scanned for dependents.
pub const DEPENDENCY_ROOTS: &[&str] = &["modules", "subworkflows", "workflows"];

/// File-name glob of nf-test test-definition files.
pub const TEST_FILE_GLOB: &str = "*.nf.test";

/// File-name glob of Nextflow implementation files.
pub const SOURCE_FILE_GLOB: &str = "*.nf";
