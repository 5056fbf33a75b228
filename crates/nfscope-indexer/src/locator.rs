//! Finds test-definition and source files for a list of changed paths

use ignore::WalkBuilder;
use nfscope_core::{ConfigError, PathPattern, SOURCE_FILE_GLOB, TEST_FILE_GLOB};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Resolves paths to the files whose name matches a glob.
///
/// Per input path:
/// - an existing file whose name matches is returned as is;
/// - a directory is searched recursively;
/// - any other existing file has its parent directory searched, one level
///   deep unless [`Locator::recursive_siblings`] is set;
/// - a path that no longer exists contributes nothing.
#[derive(Debug, Clone)]
pub struct Locator {
    pattern: PathPattern,
    recursive_siblings: bool,
}

impl Locator {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        Ok(Locator {
            pattern: PathPattern::new(pattern)?,
            recursive_siblings: false,
        })
    }

    /// Locator for nf-test files (`*.nf.test`).
    pub fn test_files() -> Result<Self, ConfigError> {
        Self::new(TEST_FILE_GLOB)
    }

    /// Locator for Nextflow sources (`*.nf`).
    pub fn source_files() -> Result<Self, ConfigError> {
        Self::new(SOURCE_FILE_GLOB)
    }

    /// Search below a changed file's parent directory too, not just beside it.
    pub fn recursive_siblings(mut self, recursive: bool) -> Self {
        self.recursive_siblings = recursive;
        self
    }

    pub fn matches(&self, path: &Path) -> bool {
        self.pattern.matches(path)
    }

    /// Sorted, deduplicated matches for every input path.
    pub fn locate<I, P>(&self, paths: I) -> Vec<PathBuf>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut found = BTreeSet::new();

        for path in paths {
            let path = path.as_ref();
            if path.is_file() && self.matches(path) {
                found.insert(path.to_path_buf());
            } else if path.is_dir() {
                self.walk(path, None, &mut found);
            } else if path.is_file() {
                let parent = match path.parent() {
                    Some(p) if !p.as_os_str().is_empty() => p,
                    _ => Path::new("."),
                };
                let depth = if self.recursive_siblings { None } else { Some(1) };
                self.walk(parent, depth, &mut found);
            } else {
                tracing::debug!("No such path, skipping: {}", path.display());
            }
        }

        found.into_iter().collect()
    }

    fn walk(&self, dir: &Path, max_depth: Option<usize>, found: &mut BTreeSet<PathBuf>) {
        let walker = WalkBuilder::new(dir)
            .standard_filters(false)
            .follow_links(false)
            .max_depth(max_depth)
            .build();

        for entry in walker.flatten() {
            let is_file = entry.file_type().is_some_and(|t| t.is_file());
            if is_file && self.matches(entry.path()) {
                found.insert(entry.into_path());
            }
        }
    }
}
