//! Diff oracle backed by libgit2

use crate::{ChangesError, DiffOracle};
use git2::{Repository, Tree};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct GitDiffOracle {
    repo: Repository,
}

impl GitDiffOracle {
    /// Open the repository whose working tree is `root`.
    pub fn open(root: &Path) -> Result<Self, ChangesError> {
        let repo = Repository::open(root).map_err(|source| ChangesError::Open {
            path: root.to_path_buf(),
            source,
        })?;
        Ok(GitDiffOracle { repo })
    }

    fn tree(&self, rev: &str) -> Result<Tree<'_>, ChangesError> {
        let missing = |source| ChangesError::MissingRevision {
            rev: rev.to_string(),
            source,
        };
        let object = self.repo.revparse_single(rev).map_err(missing)?;
        object.peel_to_tree().map_err(missing)
    }
}

impl DiffOracle for GitDiffOracle {
    fn changed_paths(&self, from: &str, to: &str) -> Result<Vec<PathBuf>, ChangesError> {
        let from_tree = self.tree(from)?;
        let to_tree = self.tree(to)?;

        let diff = self
            .repo
            .diff_tree_to_tree(Some(&from_tree), Some(&to_tree), None)
            .map_err(ChangesError::Diff)?;

        let mut paths = BTreeSet::new();
        for delta in diff.deltas() {
            debug!(
                "{:?}: {:?} -> {:?}",
                delta.status(),
                delta.old_file().path(),
                delta.new_file().path()
            );
            paths.extend(delta.new_file().path().map(Path::to_path_buf));
            paths.extend(delta.old_file().path().map(Path::to_path_buf));
        }

        info!("{} files changed between {} and {}", paths.len(), from, to);
        Ok(paths.into_iter().collect())
    }
}
