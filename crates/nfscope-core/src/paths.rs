//! Path filtering, include expansion, ancestor folding and relativisation

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::pattern::{IgnoreSet, IncludeMapping};

/// Drop every path matched by an ignore glob and deduplicate the rest.
pub fn filter_paths<I, P>(changed: I, ignore: &IgnoreSet) -> BTreeSet<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    changed
        .into_iter()
        .filter_map(|path| {
            let path = path.as_ref();
            if ignore.is_ignored(path) {
                tracing::debug!("Ignoring changed path: {}", path.display());
                None
            } else {
                Some(path.to_path_buf())
            }
        })
        .collect()
}

/// Extra "changed" paths forced in by the include mapping.
///
/// Every key whose glob matches a changed path is emitted once per match,
/// joined onto `root`. Keys need not name existing files. No deduplication
/// happens here.
pub fn expand_includes<'a, I>(changed: I, mapping: &IncludeMapping, root: &Path) -> Vec<PathBuf>
where
    I: IntoIterator<Item = &'a PathBuf>,
{
    let mut extra = Vec::new();
    for path in changed {
        for key in mapping.keys_for(path) {
            tracing::debug!("{} matched include key '{}'", path.display(), key);
            extra.push(root.join(key));
        }
    }
    extra
}

/// Walk `depth` directory levels up from `path`, never above `root`.
pub fn nth_parent(path: &Path, depth: usize, root: &Path) -> PathBuf {
    let mut current = path;
    for _ in 0..depth {
        if current == root {
            break;
        }
        match current.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => current = parent,
            _ => break,
        }
    }
    current.to_path_buf()
}

/// Fold every path to its ancestor at `depth` and deduplicate.
pub fn fold_paths<I, P>(paths: I, depth: usize, root: &Path) -> BTreeSet<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|p| nth_parent(p.as_ref(), depth, root))
        .collect()
}

/// Render `path` relative to `root`; the root itself renders as `.`.
///
/// Paths outside `root` are returned unchanged.
pub fn relativize(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => rel.to_string_lossy().into_owned(),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}
