//! Dependency edge extractors
//!
//! Both extractors are line scanners looking for one syntactic shape each.
//! A statement split over several lines is not recognised. Anything that
//! wants a real Nextflow parser can implement [`EdgeExtractor`] instead.

pub mod include;
pub mod run;

use nfscope_core::{Edge, EdgeKind};
use std::path::Path;

pub use include::IncludeExtractor;
pub use run::RunExtractor;

/// Quote characters stripped around names and targets.
pub(crate) const QUOTES: &[char] = &['"', '\''];

/// Trait for dependency edge extractors
pub trait EdgeExtractor: Send + Sync {
    /// Kind of edge this extractor yields.
    fn kind(&self) -> EdgeKind;

    /// Extract all edges from the text of `source`.
    fn extract(&self, source: &Path, content: &str) -> Vec<Edge>;
}

/// Get the extractor for an edge kind
pub fn extractor_for(kind: EdgeKind) -> Box<dyn EdgeExtractor> {
    match kind {
        EdgeKind::Run => Box::new(RunExtractor),
        EdgeKind::Include => Box::new(IncludeExtractor),
    }
}

/// Read `path` and extract its edges; unreadable files have none.
pub fn extract_file(extractor: &dyn EdgeExtractor, path: &Path) -> Vec<Edge> {
    let Some(content) = crate::source::read_source(path) else {
        return Vec::new();
    };
    extractor.extract(path, &content)
}

/// Shared line loop: `parse` maps one line to an optional target.
pub(crate) fn scan_lines<F>(kind: EdgeKind, source: &Path, content: &str, parse: F) -> Vec<Edge>
where
    F: Fn(&str) -> Option<nfscope_core::UnitId>,
{
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            parse(line).map(|target| Edge {
                kind,
                source: source.to_path_buf(),
                target,
                line: (idx as u32) + 1,
            })
        })
        .collect()
}
