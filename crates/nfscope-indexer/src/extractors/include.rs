//! `include { <target> } from '...'` statements in Nextflow sources

use super::{scan_lines, EdgeExtractor, QUOTES};
use nfscope_core::{Edge, EdgeKind, UnitId};
use std::path::Path;

pub struct IncludeExtractor;

impl EdgeExtractor for IncludeExtractor {
    fn kind(&self) -> EdgeKind {
        EdgeKind::Include
    }

    fn extract(&self, source: &Path, content: &str) -> Vec<Edge> {
        scan_lines(EdgeKind::Include, source, content, parse_include)
    }
}

/// Target of an `include {` line: its third whitespace token.
///
/// Path-like targets fold to unit names, `foo/bar` → `foo_bar`. Lines too
/// short to have a third token yield nothing.
pub fn parse_include(line: &str) -> Option<UnitId> {
    if !line.contains("include {") {
        return None;
    }
    let token = line.split_whitespace().nth(2)?;
    let target = token.trim_matches(QUOTES);
    if target.is_empty() || target == "}" {
        return None;
    }
    Some(UnitId::new(target))
}
