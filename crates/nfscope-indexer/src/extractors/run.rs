//! `run("<target>")` statements in nf-test setup blocks

use super::{scan_lines, EdgeExtractor, QUOTES};
use nfscope_core::{Edge, EdgeKind, UnitId};
use std::path::Path;

pub struct RunExtractor;

impl EdgeExtractor for RunExtractor {
    fn kind(&self) -> EdgeKind {
        EdgeKind::Run
    }

    fn extract(&self, source: &Path, content: &str) -> Vec<Edge> {
        scan_lines(EdgeKind::Run, source, content, parse_run)
    }
}

/// Target of a `run(...)` line.
///
/// Only the first whitespace token is read, so options after the target
/// (`run("FOO", alias: "BAR")`) are dropped. A trailing `,` is trimmed along
/// with `)`, so such a call still resolves to `foo` instead of `foo",`.
pub fn parse_run(line: &str) -> Option<UnitId> {
    let trimmed = line.trim();
    if !trimmed.starts_with("run") {
        return None;
    }
    let token = trimmed.split_whitespace().next()?;
    let target = token
        .strip_prefix("run(")?
        .trim_end_matches(&[',', ')'][..])
        .trim_matches(QUOTES);
    if target.is_empty() {
        return None;
    }
    Some(UnitId::new(target))
}
