//! Reads the `<type> "<name>"` declaration of nf-test files

use crate::extractors::QUOTES;
use nfscope_core::{Classification, TestUnit, PIPELINE_KIND, PIPELINE_NAME};
use rayon::prelude::*;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Exactly two tokens: a keyword starting with workflow/process/function and
/// a double-quoted name.
static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^((?:workflow|process|function)\S*)\s+("\S*")$"#)
        .expect("declaration regex is valid")
});

/// Declared `(type, name)` of a test-definition file.
///
/// The first matching line wins. The type keeps its case; quotes are
/// stripped from the name. Files without a declaration test the whole
/// pipeline and classify as `("pipeline", "PIPELINE")`.
pub fn declaration(content: &str) -> (String, String) {
    for line in content.lines() {
        if let Some(caps) = DECLARATION.captures(line.trim()) {
            let kind = caps[1].to_string();
            let name = caps[2].trim_matches(QUOTES).to_string();
            return (kind, name);
        }
    }
    (PIPELINE_KIND.to_string(), PIPELINE_NAME.to_string())
}

/// Classify one file; `None` if it cannot be read.
pub fn classify_file(path: &Path) -> Option<TestUnit> {
    let content = crate::source::read_source(path)?;
    let (kind, name) = declaration(&content);
    tracing::debug!("{}: {} \"{}\"", path.display(), kind, name);
    Some(TestUnit {
        kind,
        name,
        path: path.to_path_buf(),
    })
}

/// Build the classification table for a set of test-definition files.
pub fn classify(files: &[PathBuf]) -> Classification {
    let units: Vec<TestUnit> = files
        .par_iter()
        .filter_map(|path| classify_file(path))
        .collect();
    units.into_iter().collect()
}
