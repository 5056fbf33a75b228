//! Core data structures for units and dependency edges

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;

/// Declared type of a test-definition file without a recognisable declaration.
pub const PIPELINE_KIND: &str = "pipeline";

/// Name of the whole-repository sentinel unit.
pub const PIPELINE_NAME: &str = "PIPELINE";

/// Normalised, case-insensitive identifier of a testable component.
///
/// Built from either a quoted declaration (`process "FOO_BAR"`) or a
/// path-like dependency target (`foo/bar`); both fold to `foo_bar`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(String);

impl UnitId {
    pub fn new(raw: &str) -> Self {
        UnitId(raw.to_lowercase().replace('/', "_"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UnitId {
    fn from(raw: &str) -> Self {
        UnitId::new(raw)
    }
}

/// Test types a caller may select.
///
/// The command line accepts only these. The classification table itself is
/// keyed by open strings, see [`crate::Classification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitKind {
    Function,
    Process,
    Workflow,
    Pipeline,
}

impl UnitKind {
    pub const ALL: [UnitKind; 4] = [
        UnitKind::Function,
        UnitKind::Process,
        UnitKind::Workflow,
        UnitKind::Pipeline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitKind::Function => "function",
            UnitKind::Process => "process",
            UnitKind::Workflow => "workflow",
            UnitKind::Pipeline => PIPELINE_KIND,
        }
    }

    /// Parse a comma separated list such as `function,process`.
    ///
    /// Empty items are skipped; any unknown item rejects the whole list.
    pub fn parse_list(list: &str) -> Result<Vec<UnitKind>, ConfigError> {
        let mut kinds = Vec::new();
        for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let kind = item.parse::<UnitKind>()?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        if kinds.is_empty() {
            return Err(ConfigError::InvalidTestType(list.to_string()));
        }
        Ok(kinds)
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "function" => Ok(UnitKind::Function),
            "process" => Ok(UnitKind::Process),
            "workflow" => Ok(UnitKind::Workflow),
            "pipeline" => Ok(UnitKind::Pipeline),
            other => Err(ConfigError::InvalidTestType(other.to_string())),
        }
    }
}

/// Which textual mechanism declared a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// `run("<target>")` inside an nf-test `setup` block.
    Run,
    /// `include { <target> } from '...'` inside a Nextflow source file.
    Include,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Run => f.write_str("run"),
            EdgeKind::Include => f.write_str("include"),
        }
    }
}

/// A directed dependency reference extracted from one line of source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub kind: EdgeKind,
    /// File the statement was found in.
    pub source: PathBuf,
    pub target: UnitId,
    /// 1-based line number of the statement.
    pub line: u32,
}
