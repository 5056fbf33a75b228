//! Classification table: declared type → test-definition files

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::model::{UnitId, UnitKind};

/// One classified test-definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestUnit {
    /// Declared keyword, case preserved (`process`, `workflow`, ...).
    pub kind: String,
    /// Declared name with quotes stripped.
    pub name: String,
    pub path: PathBuf,
}

impl TestUnit {
    pub fn id(&self) -> UnitId {
        UnitId::new(&self.name)
    }
}

/// Test units grouped by declared type.
///
/// Keyed by open strings rather than [`UnitKind`]: whatever keyword a file
/// declares gets its own category. Selection by [`UnitKind`] only reads the
/// canonical keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Classification {
    by_kind: BTreeMap<String, Vec<TestUnit>>,
}

impl Classification {
    /// An empty table seeded with the four canonical types.
    pub fn new() -> Self {
        let by_kind = UnitKind::ALL
            .iter()
            .map(|k| (k.as_str().to_string(), Vec::new()))
            .collect();
        Classification { by_kind }
    }

    pub fn insert(&mut self, unit: TestUnit) {
        self.by_kind.entry(unit.kind.clone()).or_default().push(unit);
    }

    /// Every type key present, canonical or not.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.by_kind.keys().map(String::as_str)
    }

    pub fn units(&self, kind: &str) -> &[TestUnit] {
        self.by_kind.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn names(&self, kind: &str) -> Vec<&str> {
        self.units(kind).iter().map(|u| u.name.as_str()).collect()
    }

    /// Units of the requested types, concatenated in request order.
    pub fn select(&self, kinds: &[UnitKind]) -> Vec<&TestUnit> {
        kinds
            .iter()
            .flat_map(|k| self.units(k.as_str()))
            .collect()
    }

    /// Total number of classified files.
    pub fn len(&self) -> usize {
        self.by_kind.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Classification {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<TestUnit> for Classification {
    fn from_iter<T: IntoIterator<Item = TestUnit>>(iter: T) -> Self {
        let mut table = Classification::new();
        for unit in iter {
            table.insert(unit);
        }
        table
    }
}
