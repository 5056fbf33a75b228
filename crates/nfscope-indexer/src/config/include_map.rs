//! YAML include mapping: `key: [glob, ...]`
//!
//! When a changed path matches one of a key's globs, the key itself is
//! treated as changed. Keys usually name a directory, e.g.
//!
//! ```yaml
//! tests:
//!   - nextflow.config
//!   - conf/test*.config
//! ```

use nfscope_core::{ConfigError, IncludeMapping};
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IncludeFileError {
    #[error("cannot read include file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in include file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("include file must be a mapping of keys to lists of globs")]
    NotAMapping,

    #[error("include key '{0}' must map to a list of globs")]
    NotAList(String),

    #[error(transparent)]
    Pattern(#[from] ConfigError),
}

/// Load and invert an include mapping file.
pub fn load_include_mapping(path: &Path) -> Result<IncludeMapping, IncludeFileError> {
    let text = std::fs::read_to_string(path).map_err(|source| IncludeFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mapping = parse_include_mapping(&text)?;
    tracing::info!(
        "Loaded {} include globs from {}",
        mapping.len(),
        path.display()
    );
    Ok(mapping)
}

/// Parse and invert include mapping YAML; keys keep their file order.
pub fn parse_include_mapping(text: &str) -> Result<IncludeMapping, IncludeFileError> {
    let value: Value = serde_yaml::from_str(text)?;
    let map = match value {
        Value::Null => return Ok(IncludeMapping::new()),
        Value::Mapping(map) => map,
        _ => return Err(IncludeFileError::NotAMapping),
    };

    let mut entries = Vec::with_capacity(map.len());
    for (key, globs) in map {
        let key = scalar_to_string(&key).ok_or(IncludeFileError::NotAMapping)?;
        let Value::Sequence(items) = globs else {
            return Err(IncludeFileError::NotAList(key));
        };
        let globs = items
            .iter()
            .map(scalar_to_string)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| IncludeFileError::NotAList(key.clone()))?;
        entries.push((key, globs));
    }

    Ok(IncludeMapping::from_entries(entries)?)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
