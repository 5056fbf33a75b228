//! Glob patterns matched against paths from the right
//!
//! A relative pattern with `k` components matches any path whose last `k`
//! components match it, so `*.md` matches `docs/usage.md` and `.git/*`
//! matches `repo/.git/HEAD`. An absolute pattern has to match the whole
//! path. `*` never crosses a `/`.

use std::collections::HashMap;
use std::path::{Component, Path};

use globset::{GlobBuilder, GlobMatcher};

use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    matcher: GlobMatcher,
    components: usize,
    absolute: bool,
}

impl PathPattern {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let absolute = pattern.starts_with('/');
        let trimmed = pattern.trim_start_matches('/');
        let components = trimmed
            .split('/')
            .filter(|c| !c.is_empty() && *c != ".")
            .count();

        let matcher = GlobBuilder::new(trimmed)
            .literal_separator(true)
            .build()
            .map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?
            .compile_matcher();

        Ok(PathPattern {
            raw: pattern.to_string(),
            matcher,
            components,
            absolute,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, path: &Path) -> bool {
        let parts = path_parts(path);
        if self.components == 0 || parts.len() < self.components {
            return false;
        }
        if self.absolute {
            return path.has_root()
                && parts.len() == self.components
                && self.matcher.is_match(parts.join("/"));
        }
        let tail = parts[parts.len() - self.components..].join("/");
        self.matcher.is_match(tail)
    }
}

fn path_parts(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect()
}

/// Ordered set of ignore globs; a path is ignored if any of them matches.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    patterns: Vec<PathPattern>,
}

impl IgnoreSet {
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| PathPattern::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(IgnoreSet { patterns })
    }

    /// The built-in ignore list (VCS metadata, docs, non-functional config).
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::new(crate::DEFAULT_IGNORED)
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }
}

/// Glob → logical key pairs, inverted from a `key -> [glob, ...]` source.
///
/// A glob listed under two keys maps to whichever key was inserted last;
/// the pair keeps the position where the glob first appeared.
#[derive(Debug, Clone, Default)]
pub struct IncludeMapping {
    entries: Vec<(PathPattern, String)>,
}

impl IncludeMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invert `key -> [glob, ...]` entries, processed in the given order.
    pub fn from_entries<I, G>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, G)>,
        G: IntoIterator<Item = String>,
    {
        let mut mapping = IncludeMapping::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (key, globs) in entries {
            for glob in globs {
                if let Some(&idx) = seen.get(&glob) {
                    tracing::debug!(
                        "Include glob '{}' reassigned from '{}' to '{}'",
                        glob,
                        mapping.entries[idx].1,
                        key
                    );
                    mapping.entries[idx].1 = key.clone();
                    continue;
                }
                let pattern = PathPattern::new(&glob)?;
                seen.insert(glob, mapping.entries.len());
                mapping.entries.push((pattern, key.clone()));
            }
        }

        Ok(mapping)
    }

    /// Logical keys whose glob matches `path`, in mapping order.
    pub fn keys_for<'a>(&'a self, path: &'a Path) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(pattern, _)| pattern.matches(path))
            .map(|(_, key)| key.as_str())
    }

    /// Look up the key a glob currently maps to.
    pub fn key_of(&self, glob: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(pattern, _)| pattern.as_str() == glob)
            .map(|(_, key)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
