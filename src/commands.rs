//! CLI command implementations

use crate::Cli;
use anyhow::Context;
use nfscope_changes::{DiffOracle, GitDiffOracle};
use nfscope_core::{IgnoreSet, UnitKind};
use nfscope_indexer::{load_include_mapping, Coordinator, ImpactRequest};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Resolve the impacted tests between `base_ref` and `head_ref` and print them.
pub fn resolve(cli: &Cli) -> anyhow::Result<()> {
    let types = UnitKind::parse_list(&cli.types)?;
    let ignore = IgnoreSet::new(&cli.ignored_files)?;
    let include = cli
        .include
        .as_deref()
        .map(load_include_mapping)
        .transpose()?;

    let root = cli
        .path
        .canonicalize()
        .with_context(|| format!("repository root {} not found", cli.path.display()))?;

    let oracle = GitDiffOracle::open(&root)?;
    let changed = oracle.changed_paths(&cli.base_ref, &cli.head_ref)?;

    let request = ImpactRequest::new(root.clone(), changed)?
        .with_ignore(ignore)
        .with_include(include)
        .with_types(types)
        .with_depth(cli.n_parents)
        .with_recursive_siblings(cli.recursive_siblings);

    let report = Coordinator::new().run(&request)?;
    tracing::info!(
        "{} impacted components ({} changed, {} via setup, {} via include)",
        report.components.len(),
        report.changed_tests,
        report.setup_dependents,
        report.include_dependents
    );

    let json = report.to_json()?;
    println!("{json}");

    if let Some(path) = &cli.github_output {
        append_github_output(path, &json)?;
    }

    Ok(())
}

fn append_github_output(path: &Path, json: &str) -> anyhow::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open {}", path.display()))?;
    writeln!(file, "components={json}")
        .with_context(|| format!("cannot write {}", path.display()))?;
    tracing::debug!("Wrote components to {}", path.display());
    Ok(())
}
