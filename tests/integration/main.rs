//! Integration tests for nfscope
//!
//! Each test builds a small pipeline repository with two commits and runs the
//! binary against it.

use assert_cmd::Command;
use git2::{IndexAddOption, Repository, Signature};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn nfscope() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("nfscope").expect("Failed to find nfscope binary");
    cmd.env_remove("GITHUB_OUTPUT");
    cmd
}

fn write(root: &Path, path: &str, content: &str) {
    let full = root.join(path);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, content).unwrap();
}

fn commit_all(repo: &Repository, message: &str) {
    let mut index = repo.index().unwrap();
    index.add_all(["*"], IndexAddOption::DEFAULT, None).unwrap();
    index.update_all(["*"], None).unwrap();
    index.write().unwrap();

    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = Signature::now("nfscope", "nfscope@example.com").unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<_> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap();
}

fn test_file(block: &str, kind: &str, name: &str, extra: &str) -> String {
    format!(
        "{block} {{\n\n    name \"Test {name}\"\n    script \"./main.nf\"\n    {kind} \"{name}\"\n{extra}\n    test(\"runs\") {{\n        then {{\n            assert {kind}.success\n        }}\n    }}\n}}\n"
    )
}

/// Pipeline repository with a `base` branch; `change` edits the working tree
/// before the head commit.
fn setup_pipeline(change: impl FnOnce(&Path)) -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    let repo = Repository::init(root).unwrap();

    write(root, "main.nf", "include { TOP } from './workflows/top/main'\n");
    write(root, "nextflow.config", "params.outdir = 'results'\n");
    write(root, "README.md", "# pipeline\n");
    write(
        root,
        "tests/main.nf.test",
        "nextflow_pipeline {\n\n    name \"Pipeline\"\n    script \"../main.nf\"\n}\n",
    );

    write(root, "modules/foo/main.nf", "process FOO {\n}\n");
    write(
        root,
        "modules/foo/main.nf.test",
        &test_file("nextflow_process", "process", "FOO", ""),
    );
    write(root, "modules/bar/main.nf", "process BAR {\n}\n");
    write(
        root,
        "modules/bar/main.nf.test",
        &test_file(
            "nextflow_process",
            "process",
            "BAR",
            "    setup {\n        run(\"FOO\") {\n            script \"../foo/main.nf\"\n        }\n    }\n",
        ),
    );

    write(
        root,
        "subworkflows/baz/main.nf",
        "include { FOO } from '../../modules/foo/main'\n\nworkflow BAZ {\n    FOO()\n}\n",
    );
    write(
        root,
        "subworkflows/baz/main.nf.test",
        &test_file("nextflow_workflow", "workflow", "BAZ", ""),
    );
    write(
        root,
        "workflows/top/main.nf",
        "include { BAZ } from '../../subworkflows/baz/main'\n\nworkflow TOP {\n    BAZ()\n}\n",
    );
    write(
        root,
        "workflows/top/main.nf.test",
        &test_file("nextflow_workflow", "workflow", "TOP", ""),
    );

    commit_all(&repo, "base");
    let base = repo.head().unwrap().peel_to_commit().unwrap();
    repo.branch("base", &base, false).unwrap();

    change(root);
    commit_all(&repo, "head");

    dir
}

fn run_json(dir: &TempDir, extra: &[&str]) -> Vec<String> {
    let output = nfscope()
        .arg("--path")
        .arg(dir.path())
        .args(["--base-ref", "base", "--head-ref", "HEAD"])
        .args(extra)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "nfscope failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

fn modify_foo(root: &Path) {
    write(root, "modules/foo/main.nf", "process FOO {\n    script: 'x'\n}\n");
}

#[test]
fn test_help_output() {
    nfscope()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("nf-test files affected"));
}

#[test]
fn test_changed_module_reports_dependents() {
    let dir = setup_pipeline(modify_foo);

    let components = run_json(&dir, &[]);
    assert_eq!(
        components,
        vec![
            "modules/bar/main.nf.test",
            "modules/foo/main.nf.test",
            "subworkflows/baz/main.nf.test",
        ]
    );
}

#[test]
fn test_include_dependents_are_single_hop() {
    let dir = setup_pipeline(modify_foo);

    let components = run_json(&dir, &[]);
    assert!(!components.iter().any(|c| c.starts_with("workflows/top")));
}

#[test]
fn test_n_parents_folds_output() {
    let dir = setup_pipeline(modify_foo);

    let components = run_json(&dir, &["--n-parents", "1"]);
    assert_eq!(
        components,
        vec!["modules/bar", "modules/foo", "subworkflows/baz"]
    );

    let components = run_json(&dir, &["-n", "2"]);
    assert_eq!(components, vec!["modules", "subworkflows"]);
}

#[test]
fn test_ignored_changes_report_nothing() {
    let dir = setup_pipeline(|root| write(root, "README.md", "# pipeline v2\n"));

    assert!(run_json(&dir, &[]).is_empty());
}

#[test]
fn test_custom_ignore_list_replaces_defaults() {
    let dir = setup_pipeline(modify_foo);

    assert!(run_json(&dir, &["--ignored-files", "*.nf"]).is_empty());
}

#[test]
fn test_type_filter() {
    let dir = setup_pipeline(modify_foo);

    assert!(run_json(&dir, &["--types", "workflow,pipeline"]).is_empty());
    assert_eq!(run_json(&dir, &["-t", "process"]).len(), 3);
}

#[test]
fn test_include_mapping_file() {
    let dir = setup_pipeline(|root| write(root, "nextflow.config", "params.outdir = 'out'\n"));
    let mapping = dir.path().join("include.yml");
    fs::write(&mapping, "tests/main.nf.test:\n  - nextflow.config\n").unwrap();

    let components = run_json(&dir, &["--include", mapping.to_str().unwrap()]);
    assert_eq!(components, vec!["tests/main.nf.test"]);
}

#[test]
fn test_github_output_is_appended() {
    let dir = setup_pipeline(modify_foo);
    let out_dir = TempDir::new().unwrap();
    let out = out_dir.path().join("github_output");
    fs::write(&out, "previous=1\n").unwrap();

    nfscope()
        .arg("-p")
        .arg(dir.path())
        .args(["-b", "base", "-r", "HEAD", "-n", "1"])
        .arg("--github-output")
        .arg(&out)
        .assert()
        .success();

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(
        written,
        "previous=1\ncomponents=[\"modules/bar\",\"modules/foo\",\"subworkflows/baz\"]\n"
    );
}

#[test]
fn test_log_level_is_case_insensitive() {
    let dir = setup_pipeline(modify_foo);

    for level in ["DEBUG", "WARNING", "error", "Info"] {
        assert_eq!(run_json(&dir, &["--log-level", level]).len(), 3);
    }

    nfscope()
        .arg("-p")
        .arg(dir.path())
        .args(["-b", "base", "-r", "HEAD", "-l", "TRACE"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_type_fails() {
    let dir = setup_pipeline(modify_foo);

    nfscope()
        .arg("-p")
        .arg(dir.path())
        .args(["-b", "base", "-r", "HEAD", "-t", "process,module"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("module"));
}

#[test]
fn test_missing_revision_fails() {
    let dir = setup_pipeline(modify_foo);

    nfscope()
        .arg("-p")
        .arg(dir.path())
        .args(["-b", "no-such-branch", "-r", "HEAD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-branch"));
}

#[test]
fn test_missing_include_file_fails() {
    let dir = setup_pipeline(modify_foo);

    nfscope()
        .arg("-p")
        .arg(dir.path())
        .args(["-b", "base", "-r", "HEAD", "-i", "missing.yml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.yml"));
}
