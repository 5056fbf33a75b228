//! Test utilities for nfscope

use std::fs;
use tempfile::TempDir;

/// Create a repository with a specific file structure
pub fn create_repo_with_structure(structure: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    for (path, content) in structure {
        let full_path = root.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }

        fs::write(&full_path, content).unwrap();
    }

    temp_dir
}

/// A small pipeline:
///
/// - process `FOO`, and process `BAR` whose test runs `FOO` in its setup;
/// - subworkflow `BAZ` including `FOO` and `BAR`;
/// - workflow `QUX` including only `BAZ`;
/// - function `GREET` and a declaration-less pipeline test.
pub fn create_pipeline_repo() -> TempDir {
    create_repo_with_structure(&[
        ("main.nf", "include { QUX } from './workflows/qux/main'\n\nworkflow {\n    QUX()\n}\n"),
        ("nextflow.config", "params.outdir = 'results'\n"),
        ("README.md", "# test pipeline\n"),
        (
            "modules/foo/main.nf",
            "process FOO {\n    input:\n    path reads\n\n    script:\n    \"\"\"\n    touch out.txt\n    \"\"\"\n}\n",
        ),
        (
            "modules/foo/main.nf.test",
            r#"nextflow_process {

    name "Test Process FOO"
    script "./main.nf"
    process "FOO"

    test("runs") {
        when {
            process {
                """
                input[0] = file('reads.fq')
                """
            }
        }
        then {
            assert process.success
        }
    }
}
"#,
        ),
        (
            "modules/bar/main.nf",
            "process BAR {\n    script:\n    \"\"\"\n    echo bar\n    \"\"\"\n}\n",
        ),
        (
            "modules/bar/main.nf.test",
            r#"nextflow_process {

    name "Test Process BAR"
    script "./main.nf"
    process "BAR"

    setup {
        run("FOO") {
            script "../foo/main.nf"
        }
    }

    test("runs after FOO") {
        then {
            assert process.success
        }
    }
}
"#,
        ),
        (
            "subworkflows/baz/main.nf",
            r#"include { FOO } from '../../modules/foo/main'
include { BAR } from '../../modules/bar/main'

workflow BAZ {
    FOO()
    BAR()
}
"#,
        ),
        (
            "subworkflows/baz/main.nf.test",
            r#"nextflow_workflow {

    name "Test Workflow BAZ"
    script "./main.nf"
    workflow "BAZ"

    test("runs") {
        then {
            assert workflow.success
        }
    }
}
"#,
        ),
        (
            "subworkflows/utils/main.nf",
            "def greet(name) {\n    return \"hello ${name}\"\n}\n",
        ),
        (
            "subworkflows/utils/main.function.nf.test",
            r#"nextflow_function {

    name "Test Function GREET"
    script "./main.nf"
    function "GREET"

    test("greets") {
        then {
            assert function.success
        }
    }
}
"#,
        ),
        (
            "workflows/qux/main.nf",
            r#"include { BAZ } from '../../subworkflows/baz/main'

workflow QUX {
    BAZ()
}
"#,
        ),
        (
            "workflows/qux/main.nf.test",
            r#"nextflow_workflow {

    name "Test Workflow QUX"
    script "./main.nf"
    workflow "QUX"

    test("runs") {
        then {
            assert workflow.success
        }
    }
}
"#,
        ),
        (
            "tests/main.nf.test",
            r#"nextflow_pipeline {

    name "Test pipeline"
    script "../main.nf"

    test("default params") {
        then {
            assert workflow.success
        }
    }
}
"#,
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_pipeline_repo() {
        let temp_dir = create_pipeline_repo();
        let root = temp_dir.path();

        assert!(root.join("modules/foo/main.nf").exists());
        assert!(root.join("modules/bar/main.nf.test").exists());
        assert!(root.join("subworkflows/baz/main.nf").exists());
        assert!(root.join("workflows/qux/main.nf.test").exists());
        assert!(root.join("tests/main.nf.test").exists());
    }
}
