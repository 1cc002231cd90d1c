//! Tests for `linkcat deps`.

use super::linkcat;
use linkcat::test_utils::TestProject;
use predicates::prelude::*;

fn chain() -> TestProject {
    let project = TestProject::new().unwrap();
    project.write("main.css", "@import url(layout.css);\n@import url(theme.css);\n").unwrap();
    project.write("layout.css", "@import url(grid.css);\n.layout {}\n").unwrap();
    project.write("grid.css", ".grid {}\n").unwrap();
    project.write("theme.css", ".theme {}\n").unwrap();
    project
}

fn lines(project: &TestProject, names: &[&str]) -> String {
    names
        .iter()
        .map(|name| format!("{}\n", project.canonical(name).unwrap().display()))
        .collect()
}

#[test]
fn test_direct_dependencies() {
    let project = chain();

    linkcat(&project)
        .args(["deps", "main.css"])
        .assert()
        .success()
        .stdout(lines(&project, &["layout.css", "theme.css"]));
}

#[test]
fn test_recursive_dependencies() {
    let project = chain();

    linkcat(&project)
        .args(["deps", "--recursive", "main.css"])
        .assert()
        .success()
        .stdout(lines(&project, &["grid.css", "layout.css", "theme.css"]));
}

#[test]
fn test_json_format() {
    let project = chain();

    let assert = linkcat(&project)
        .args(["deps", "-r", "--format", "json", "layout.css"])
        .assert()
        .success();

    let parsed: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!([
            {
                "path": project.canonical("grid.css").unwrap().display().to_string(),
                "anonymous": false,
            }
        ])
    );
}

#[test]
fn test_bundle_lists_inputs_after_their_dependencies() {
    let project = chain();

    linkcat(&project)
        .args(["deps", "-r", "layout.css", "theme.css"])
        .assert()
        .success()
        .stdout(lines(&project, &["grid.css", "layout.css", "theme.css"]));
}

#[test]
fn test_standard_input_without_dependencies() {
    let project = TestProject::new().unwrap();

    linkcat(&project)
        .args(["deps", "-t", "js"])
        .write_stdin("var lonely;\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
