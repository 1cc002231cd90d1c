//! Tests for `linkcat cat`.

use super::linkcat;
use linkcat::test_utils::TestProject;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_stylesheet_header_ends_at_first_selector() {
    let project = TestProject::new().unwrap();
    project
        .write("main.css", "@import url(b.css);\nhtml{color:red}\n@import url(c.css);\n")
        .unwrap();
    project.write("b.css", ".b { color: blue }\n").unwrap();
    project.write("c.css", ".c { color: green }\n").unwrap();

    linkcat(&project)
        .args(["cat", "main.css"])
        .assert()
        .success()
        .stdout(".b { color: blue }\n@import url(b.css);\nhtml{color:red}\n@import url(c.css);\n");
}

#[test]
fn test_script_tags_before_code() {
    let project = TestProject::new().unwrap();
    project
        .write("app.js", "/** @depend a.js */\n// @depend b.js\nvar x = 1;\n// @depend c.js\n")
        .unwrap();
    project.write("a.js", "var a;\n").unwrap();
    project.write("b.js", "var b;\n").unwrap();
    project.write("c.js", "var c;\n").unwrap();

    linkcat(&project)
        .args(["cat", "app.js"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("var a;\nvar b;\n/** @depend a.js */"))
        .stdout(predicate::str::contains("var c;").not());
}

#[test]
fn test_nested_dependencies_come_first() {
    let project = TestProject::new().unwrap();
    project.write("site/main.css", "@import 'layout/page.css';\nbody {}\n").unwrap();
    project.write("site/layout/page.css", "@import \"grid.css\";\n.page {}\n").unwrap();
    project.write("site/layout/grid.css", ".grid {}\n").unwrap();

    linkcat(&project)
        .args(["cat", "site/main.css"])
        .assert()
        .success()
        .stdout(".grid {}\n@import \"grid.css\";\n.page {}\n@import 'layout/page.css';\nbody {}\n");
}

#[test]
fn test_shallow_inlines_direct_dependencies_only() {
    let project = TestProject::new().unwrap();
    project.write("a.css", "@import url(b.css);\n.a {}\n").unwrap();
    project.write("b.css", "@import url(c.css);\n.b {}\n").unwrap();
    project.write("c.css", ".c {}\n").unwrap();

    linkcat(&project)
        .args(["cat", "--shallow", "a.css"])
        .assert()
        .success()
        .stdout("@import url(c.css);\n.b {}\n@import url(b.css);\n.a {}\n");
}

#[test]
fn test_strip_directives() {
    let project = TestProject::new().unwrap();
    project.write("a.css", "@import url(b.css);\n.a {}\n").unwrap();
    project.write("b.css", "@charset \"utf-8\";\n.b {}\n").unwrap();

    linkcat(&project)
        .args(["cat", "--strip-directives", "a.css"])
        .assert()
        .success()
        .stdout("@charset \"utf-8\";\n.b {}\n.a {}\n");
}

#[test]
fn test_several_inputs_share_dependencies() {
    let project = TestProject::new().unwrap();
    project.write("one.js", "// @depend shared.js\nvar one;\n").unwrap();
    project.write("two.js", "// @depend shared.js\nvar two;\n").unwrap();
    project.write("shared.js", "var shared;\n").unwrap();

    linkcat(&project)
        .args(["cat", "one.js", "two.js"])
        .assert()
        .success()
        .stdout("var shared;\n// @depend shared.js\nvar one;\n// @depend shared.js\nvar two;\n");
}

#[test]
fn test_cycle_terminates() {
    let project = TestProject::new().unwrap();
    project.write("a.js", "// @depend b.js\nvar a;\n").unwrap();
    project.write("b.js", "// @depend a.js\nvar b;\n").unwrap();

    linkcat(&project)
        .args(["cat", "a.js"])
        .assert()
        .success()
        .stdout("// @depend a.js\nvar b;\n// @depend b.js\nvar a;\n");
}

#[test]
fn test_standard_input() {
    let project = TestProject::new().unwrap();
    project.write("b.js", "var b;\n").unwrap();

    linkcat(&project)
        .args(["cat", "--type", "js"])
        .write_stdin("// @depend b.js\nvar main;\n")
        .assert()
        .success()
        .stdout("var b;\n// @depend b.js\nvar main;\n");
}

#[test]
fn test_output_file() {
    let project = TestProject::new().unwrap();
    project.write("a.css", "@import url(b.css);\n.a {}\n").unwrap();
    project.write("b.css", ".b {}\n").unwrap();
    project.write("dist/main.css", "old output that is longer than the new one\n").unwrap();

    linkcat(&project)
        .args(["concat", "a.css", "-o", "dist/main.css"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(project.read("dist/main.css").unwrap(), ".b {}\n@import url(b.css);\n.a {}\n");
}

#[test]
fn test_include_directory() {
    let project = TestProject::new().unwrap();
    project.write("app.js", "// @depend widgets.js\nvar app;\n").unwrap();
    project.write("vendor/widgets.js", "var widgets;\n").unwrap();

    linkcat(&project).args(["cat", "app.js"]).assert().failure();

    linkcat(&project)
        .args(["cat", "-I", "vendor", "app.js"])
        .assert()
        .success()
        .stdout("var widgets;\n// @depend widgets.js\nvar app;\n");
}

#[test]
fn test_missing_input_file() {
    let project = TestProject::new().unwrap();

    linkcat(&project)
        .args(["cat", "missing.css"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Input file missing.css does not exist"));
}

#[test]
fn test_missing_reference() {
    let project = TestProject::new().unwrap();
    project.write("main.css", "@import url(ghost.css);\nbody {}\n").unwrap();

    linkcat(&project)
        .args(["cat", "main.css"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("Dependency 'ghost.css' referenced from"))
        .stderr(predicate::str::contains("--include"));
}

#[test]
fn test_output_to_directory_is_rejected() {
    let project = TestProject::new().unwrap();
    project.write("a.css", ".a {}\n").unwrap();
    fs::create_dir_all(project.path("dist")).unwrap();

    linkcat(&project)
        .args(["cat", "a.css", "--output", "dist"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid output target, dist"));
}

#[test]
fn test_unknown_type_is_a_usage_error() {
    let project = TestProject::new().unwrap();
    project.write("a.css", ".a {}\n").unwrap();

    linkcat(&project)
        .args(["cat", "--type", "sass", "a.css"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sass"));
}

#[test]
fn test_malformed_line_is_logged_and_skipped() {
    let project = TestProject::new().unwrap();
    let mut main = b"@import url(a.css);\n@import url(\xff.css);\n".to_vec();
    main.extend_from_slice(b"@import url(b.css);\n");
    project.write("main.css", main).unwrap();
    project.write("a.css", ".a {}\n").unwrap();
    project.write("b.css", ".b {}\n").unwrap();

    let assert = linkcat(&project).args(["deps", "main.css"]).assert().success();
    let output = assert.get_output();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(stdout.lines().count(), 2, "{stdout}");
    assert!(stderr.contains("main.css:2"), "{stderr}");
}
