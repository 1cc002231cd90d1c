//! Tests for the config file, the home directory, and package environments.

use super::linkcat;
use linkcat::test_utils::TestProject;
use predicates::prelude::*;

#[test]
fn test_config_search_paths() {
    let project = TestProject::new().unwrap();
    project.write("app.js", "// @depend util.js\nvar app;\n").unwrap();
    project.write("shared/util.js", "var util;\n").unwrap();
    project.write_config("search_paths = [\"shared\"]\n").unwrap();

    linkcat(&project)
        .args(["cat", "app.js"])
        .assert()
        .success()
        .stdout("var util;\n// @depend util.js\nvar app;\n");
}

#[test]
fn test_config_defaults_can_be_changed() {
    let project = TestProject::new().unwrap();
    project.write("a.css", "@import url(b.css);\n.a {}\n").unwrap();
    project.write("b.css", "@import url(c.css);\n.b {}\n").unwrap();
    project.write("c.css", ".c {}\n").unwrap();
    project.write_config("recursive = false\nstrip_directives = true\n").unwrap();

    linkcat(&project)
        .args(["cat", "a.css"])
        .assert()
        .success()
        .stdout(".b {}\n.a {}\n");
}

#[test]
fn test_explicit_config_file() {
    let project = TestProject::new().unwrap();
    project.write("a.css", "@import url(b.css);\n.a {}\n").unwrap();
    project.write("b.css", ".b {}\n").unwrap();
    project.write("linkcat.toml", "strip_directives = true\n").unwrap();

    linkcat(&project)
        .args(["cat", "--config", "linkcat.toml", "a.css"])
        .assert()
        .success()
        .stdout(".b {}\n.a {}\n");

    linkcat(&project)
        .env("LINKCAT_CONFIG", project.path("linkcat.toml"))
        .args(["cat", "a.css"])
        .assert()
        .success()
        .stdout(".b {}\n.a {}\n");
}

#[test]
fn test_missing_explicit_config_file() {
    let project = TestProject::new().unwrap();
    project.write("a.css", ".a {}\n").unwrap();

    linkcat(&project)
        .args(["cat", "-c", "nope.toml", "a.css"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config file nope.toml does not exist"));
}

#[test]
fn test_invalid_config_file() {
    let project = TestProject::new().unwrap();
    project.write("a.css", ".a {}\n").unwrap();
    project.write_config("recursive = \"maybe\"\n").unwrap();

    linkcat(&project)
        .args(["cat", "a.css"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse"))
        .stderr(predicate::str::contains("config.toml"));
}

#[test]
fn test_package_lib_directories() {
    let project = TestProject::new().unwrap();
    project.write("main.css", "@import url(reset.css);\nbody {}\n").unwrap();
    project.write_package("default", "reset", "reset.css", "* { margin: 0 }\n").unwrap();
    project.write_package("legacy", "reset", "reset.css", "* { padding: 0 }\n").unwrap();

    linkcat(&project)
        .args(["cat", "main.css"])
        .assert()
        .success()
        .stdout("* { margin: 0 }\n@import url(reset.css);\nbody {}\n");

    linkcat(&project)
        .env("LINKCAT_ENV", "legacy")
        .args(["cat", "main.css"])
        .assert()
        .success()
        .stdout("* { padding: 0 }\n@import url(reset.css);\nbody {}\n");
}

#[test]
fn test_project_files_win_over_packages() {
    let project = TestProject::new().unwrap();
    project.write("main.css", "@import url(reset.css);\nbody {}\n").unwrap();
    project.write("reset.css", "/* local */\n").unwrap();
    project.write_package("default", "reset", "reset.css", "/* package */\n").unwrap();

    linkcat(&project)
        .args(["cat", "main.css"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/* local */\n"));
}
