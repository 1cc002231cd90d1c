//! Resolution properties exercised through the library API.

use linkcat::concat::{ReadOptions, Sink};
use linkcat::core::{Dialect, LinkcatError};
use linkcat::loader::Source;
use linkcat::resource::Resource;
use linkcat::test_utils::TestProject;
use std::path::PathBuf;

fn paths(resources: &[Resource]) -> Vec<PathBuf> {
    resources.iter().filter_map(|resource| resource.path().map(PathBuf::from)).collect()
}

#[test]
fn test_every_dependency_precedes_its_dependents() {
    let project = TestProject::new().unwrap();
    project.write("app.js", "// @depend ui.js\n// @depend net.js\nrun();\n").unwrap();
    project.write("ui.js", "// @depend dom.js\n// @depend events.js\n").unwrap();
    project.write("net.js", "// @depend events.js\n").unwrap();
    project.write("events.js", "// @depend dom.js\n").unwrap();
    project.write("dom.js", "").unwrap();

    let resolver = project.resolver();
    let app = resolver.open(Dialect::Script, Source::path("app.js")).unwrap();
    let order = paths(&app.dependencies(true).unwrap());

    let expected: Vec<PathBuf> = ["dom.js", "events.js", "ui.js", "net.js"]
        .iter()
        .map(|name| project.canonical(name).unwrap())
        .collect();
    assert_eq!(order, expected);

    for resource in app.dependencies(true).unwrap() {
        let position = order.iter().position(|path| Some(path.as_path()) == resource.path()).unwrap();
        for dependency in resource.dependencies(false).unwrap() {
            let before = order.iter().position(|path| Some(path.as_path()) == dependency.path()).unwrap();
            assert!(before < position, "{dependency} must precede {resource}");
        }
    }
}

#[test]
fn test_self_reference_is_ignored() {
    let project = TestProject::new().unwrap();
    project.write("self.css", "@import url(self.css);\n.self {}\n").unwrap();

    let resolver = project.resolver();
    let resource = resolver.open(Dialect::Stylesheet, Source::path("self.css")).unwrap();

    assert!(resource.dependencies(true).unwrap().is_empty());
    assert_eq!(resource.resources(true).unwrap(), vec![resource.clone()]);
}

#[test]
fn test_anonymous_resources_are_distinct() {
    let project = TestProject::new().unwrap();
    let resolver = project.resolver();

    let a = resolver.open(Dialect::Script, Source::content("var same;")).unwrap();
    let b = resolver.open(Dialect::Script, Source::content("var same;")).unwrap();
    assert_ne!(a, b);
    assert_eq!(a.to_string(), "[unsaved]");

    let mut bundle = resolver.bundle(Dialect::Script, std::iter::empty()).unwrap();
    bundle.attach(Source::from(a.clone())).unwrap();
    bundle.attach(Source::from(b.clone())).unwrap();
    bundle.attach(Source::from(a.clone())).unwrap();
    assert_eq!(bundle.dependencies(false).unwrap(), vec![a, b]);
}

#[test]
fn test_flattened_read_matches_resource_order() {
    let project = TestProject::new().unwrap();
    project.write("a.css", "@import url(b.css);\n@import url(c.css);\n.a {}\n").unwrap();
    project.write("b.css", "@import url(c.css);\n.b {}\n").unwrap();
    project.write("c.css", ".c {}\n").unwrap();

    let resolver = project.resolver();
    let a = resolver.open(Dialect::Stylesheet, Source::path("a.css")).unwrap();

    let expected: String = a
        .resources(true)
        .unwrap()
        .iter()
        .map(|resource| resource.read(ReadOptions::raw()).unwrap())
        .collect();
    assert_eq!(a.read(ReadOptions::flattened()).unwrap(), expected);

    let mut exported = String::new();
    a.export(Sink::Buffer(&mut exported), ReadOptions::flattened()).unwrap();
    assert_eq!(exported, expected);

    let flat = a.concat(ReadOptions::default()).unwrap();
    assert_eq!(flat.read(ReadOptions::raw()).unwrap(), expected);
    assert!(flat.dependencies(true).unwrap().is_empty());
}

#[test]
fn test_resolution_is_cached_per_resource() {
    let project = TestProject::new().unwrap();
    project.write("a.js", "// @depend b.js\n").unwrap();
    project.write("b.js", "").unwrap();

    let resolver = project.resolver();
    let a = resolver.open(Dialect::Script, Source::path("a.js")).unwrap();
    let first = a.dependencies(true).unwrap();

    project.write("a.js", "// @depend c.js\n").unwrap();
    assert_eq!(a.dependencies(true).unwrap(), first);

    let reopened = resolver.open(Dialect::Script, Source::path("a.js")).unwrap();
    let err = reopened.dependencies(true).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<LinkcatError>(),
        Some(LinkcatError::MissingReference { reference, .. }) if reference == "c.js"
    ));
}

#[test]
fn test_stream_source_is_read_once() {
    let project = TestProject::new().unwrap();
    project.write("b.css", ".b {}\n").unwrap();

    let resolver = project.resolver();
    let stream = std::io::Cursor::new(b"@import url(b.css);\n.main {}\n".to_vec());
    let main = resolver.open(Dialect::Stylesheet, Source::stream(stream)).unwrap();

    assert_eq!(main.read(ReadOptions::flattened()).unwrap(), ".b {}\n@import url(b.css);\n.main {}\n");
    assert_eq!(main.read(ReadOptions::flattened()).unwrap(), ".b {}\n@import url(b.css);\n.main {}\n");
}
