#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use std::fs::File;
use tempfile::tempdir;

fn touch(path: &Path) {
    File::create(path).unwrap();
}

#[test]
fn test_discover_missing_testsuite() {
    let dir = tempdir().unwrap();
    let catalog = TestCatalog::discover(&dir.path().join("nope"), &[]);
    assert!(catalog.is_empty());
}

#[test]
fn test_discover_good_before_bad() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good");
    let bad = dir.path().join("bad");
    fs::create_dir(&good).unwrap();
    fs::create_dir(&bad).unwrap();

    touch(&bad.join("b1.jl"));
    touch(&good.join("g2.jl"));
    touch(&good.join("g1.jl"));
    touch(&good.join("notes.txt"));

    let catalog = TestCatalog::discover(dir.path(), &[]);
    let summary: Vec<(PathBuf, Expectation)> = catalog
        .iter()
        .map(|case| (case.base.clone(), case.expectation))
        .collect();

    assert_eq!(
        summary,
        vec![
            (good.join("g1"), Expectation::Good),
            (good.join("g2"), Expectation::Good),
            (bad.join("b1"), Expectation::Bad),
        ]
    );
}

#[test]
fn test_extensions_are_good_and_ordered() {
    let dir = tempdir().unwrap();
    let arrays = dir.path().join("extensions").join("arrays1");
    let pointers = dir.path().join("extensions").join("pointers");
    fs::create_dir_all(&arrays).unwrap();
    fs::create_dir_all(&pointers).unwrap();
    touch(&arrays.join("a.jl"));
    touch(&pointers.join("p.jl"));

    let exts = vec!["pointers".to_string(), "arrays1".to_string()];
    let catalog = TestCatalog::discover(dir.path(), &exts);

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.cases()[0].base, pointers.join("p"));
    assert_eq!(catalog.cases()[1].base, arrays.join("a"));
    assert!(catalog.iter().all(TestCase::is_good));
}

#[test]
fn test_unrequested_extension_is_ignored() {
    let dir = tempdir().unwrap();
    let objects = dir.path().join("extensions").join("objects1");
    fs::create_dir_all(&objects).unwrap();
    touch(&objects.join("o.jl"));

    let catalog = TestCatalog::discover(dir.path(), &[]);
    assert!(catalog.is_empty());
}

#[test]
fn test_fixtures_attached_when_present() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good");
    fs::create_dir(&good).unwrap();
    touch(&good.join("t3.jl"));
    touch(&good.join("t3.input"));
    touch(&good.join("t3.output"));
    touch(&good.join("t4.jl"));

    let catalog = TestCatalog::discover(dir.path(), &[]);
    let t3 = &catalog.cases()[0];
    let t4 = &catalog.cases()[1];

    assert_eq!(t3.input.as_deref(), Some(good.join("t3.input").as_path()));
    assert_eq!(t3.output.as_deref(), Some(good.join("t3.output").as_path()));
    assert_eq!(t4.input, None);
    assert_eq!(t4.output, None);
}

#[test]
fn test_source_keeps_dotted_names() {
    let case = TestCase::new(PathBuf::from("good/core.001"), Expectation::Good);
    assert_eq!(case.source(), PathBuf::from("good/core.001.jl"));
    assert_eq!(case.name(), "good/core.001");
}

#[test]
fn test_directories_named_like_sources_are_skipped() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good");
    fs::create_dir_all(good.join("weird.jl")).unwrap();
    touch(&good.join("real.jl"));

    let catalog = TestCatalog::discover(dir.path(), &[]);
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.cases()[0].base, good.join("real"));
}

#[test]
fn test_available_extensions_sorted() {
    let dir = tempdir().unwrap();
    let exts = dir.path().join("extensions");
    fs::create_dir_all(exts.join("pointers")).unwrap();
    fs::create_dir_all(exts.join("arrays1")).unwrap();
    touch(&exts.join("README"));

    let names = available_extensions(dir.path()).unwrap();
    assert_eq!(names, vec!["arrays1".to_string(), "pointers".to_string()]);
}

#[test]
fn test_available_extensions_missing_dir_errors() {
    let dir = tempdir().unwrap();
    assert!(available_extensions(dir.path()).is_err());
}

#[test]
fn test_expected_stderr_sentinels() {
    assert_eq!(Expectation::Good.expected_stderr(), "OK");
    assert_eq!(Expectation::Bad.expected_stderr(), "ERROR");
}
