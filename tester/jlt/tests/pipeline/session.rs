use std::fs;

use pretty_assertions::assert_eq;

use crate::common::{path_after, stderr, stdout, Workspace};

#[test]
fn test_typecheck_only_session_passes() {
    let ws = Workspace::new();
    ws.case("good", "t1", "echo fine", None);
    ws.case("bad", "t2", "reject me", None);

    let output = ws.run(&[]);
    let out = stdout(&output);

    assert!(output.status.success(), "{out}");
    assert!(out.contains("- Checking for executable(s) ... Ok."));
    assert!(out.contains("  Backends:   None (type checking only)"));
    assert!(out.contains("  typecheck ok: 2, failed: 0, [2/2]"));
    assert!(out.ends_with("All tests succeeded.\n"));
}

#[test]
fn test_accepting_a_bad_program_fails_the_session() {
    let ws = Workspace::new();
    ws.case("bad", "t2", "this compiles", None);

    let output = ws.run(&[]);
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("  typecheck ok: 0, failed: 1, [1/1]"));
    assert!(out.contains("Some tests failed:"));
    assert!(out.contains("---------- !!! testsuite/bad/t2.jl failed !!! ----------"));
    assert!(out.contains("- stderr expected:\n    ERROR\n- stderr actual:\n    OK\n"));
}

#[test]
fn test_llvm_program_output_compared() {
    let ws = Workspace::new();
    ws.case("good", "t3", "read n; echo $((n * n))", Some(("5\n", "25\n")));

    let output = ws.run(&["--llvm"]);
    let out = stdout(&output);

    assert!(output.status.success(), "{out}");
    assert!(out.contains("  llvm      ok: 1, failed: 0, [1/1]"));
    assert!(ws.submission().join("lib").join("runtime.bc").is_file());
    assert!(!ws.path().join("a.out").exists());
}

#[test]
fn test_wrong_program_output_reported() {
    let ws = Workspace::new();
    ws.case("good", "t3", "read n; echo $((n * n + 1))", Some(("5\n", "25\n")));

    let output = ws.run(&["--llvm"]);
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("---------- !!! testsuite/good/t3.jl failed !!! ----------"));
    assert!(out.contains("- stdout expected:\n    25\n"));
    assert!(out.contains("- stdout actual:\n    26\n"));
    assert!(!out.contains("- stderr expected:"));
}

#[test]
fn test_failures_tagged_with_backend_across_passes() {
    let ws = Workspace::new();
    ws.case("good", "t3", "echo 24", Some(("", "25\n")));

    let output = ws.run(&["--llvm", "--x64"]);
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("  Backends:   llvm, x64"));
    assert!(out.contains("---------- !!! testsuite/good/t3.jl failed (llvm) !!! ----------"));
    assert!(out.contains("---------- !!! testsuite/good/t3.jl failed (x64) !!! ----------"));
    assert!(ws.submission().join("lib").join("runtimex64.o").is_file());
}

#[test]
fn test_extension_cases_included() {
    let ws = Workspace::new();
    ws.case("good", "t1", "echo fine", None);
    ws.case("extensions/arrays1", "a1", "echo arrays", None);

    let output = ws.run(&["-x", "arrays1", "--"]);
    let out = stdout(&output);

    assert!(output.status.success(), "{out}");
    assert!(out.contains("  Extensions: arrays1"));
    assert!(out.contains("  typecheck ok: 2, failed: 0, [2/2]"));
}

#[test]
fn test_missing_compiler_aborts_without_report() {
    let ws = Workspace::new();
    ws.case("good", "t1", "echo fine", None);
    fs::remove_file(ws.submission().join("jlc")).unwrap();

    let output = ws.run(&[]);
    let out = stdout(&output);

    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("- Checking for executable(s) ... Failed."));
    assert!(!out.contains("About to run tests"));
    assert!(!out.contains("ok: "));
    assert_eq!(
        stderr(&output),
        "\njlt failed with:\n    Build did not produce the executable \"jlc\" \
         required for type checking\n"
    );
}

#[test]
fn test_unknown_extension_is_a_usage_error() {
    let ws = Workspace::new();

    let output = ws.run(&["-x", "nosuch", "--"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert_eq!(stderr(&output), "Not a valid extension: nosuch\n");
}

#[test]
fn test_archive_unpacked_tested_and_removed() {
    let ws = Workspace::new();
    ws.case("good", "t1", "echo fine", None);
    ws.archive("partA-1.tar.gz");

    let output = ws.run_on(&["--archive"], "partA-1.tar.gz");
    let out = stdout(&output);

    assert!(output.status.success(), "{out}");
    assert!(out.contains("- Unpacking partA-1.tar.gz to \""));
    assert!(out.contains("  typecheck ok: 1, failed: 0, [1/1]"));
    let unpacked = ws.path().join(path_after(&out, "Removing temporary files in: "));
    assert!(unpacked.file_name().unwrap().to_string_lossy().starts_with("testing_"));
    assert!(!unpacked.exists());
}

#[test]
fn test_archive_kept_with_noclean() {
    let ws = Workspace::new();
    ws.case("bad", "t2", "reject me", None);
    ws.archive("partB-2.tar.gz");

    let output = ws.run_on(&["--archive", "--noclean"], "partB-2.tar.gz");
    let out = stdout(&output);

    assert!(output.status.success(), "{out}");
    let kept = ws.path().join(path_after(&out, "Keeping temporary files in: "));
    assert!(kept.join("jlc").is_file());
    assert!(kept.join("Makefile").is_file());
    assert!(!out.contains("Removing temporary files in:"));
}

#[test]
fn test_misnamed_archive_rejected() {
    let ws = Workspace::new();
    ws.archive("submission.tar.gz");

    let output = ws.run_on(&["--archive"], "submission.tar.gz");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        "\njlt failed with:\n    Archive is not named according to submission guidelines\n"
    );
}
