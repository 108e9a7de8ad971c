//! Scratch workspaces holding a submission, a test suite and fake tools.

use std::ffi::OsString;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Compiler stand-in: rejects sources containing `reject`, accepts the rest.
/// The generated code is the source text, run later as a shell script.
pub const COMPILER: &str = r#"src=$(cat)
case "$src" in
  *reject*) echo "Parse ERROR at line 3" >&2; exit 1 ;;
esac
echo "$src"
echo OK >&2"#;

pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

pub struct Workspace {
    root: TempDir,
}

impl Workspace {
    /// A built-looking submission with every compiler and runtime source,
    /// an empty test suite and fake tools on `PATH`.
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let ws = Workspace { root };

        let submission = ws.submission();
        for dir in ["doc", "lib", "src"] {
            fs::create_dir_all(submission.join(dir)).unwrap();
        }
        fs::write(submission.join("Makefile"), "all:\n").unwrap();
        fs::write(submission.join("lib").join("runtime.ll"), "").unwrap();
        fs::write(submission.join("lib").join("runtime.s"), "").unwrap();
        for name in ["jlc", "jlc_x86", "jlc_x64"] {
            write_script(&submission, name, COMPILER);
        }

        let bin = ws.bin();
        fs::create_dir_all(&bin).unwrap();
        write_script(&bin, "make", "exit 0");
        write_script(&bin, "llvm-as", r#"cp "$1" "$3""#);
        write_script(&bin, "llvm-link", r#"cp "$1" "$4""#);
        write_script(&bin, "nasm", r#"cp "$3" "$5""#);
        write_script(
            &bin,
            "clang",
            r#"for arg; do
  case "$arg" in -*) ;; *) [ -z "$in" ] && in=$arg ;; esac
  out=$arg
done
{ echo '#!/bin/sh'; cat "$in"; } > "$out"
chmod +x "$out""#,
        );

        for dir in ["good", "bad", "extensions"] {
            fs::create_dir_all(ws.testsuite().join(dir)).unwrap();
        }
        ws
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn submission(&self) -> PathBuf {
        self.path().join("submission")
    }

    pub fn bin(&self) -> PathBuf {
        self.path().join("bin")
    }

    pub fn testsuite(&self) -> PathBuf {
        self.path().join("testsuite")
    }

    /// Write `<testsuite>/<dir>/<stem>.jl` plus optional fixtures.
    pub fn case(&self, dir: &str, stem: &str, source: &str, io: Option<(&str, &str)>) {
        let dir = self.testsuite().join(dir);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{stem}.jl")), source).unwrap();
        if let Some((input, output)) = io {
            fs::write(dir.join(format!("{stem}.input")), input).unwrap();
            fs::write(dir.join(format!("{stem}.output")), output).unwrap();
        }
    }

    /// Run `jlt <args> submission` inside the workspace.
    pub fn run(&self, args: &[&str]) -> Output {
        self.run_on(args, "submission")
    }

    /// Pack the submission into `name` with the system `tar`, then remove
    /// the unpacked original.
    pub fn archive(&self, name: &str) {
        let status = Command::new("tar")
            .current_dir(self.path())
            .args(["czf", name, "-C", "submission", "."])
            .status()
            .unwrap();
        assert!(status.success());
        fs::remove_dir_all(self.submission()).unwrap();
    }

    /// Run `jlt <args> <submission>` inside the workspace.
    pub fn run_on(&self, args: &[&str], submission: &str) -> Output {
        let mut path = OsString::from(self.bin());
        if let Some(inherited) = std::env::var_os("PATH") {
            path.push(":");
            path.push(inherited);
        }
        Command::new(env!("CARGO_BIN_EXE_jlt"))
            .current_dir(self.path())
            .env("PATH", path)
            .env_remove("RUST_LOG")
            .args(["--color", "never"])
            .args(args)
            .arg(submission)
            .output()
            .unwrap()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

/// The directory named on the line of `out` that starts with `label`.
pub fn path_after(out: &str, label: &str) -> PathBuf {
    let line = out
        .lines()
        .find_map(|line| line.strip_prefix(label))
        .unwrap_or_else(|| panic!("no line starting with {label:?} in:\n{out}"));
    PathBuf::from(line.trim())
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}
