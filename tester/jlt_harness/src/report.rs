//! Human-readable session output: banner, live status line and final report.

use std::io::{self, Write};

use crate::aggregate::{FailureRecord, PassReport, SessionReport};
use crate::backend::BackendKind;

/// ANSI color codes for terminal output.
mod colors {
    pub const FAILURE: &str = "\x1b[1;31m"; // Bold red
    pub const SUCCESS: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for the report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a boolean. `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Prefix every line of `text` with `spaces` spaces.
///
/// Lines are joined without a trailing newline.
pub fn indent_with(spaces: usize, text: &str) -> String {
    let pad = " ".repeat(spaces);
    text.lines()
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The live progress line, rewritten in place with a leading carriage return.
pub fn status_line(label: &str, ok: usize, failed: usize, total: usize) -> String {
    format!(
        "\r  {label:5} ok: {ok}, failed: {failed}, [{}/{total}]",
        ok + failed
    )
}

/// Print the settings a session is about to run with.
pub fn write_banner<W: Write>(
    w: &mut W,
    prefix: &str,
    backends: &[BackendKind],
    extensions: &[String],
) -> io::Result<()> {
    let backends = if backends.is_empty() {
        "None (type checking only)".to_string()
    } else {
        backends
            .iter()
            .map(|b| b.label())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let extensions = if extensions.is_empty() {
        "None".to_string()
    } else {
        extensions.join(", ")
    };

    writeln!(w, "About to run tests with these settings:")?;
    writeln!(w, "  Prefix:     {prefix}")?;
    writeln!(w, "  Backends:   {backends}")?;
    writeln!(w, "  Extensions: {extensions}")?;
    writeln!(w)
}

/// Renders a [`SessionReport`] once all passes are done.
pub struct ReportRenderer<W: Write> {
    writer: W,
    colors: bool,
}

impl<W: Write> ReportRenderer<W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        ReportRenderer {
            writer,
            colors: mode.should_use_colors(is_tty),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn render(&mut self, report: &SessionReport) -> io::Result<()> {
        writeln!(self.writer)?;
        for pass in &report.passes {
            self.write_counts(pass)?;
        }
        writeln!(self.writer)?;

        if report.all_passed() {
            self.write_colored(colors::SUCCESS, "All tests succeeded.")?;
            writeln!(self.writer)?;
            return self.writer.flush();
        }

        self.write_colored(colors::FAILURE, "Some tests failed:")?;
        writeln!(self.writer)?;
        let tag_backend = report.passes.len() > 1;
        for pass in &report.passes {
            for failure in &pass.failures {
                self.write_failure(pass.backend, failure, tag_backend)?;
            }
        }
        self.writer.flush()
    }

    fn write_counts(&mut self, pass: &PassReport) -> io::Result<()> {
        writeln!(
            self.writer,
            "  {:9} ok: {}, failed: {}, [{}/{}]",
            pass.backend.label(),
            pass.ok,
            pass.failed,
            pass.completed(),
            pass.total
        )
    }

    fn write_failure(
        &mut self,
        backend: BackendKind,
        failure: &FailureRecord,
        tag_backend: bool,
    ) -> io::Result<()> {
        let name = failure.case.name();
        let heading = if tag_backend {
            format!("---------- !!! {name}.jl failed ({backend}) !!! ----------")
        } else {
            format!("---------- !!! {name}.jl failed !!! ----------")
        };
        self.write_colored(colors::FAILURE, &heading)?;
        writeln!(self.writer)?;
        writeln!(self.writer)?;

        let detail = &failure.detail;
        if detail.stderr_expected != detail.stderr_actual {
            self.write_block("stderr expected", &detail.stderr_expected)?;
            self.write_block("stderr actual", &detail.stderr_actual)?;
        }
        if backend.is_concrete() && !detail.stdout_expected.is_empty() {
            self.write_block("stdout expected", &detail.stdout_expected)?;
            self.write_block("stdout actual", &detail.stdout_actual)?;
        }
        writeln!(self.writer)
    }

    fn write_block(&mut self, title: &str, text: &str) -> io::Result<()> {
        self.write_colored(colors::BOLD, &format!("- {title}:"))?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", indent_with(4, text))
    }

    fn write_colored(&mut self, color: &str, text: &str) -> io::Result<()> {
        if self.colors {
            write!(self.writer, "{color}{text}{}", colors::RESET)
        } else {
            write!(self.writer, "{text}")
        }
    }
}
