//! Javalette submission tester CLI.

use std::io::{self, IsTerminal};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use jlt::{execute, init_tracing, Cli};

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let stdout = io::stdout();
    let is_tty = stdout.is_terminal();
    let mut out = stdout.lock();

    match execute(&cli, Path::new("."), &mut out, is_tty) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::debug!(?err, "session failed");
            eprintln!("{}", err.render());
            ExitCode::FAILURE
        }
    }
}
