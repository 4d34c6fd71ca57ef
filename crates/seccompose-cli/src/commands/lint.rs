//! The `seccompose lint` subcommand.
//!
//! Runs after composition, in the same pipeline position: the composed
//! policy streams through and the run fails on the first syscall defined
//! twice. Like `compose`, output is all-or-nothing.

use std::fs;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use clap::Args;
use color_eyre::eyre::Result;
use seccompose_inline::lint;

/// Arguments for `seccompose lint`.
#[derive(Args)]
pub struct LintArgs {
    /// Read the composed policy from a file instead of stdin.
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Write the checked policy to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Execute the lint command.
pub fn execute(args: &LintArgs) -> Result<()> {
    let mut checked = Vec::new();
    match &args.input {
        Some(path) => {
            let file = fs::File::open(path)?;
            lint(BufReader::new(file), &mut checked)?;
        }
        None => {
            let stdin = io::stdin();
            lint(stdin.lock(), &mut checked)?;
        }
    }

    match &args.output {
        Some(path) => fs::write(path, &checked)?,
        None => io::stdout().write_all(&checked)?,
    }

    Ok(())
}
