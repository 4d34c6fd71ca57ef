//! The `seccompose check` subcommand.
//!
//! Preflights a base policy before the real composition step: every
//! include directive is reported along with whether it resolves against
//! the supplied fragment paths. Nothing is composed and nothing is
//! written besides the report. Any directive that would abort `compose`
//! makes the check fail.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process;

use clap::Args;
use color_eyre::eyre::Result;
use seccompose_inline::{classify, FragmentCatalog, LineClass};
use serde::Serialize;

use super::compose::FragmentArgs;

/// Arguments for `seccompose check`.
#[derive(Args)]
pub struct CheckArgs {
    /// Read the base policy from a file instead of stdin.
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output the report as JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub fragments: FragmentArgs,
}

/// How one directive fared against the supplied paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum DirectiveStatus {
    /// Names a catalog member with a readable fragment file.
    Resolved,
    /// Names a catalog member with no path supplied on this target.
    Unavailable,
    /// Names a catalog member whose supplied path cannot be read.
    Unreadable,
    /// Not part of the fragment catalog.
    Unknown,
}

impl DirectiveStatus {
    fn label(self) -> &'static str {
        match self {
            DirectiveStatus::Resolved => "resolved",
            DirectiveStatus::Unavailable => "unavailable",
            DirectiveStatus::Unreadable => "unreadable",
            DirectiveStatus::Unknown => "unknown",
        }
    }
}

/// One directive found in the base policy.
#[derive(Debug, Serialize)]
struct DirectiveReport {
    /// 1-based line number in the base policy.
    line: usize,
    /// The directive text.
    text: String,
    /// The referenced fragment, when the directive named one.
    #[serde(skip_serializing_if = "Option::is_none")]
    fragment: Option<String>,
    /// Resolution outcome.
    status: DirectiveStatus,
    /// The fragment path the directive would expand, when configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
}

/// Execute the check command.
pub fn execute(args: &CheckArgs) -> Result<()> {
    let catalog = args.fragments.catalog();

    let reports = match &args.input {
        Some(path) => scan(BufReader::new(fs::File::open(path)?), &catalog)?,
        None => scan(std::io::stdin().lock(), &catalog)?,
    };

    let ok = reports
        .iter()
        .all(|report| report.status == DirectiveStatus::Resolved);

    if args.json {
        let output = serde_json::json!({
            "ok": ok,
            "directives": reports,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for report in &reports {
            let status = report.status.label();
            match (&report.fragment, &report.path) {
                (Some(fragment), Some(path)) => println!(
                    "L{} {status} {fragment} -> {}",
                    report.line,
                    path.display()
                ),
                (Some(fragment), None) => {
                    println!("L{} {status} {fragment}", report.line);
                }
                _ => println!("L{} {status} `{}`", report.line, report.text),
            }
        }
        println!(
            "Check {} ({} directive{})",
            if ok { "PASSED" } else { "FAILED" },
            reports.len(),
            if reports.len() == 1 { "" } else { "s" }
        );
    }

    if !ok {
        process::exit(1);
    }
    Ok(())
}

/// Scan the base policy and classify every directive in it.
fn scan<R: BufRead>(input: R, catalog: &FragmentCatalog) -> Result<Vec<DirectiveReport>> {
    let mut reports = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let report = match classify(&line) {
            LineClass::Text => continue,
            LineClass::Include(fragment) => match catalog.path(fragment) {
                Some(path) => {
                    // Same readability test compose will apply.
                    let status = match fs::File::open(path) {
                        Ok(_) => DirectiveStatus::Resolved,
                        Err(_) => DirectiveStatus::Unreadable,
                    };
                    DirectiveReport {
                        line: index + 1,
                        text: line,
                        fragment: Some(fragment.to_string()),
                        status,
                        path: Some(path.to_path_buf()),
                    }
                }
                None => DirectiveReport {
                    line: index + 1,
                    text: line,
                    fragment: Some(fragment.to_string()),
                    status: DirectiveStatus::Unavailable,
                    path: None,
                },
            },
            LineClass::UnknownInclude => DirectiveReport {
                line: index + 1,
                text: line,
                fragment: None,
                status: DirectiveStatus::Unknown,
                path: None,
            },
        };
        reports.push(report);
    }

    Ok(reports)
}
