//! Duplicate-rule detection for composed policies.
//!
//! The kernel filter keeps the first stanza for a syscall and silently
//! ignores later ones, so a composed policy where a device rule collides
//! with a fragment rule ships something other than what was written. The
//! linter runs after composition as a pass-through filter: lines are
//! echoed verbatim until a redefinition is found, at which point the run
//! aborts with both line numbers.

use std::collections::HashMap;
use std::io::{BufRead, Write};

use crate::error::LintError;

/// Pass `input` through to `output`, failing on the first syscall defined
/// twice.
///
/// A line defines a syscall if it is not a `#` comment and contains a `:`;
/// the syscall name is everything before the first `:`. Blank names (a
/// line starting with `:`) are ignored. Nothing after the duplicate line
/// is emitted.
pub fn lint<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<(), LintError> {
    let mut last_seen: HashMap<String, usize> = HashMap::new();
    let mut line = String::new();
    let mut lineno = 0usize;

    loop {
        line.clear();
        if input.read_line(&mut line).map_err(LintError::Input)? == 0 {
            return Ok(());
        }
        lineno += 1;

        let text = line.trim();
        if !text.starts_with('#') && text.contains(':') {
            let syscall = text.split(':').next().unwrap_or("").trim();
            if !syscall.is_empty() {
                if let Some(&previous_line) = last_seen.get(syscall) {
                    return Err(LintError::DuplicateSyscall {
                        syscall: syscall.to_owned(),
                        line: lineno,
                        previous_line,
                    });
                }
                last_seen.insert(syscall.to_owned(), lineno);
            }
        }

        output
            .write_all(line.as_bytes())
            .map_err(LintError::Output)?;
    }
}
