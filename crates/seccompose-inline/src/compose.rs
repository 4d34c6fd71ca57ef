//! The single-pass policy composer.
//!
//! Consumes the base policy top to bottom, substituting each include
//! directive with the referenced fragment's contents and passing every
//! other line through byte-for-byte. The first unresolvable directive
//! aborts the run; nothing already emitted is valid for use after that.

use std::fs;
use std::io::{BufRead, Write};

use tracing::debug;

use crate::catalog::FragmentCatalog;
use crate::directive::{classify, LineClass};
use crate::error::ComposeError;

/// Compose `input` into `output` against the supplied fragment catalog.
///
/// Order-preserving expansion: output is the base stream with each
/// directive line replaced by the referenced fragment file, and nothing
/// else changed — no reordering, no deduplication, no reformatting.
/// Fragment contents are emitted verbatim (a missing final newline is the
/// only thing repaired, so the following base line is not glued onto the
/// last rule) and are never re-scanned for directives.
///
/// An empty input composes to empty output. Identical inputs always
/// compose to byte-identical output.
pub fn compose<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    catalog: &FragmentCatalog,
) -> Result<(), ComposeError> {
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line).map_err(ComposeError::Input)? == 0 {
            return Ok(());
        }

        match classify(&line) {
            LineClass::Text => {
                output
                    .write_all(line.as_bytes())
                    .map_err(ComposeError::Output)?;
            }
            LineClass::Include(fragment) => {
                let text = line.trim_end_matches(['\r', '\n']).to_owned();
                let Some(path) = catalog.path(fragment) else {
                    return Err(ComposeError::FragmentUnavailable {
                        fragment,
                        line: text,
                    });
                };
                let content =
                    fs::read_to_string(path).map_err(|source| ComposeError::FragmentRead {
                        fragment,
                        path: path.to_path_buf(),
                        source,
                    })?;
                debug!(%fragment, path = %path.display(), "expanding fragment");

                output
                    .write_all(content.as_bytes())
                    .map_err(ComposeError::Output)?;
                if !content.is_empty() && !content.ends_with('\n') {
                    output.write_all(b"\n").map_err(ComposeError::Output)?;
                }
            }
            LineClass::UnknownInclude => {
                return Err(ComposeError::UnknownInclude {
                    line: line.trim_end_matches(['\r', '\n']).to_owned(),
                });
            }
        }
    }
}
