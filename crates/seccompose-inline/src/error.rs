//! Error types for policy composition and linting.
//!
//! Every variant is terminal for the invocation: there is no partial
//! output and no retry. Directive errors carry the exact offending line so
//! the failing build step points at the base policy, not at this tool.

use std::io;
use std::path::PathBuf;

use crate::catalog::Fragment;

/// Errors aborting a composition run.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    /// An include directive whose target is not part of the catalog.
    #[error("unrecognized include directive: `{line}`")]
    UnknownInclude {
        /// The offending base-policy line.
        line: String,
    },

    /// A directive named a catalog member with no path on this target.
    #[error("no {fragment} fragment available on this target: `{line}`")]
    FragmentUnavailable {
        /// The referenced catalog member.
        fragment: Fragment,
        /// The offending base-policy line.
        line: String,
    },

    /// A referenced fragment file could not be read.
    #[error("failed to read {fragment} fragment `{}`: {source}", .path.display())]
    FragmentRead {
        /// The referenced catalog member.
        fragment: Fragment,
        /// The configured fragment path.
        path: PathBuf,
        /// The underlying I/O failure.
        source: io::Error,
    },

    /// The base policy stream could not be read.
    #[error("failed to read base policy: {0}")]
    Input(io::Error),

    /// The composed output stream could not be written.
    #[error("failed to write composed policy: {0}")]
    Output(io::Error),
}

/// Errors aborting a lint run.
#[derive(Debug, thiserror::Error)]
pub enum LintError {
    /// The same syscall is defined twice; the kernel filter would keep the
    /// earlier stanza and silently drop the later one.
    #[error("syscall {syscall} redefined on line {line} (previous definition on line {previous_line})")]
    DuplicateSyscall {
        /// The redefined syscall name.
        syscall: String,
        /// 1-based line number of the redefinition.
        line: usize,
        /// 1-based line number of the first definition.
        previous_line: usize,
    },

    /// The policy stream could not be read.
    #[error("failed to read policy: {0}")]
    Input(io::Error),

    /// The policy stream could not be written back out.
    #[error("failed to write policy: {0}")]
    Output(io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_include_reports_offending_line() {
        let err = ComposeError::UnknownInclude {
            line: "@include unknown_fragment.policy".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "unrecognized include directive: `@include unknown_fragment.policy`"
        );
    }

    #[test]
    fn unavailable_fragment_names_the_member() {
        let err = ComposeError::FragmentUnavailable {
            fragment: Fragment::GpuCommon,
            line: "@include gpu_common.policy".to_owned(),
        };
        assert!(err.to_string().contains("gpu_common"));
        assert!(err.to_string().contains("`@include gpu_common.policy`"));
    }

    #[test]
    fn duplicate_syscall_names_both_lines() {
        let err = LintError::DuplicateSyscall {
            syscall: "read".to_owned(),
            line: 7,
            previous_line: 2,
        };
        assert_eq!(
            err.to_string(),
            "syscall read redefined on line 7 (previous definition on line 2)"
        );
    }
}
