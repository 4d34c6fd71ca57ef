//! Build-time composition of seccomp-bpf policies for sandboxed
//! virtual-device processes.
//!
//! Each sandboxed device process ships a per-device base policy that pulls
//! in shared rule blocks via `@include` directives. `seccompose-inline`
//! expands those directives against a closed catalog of well-known
//! fragments, producing the final allow-list the sandbox loader installs.
//!
//! The composer is deliberately fail-closed: a directive it does not
//! recognize, or a fragment it cannot read, aborts the whole run. A policy
//! with a silently dropped include — or a literal `@include` marker left in
//! the installed filter — would widen or break the sandbox, so ambiguity is
//! never passed through.
//!
//! Composition is a pure, single-pass transform from (base stream, fragment
//! map) to (output stream | error). There is no state between invocations
//! and no transitive expansion: directives inside fragment files are not
//! honored.

pub mod catalog;
pub mod compose;
pub mod directive;
pub mod error;
pub mod lint;

pub use catalog::{Fragment, FragmentCatalog};
pub use compose::compose;
pub use directive::{classify, LineClass};
pub use error::{ComposeError, LintError};
pub use lint::lint;
