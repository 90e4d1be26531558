//! # arkts-lint-rules
//!
//! The per-file linter: one walk over a file's syntax tree, dispatching
//! each node to the handlers of its kind, followed by the finishing
//! analyses that need the whole file.
//!
//! Rules are identified by [`FaultId`](arkts_lint_core::FaultId); the
//! catalogue and its tiers live in `arkts-lint-core`.
//!
//! ## Usage
//!
//! ```ignore
//! use arkts_lint_core::{FileId, LinterOptions, ProcessCache, Program};
//! use arkts_lint_rules::{LintContext, Linter};
//!
//! let program = Program::from_file(path)?;
//! let mut cache = ProcessCache::new();
//! let ctx = LintContext::new(&program, FileId(0), &mut cache)
//!     .expect("file exists")
//!     .options(LinterOptions::default().arkts2(true));
//! let faults = Linter::new(ctx).run()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analysis;
mod context;
mod dispatch;
mod handlers;
mod linter;
mod semantics;

#[cfg(test)]
mod test_support;

pub use context::LintContext;
pub use linter::Linter;
