//! # arkts-lint
//!
//! Static-dialect linter for `ArkTS` programs.
//!
//! The linter consumes a type-checked program (syntax trees plus the
//! answers of a type oracle) and reports every construct the strict
//! dialect rejects, with optional auto-fixes.
//!
//! ## Quick Start
//!
//! ```ignore
//! use arkts_lint::{Config, Program, Runner};
//!
//! let program = Program::from_file("snapshot.json".as_ref())?;
//! let result = Runner::new(Config::default()).run(&program)?;
//! for violation in &result.violations {
//!     println!("{violation}");
//! }
//! ```
//!
//! ## Crate layout
//!
//! - `arkts-lint-core`: syntax model, oracle trait, fault catalogue,
//!   configuration and whitelist tables (re-exported at the root)
//! - `arkts-lint-rules`: the per-file [`rules::Linter`]
//! - this crate: the program-level [`Runner`]

#![forbid(unsafe_code)]

pub use arkts_lint_core::*;

/// The per-file linter.
pub mod rules {
    pub use arkts_lint_rules::{LintContext, Linter};
}

mod runner;

pub use runner::{RunError, Runner};
