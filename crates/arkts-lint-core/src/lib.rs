//! # arkts-lint-core
//!
//! Core framework for linting ArkTS programs against the strict dialect.
//!
//! This crate provides the pieces every rule builds on:
//!
//! - [`SourceFile`] and [`TreeBuilder`], the syntax model of a typed file
//! - [`Oracle`], the symbol and type service, with the in-memory [`Program`]
//! - [`FaultId`] and [`FaultLog`], the rule catalogue and fault sink
//! - [`walker`], the document-order tree walk with stop predicates
//! - [`WhitelistTables`] and [`ProcessCache`], process-wide state
//!
//! ## Example
//!
//! ```ignore
//! use arkts_lint_core::{Program, WhitelistTables, init_globals};
//!
//! init_globals(WhitelistTables::from_file("sdk-whitelist.json".as_ref())?)?;
//! let program = Program::from_file("snapshot.json".as_ref())?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod autofix;
pub mod cache;
pub mod cancel;
mod config;
pub mod fault;
pub mod options;
pub mod oracle;
pub mod program;
pub mod syntax;
mod types;
pub mod walker;
pub mod whitelist;

/// Utility modules for rule implementations.
pub mod utils;

pub use autofix::{Autofixer, FixSite};
pub use cache::ProcessCache;
pub use cancel::{CancellationToken, Cancelled};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use fault::{Fault, FaultId, FaultLog, FileFaults, Fix, Replacement, RuleTier};
pub use options::{LinterOptions, RuleSet};
pub use oracle::{
    ConstValue, ObjectKind, Oracle, SignatureId, SignatureInfo, SymbolFlags, SymbolId,
    SymbolInfo, TypeFlags, TypeId, TypeInfo,
};
pub use program::{Program, ProgramBuilder, ProgramError};
pub use syntax::{
    FileId, NodeFlags, NodeId, NodeKind, NodeRef, Operator, SourceFile, TextRange, TreeBuilder,
};
pub use types::{
    Edit, LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic,
};
pub use whitelist::{globals, init_globals, InitError, WhitelistError, WhitelistTables};
