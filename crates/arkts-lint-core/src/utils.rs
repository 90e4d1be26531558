//! Utility functions shared by the linter and its rules.

pub mod directives;
pub mod paths;

#[doc(inline)]
pub use directives::{find_directives, Directive, DirectiveKind};
#[doc(inline)]
pub use paths::{normalize_path, path_ends_with, path_matches};
