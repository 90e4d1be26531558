//! Bridge to an external fix generator.
//!
//! The linter only asks for a fix when auto-fix is enabled and a fixer is
//! installed; it decides that once per file. Every method may decline by
//! returning `None`, in which case the fault is reported without a fix.

use crate::fault::Fix;
use crate::oracle::Oracle;
use crate::syntax::{FileId, NodeId, SourceFile};

/// Where a fix is requested.
#[derive(Clone, Copy)]
pub struct FixSite<'a> {
    /// Type information.
    pub oracle: &'a dyn Oracle,
    /// File being linted.
    pub file: &'a SourceFile,
    /// Id of that file.
    pub file_id: FileId,
    /// Node the fault is reported on.
    pub node: NodeId,
}

impl std::fmt::Debug for FixSite<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixSite")
            .field("file", &self.file.path)
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}

/// Produces fixes for fixable rules.
#[allow(unused_variables)]
pub trait Autofixer {
    /// `var` → `let`; `site.node` is the declaration list.
    fn fix_var_declaration(&self, site: &FixSite<'_>) -> Option<Fix> {
        None
    }

    /// String or numeric property name → identifier.
    fn fix_literal_as_property_name(&self, site: &FixSite<'_>) -> Option<Fix> {
        None
    }

    /// Function expression → arrow function.
    fn fix_function_expression(&self, site: &FixSite<'_>) -> Option<Fix> {
        None
    }

    /// Adds an explicit return type annotation.
    fn fix_missing_return_type(&self, site: &FixSite<'_>, return_type: &str) -> Option<Fix> {
        None
    }

    /// `<T>expr` → `expr as T`.
    fn fix_type_assertion(&self, site: &FixSite<'_>) -> Option<Fix> {
        None
    }

    /// Constructor parameter properties → explicit fields.
    fn fix_ctor_parameter_properties(&self, site: &FixSite<'_>) -> Option<Fix> {
        None
    }

    /// `#name` → `private name`.
    fn fix_private_identifier(&self, site: &FixSite<'_>) -> Option<Fix> {
        None
    }

    /// Object type literal → interface.
    fn fix_type_literal(&self, site: &FixSite<'_>) -> Option<Fix> {
        None
    }

    /// Comma expression → separate statements.
    fn fix_comma_operator(&self, site: &FixSite<'_>) -> Option<Fix> {
        None
    }

    /// Removes a definite assignment assertion.
    fn fix_definite_assignment(&self, site: &FixSite<'_>) -> Option<Fix> {
        None
    }

    /// Adds an import of `names` to the file; `site.node` is the file root.
    fn fix_interface_import(&self, site: &FixSite<'_>, names: &[String]) -> Option<Fix> {
        None
    }

    /// Nested function declaration → local arrow function.
    fn fix_nested_function(&self, site: &FixSite<'_>) -> Option<Fix> {
        None
    }
}
