//! Analyses that need more than the visited node: whole declarations,
//! whole files, or state carried across files.

pub(crate) mod array_bounds;
pub(crate) mod captures;
pub(crate) mod const_eval;
pub(crate) mod duplicates;
pub(crate) mod finishing;
pub(crate) mod sdk;
pub(crate) mod structural;
