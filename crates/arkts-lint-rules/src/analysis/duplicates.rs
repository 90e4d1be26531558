//! Declarations sharing a name.
//!
//! Two questions are asked of a symbol's declaration list:
//!
//! - does a declaration of a *different* kind share the name (a class and a
//!   function called `A`)? That is [`FaultId::DeclWithDuplicateName`];
//! - does a declaration of the *same* kind repeat (two `enum Color`)? That is
//!   merging, reported once, at the second declaration.
//!
//! Namespaces merged with a type of the same name are allowed.

use crate::linter::Linter;
use arkts_lint_core::{FaultId, NodeId, NodeKind, NodeRef, Oracle, SymbolId};

/// Kinds of every declaration of `sym`, skipping bare identifier declarations.
fn declaration_kinds(o: &dyn Oracle, sym: SymbolId) -> Vec<(NodeRef, NodeKind)> {
    o.declarations_of(sym)
        .iter()
        .filter_map(|d| {
            let kind = o.file_of(*d)?.get(d.node)?.kind;
            (kind != NodeKind::Identifier).then_some((*d, kind))
        })
        .collect()
}

fn is_namespace_type_merge(a: NodeKind, b: NodeKind) -> bool {
    (a.is_type_declaration() && b == NodeKind::ModuleDeclaration)
        || (b.is_type_declaration() && a == NodeKind::ModuleDeclaration)
}

/// True if another declaration of `sym` has a different kind than `kind`.
pub(crate) fn symbol_has_duplicate_name(o: &dyn Oracle, sym: SymbolId, kind: NodeKind) -> bool {
    let decls = declaration_kinds(o, sym);
    decls.len() > 1
        && decls
            .iter()
            .any(|(_, k)| *k != kind && !is_namespace_type_merge(*k, kind))
}

/// Reports [`FaultId::DeclWithDuplicateName`] at `decl` when the symbol named
/// by `name` is also declared with another kind.
///
/// `kind` overrides the declaration's own kind, for binding elements that
/// inherit the kind of their enclosing declaration.
pub(crate) fn count_declarations_with_duplicate_name(
    cx: &mut Linter<'_>,
    name: NodeId,
    decl: NodeId,
    kind: Option<NodeKind>,
) {
    if !cx.enabled(FaultId::DeclWithDuplicateName) {
        return;
    }
    let Some(sym) = cx.symbol_at(name) else {
        return;
    };
    let kind = kind.unwrap_or_else(|| cx.file().kind(decl));
    if symbol_has_duplicate_name(cx.oracle(), sym, kind) {
        cx.report(decl, FaultId::DeclWithDuplicateName);
    }
}

/// Position of `decl` among the same-kind declarations of its symbol, with
/// the number of such declarations.
fn same_kind_position(cx: &Linter<'_>, decl: NodeId) -> Option<(usize, usize)> {
    let file = cx.file();
    let kind = file.kind(decl);
    let sym = cx.symbol_at(decl).or_else(|| {
        file.fields(decl)
            .name
            .and_then(|name| cx.symbol_at(name))
    })?;
    let here = cx.at(decl);
    let same: Vec<NodeRef> = declaration_kinds(cx.oracle(), sym)
        .into_iter()
        .filter(|(_, k)| *k == kind)
        .map(|(d, _)| d)
        .collect();
    let position = same.iter().position(|d| *d == here)?;
    Some((position, same.len()))
}

/// Reports `rule` once per merged symbol: at its second same-kind
/// declaration, however many there are.
pub(crate) fn report_merging(cx: &mut Linter<'_>, decl: NodeId, rule: FaultId) {
    if !cx.enabled(rule) {
        return;
    }
    if let Some((1, count)) = same_kind_position(cx, decl) {
        if count > 1 {
            cx.report(decl, rule);
        }
    }
}

/// Class members whose names differ only by the private `#` prefix.
pub(crate) fn check_class_member_names(cx: &mut Linter<'_>, class: NodeId) {
    if !cx.enabled(FaultId::DeclWithDuplicateName) {
        return;
    }
    let file = cx.file();
    let mut seen: Vec<(&str, bool)> = Vec::new();
    let mut clashes = Vec::new();
    for &member in &file.fields(class).elements {
        let Some(name) = file.fields(member).name else {
            continue;
        };
        let private = file.is(name, NodeKind::PrivateIdentifier);
        let text = file.text(name).trim_start_matches('#');
        if text.is_empty() {
            continue;
        }
        if seen.iter().any(|(t, p)| *t == text && *p != private) {
            clashes.push(member);
        }
        seen.push((text, private));
    }
    for member in clashes {
        cx.report(member, FaultId::DeclWithDuplicateName);
    }
}
