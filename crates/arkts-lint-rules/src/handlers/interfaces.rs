//! Interfaces, their members and type literals.

use crate::analysis::duplicates::{count_declarations_with_duplicate_name, report_merging};
use crate::analysis::sdk::check_duplicate_global;
use crate::linter::Linter;
use crate::semantics::{first_declaration, is_class, is_class_or_interface, resolve};
use arkts_lint_core::{FaultId, NodeFlags, NodeId, NodeKind, NodeRef, TypeFlags, TypeId};
use rustc_hash::FxHashMap;

pub(crate) fn interface_declaration(cx: &mut Linter<'_>, node: NodeId) {
    report_merging(cx, node, FaultId::InterfaceMerging);
    check_heritage(cx, node);
    if let Some(name) = cx.file().fields(node).name {
        count_declarations_with_duplicate_name(cx, name, node, None);
        check_duplicate_global(cx, name);
    }
}

/// How a member's declared type is compared across base interfaces: by its
/// written text when the file has text, else by the type the oracle gives.
#[derive(Debug, Clone, PartialEq)]
enum TypeKey {
    Text(String),
    Type(TypeId),
}

fn check_heritage(cx: &mut Linter<'_>, iface: NodeId) {
    let file = cx.file();
    let o = cx.oracle();
    for &clause in &file.fields(iface).heritage_clauses {
        if file.has_flags(clause, NodeFlags::IMPLEMENTS) {
            continue;
        }
        let mut seen: FxHashMap<String, TypeKey> = FxHashMap::default();
        for &base in &file.fields(clause).elements {
            let Some(t) = file.fields(base).expression.and_then(|e| cx.type_at(e)) else {
                continue;
            };
            if is_class(o, t) {
                cx.report(base, FaultId::InterfaceExtendsClass);
            } else if is_class_or_interface(o, t) && has_conflicting_member(cx, t, &mut seen) {
                cx.report(iface, FaultId::IntefaceExtendDifProps);
            }
        }
    }
}

/// Records the property and method types of `base`, returning true if one
/// disagrees with a type recorded from an earlier base.
fn has_conflicting_member(cx: &Linter<'_>, base: TypeId, seen: &mut FxHashMap<String, TypeKey>) -> bool {
    let o = cx.oracle();
    let Some(info) = o.ty(base) else {
        return false;
    };
    let mut conflict = false;
    for &member in &info.members {
        let Some(decl_ref) = first_declaration(o, member) else {
            continue;
        };
        let Some((decl_file, decl)) = resolve(o, decl_ref) else {
            continue;
        };
        if !matches!(
            decl_file.kind(decl),
            NodeKind::PropertySignature
                | NodeKind::PropertyDeclaration
                | NodeKind::MethodSignature
                | NodeKind::MethodDeclaration
        ) {
            continue;
        }
        let Some(ty) = decl_file.fields(decl).ty else {
            continue;
        };
        let written = decl_file.source_text(ty);
        let key = if written.is_empty() {
            let Some(t) = o.type_at(NodeRef::new(decl_ref.file, ty)) else {
                continue;
            };
            TypeKey::Type(t)
        } else {
            TypeKey::Text(written.to_string())
        };
        let name = o.symbol_name(member).to_string();
        match seen.get(&name) {
            Some(previous) if *previous != key => conflict = true,
            Some(_) => {}
            None => {
                seen.insert(name, key);
            }
        }
    }
    conflict
}

pub(crate) fn method_signature(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    if file.fields(node).ty.is_none() {
        cx.report(node, FaultId::LimitedReturnTypeInference);
    }
    if cx.arkts2() && file.has_flags(node, NodeFlags::QUESTION) {
        cx.report(node, FaultId::OptionalMethod);
    }
}

pub(crate) fn construct_signature(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    match file.parent(node).map(|p| file.kind(p)) {
        Some(NodeKind::TypeLiteral) => cx.report(node, FaultId::ConstructorType),
        Some(NodeKind::InterfaceDeclaration) => cx.report(node, FaultId::ConstructorIface),
        _ => {}
    }
}

/// Index signatures are accepted only as `[i: number]: T` on the array-like
/// declarations of the concurrent collections library.
pub(crate) fn index_signature(cx: &mut Linter<'_>, node: NodeId) {
    if !is_allowed_index_signature(cx, node) {
        cx.report(node, FaultId::IndexMember);
    }
}

fn is_allowed_index_signature(cx: &Linter<'_>, node: NodeId) -> bool {
    let file = cx.file();
    let [param] = file.fields(node).parameters.as_slice() else {
        return false;
    };
    let numeric = cx
        .type_at(*param)
        .is_some_and(|t| cx.oracle().type_flags(t).contains(TypeFlags::NUMBER));
    numeric
        && file.is_declaration_file
        && file.normalized_path().ends_with("@arkts.collections.d.ets")
}

pub(crate) fn type_literal(cx: &mut Linter<'_>, node: NodeId) {
    cx.report_with_fix(node, FaultId::ObjectTypeLiteral, |fixer, site| {
        fixer.fix_type_literal(site)
    });
}
