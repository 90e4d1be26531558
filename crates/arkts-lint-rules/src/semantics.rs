//! Type and declaration predicates shared by the handlers.
//!
//! Everything here is a pure query against the [`Oracle`]; an unanswered
//! lookup makes the predicate return `false` (or `None`).

use arkts_lint_core::whitelist::builtins::{ES_OBJECT, SENDABLE_DECORATOR};
use arkts_lint_core::{
    NodeId, NodeKind, NodeRef, ObjectKind, Oracle, SourceFile, SymbolFlags, SymbolId, TypeFlags,
    TypeId,
};
use rustc_hash::FxHashSet;

const MAX_DEPTH: usize = 16;

/// Resolves a node reference to its file and node.
pub(crate) fn resolve(o: &dyn Oracle, r: NodeRef) -> Option<(&SourceFile, NodeId)> {
    let file = o.file(r.file)?;
    file.get(r.node)?;
    Some((file, r.node))
}

/// First declaration of a symbol.
pub(crate) fn first_declaration(o: &dyn Oracle, sym: SymbolId) -> Option<NodeRef> {
    o.declarations_of(sym).first().copied()
}

/// Kind of a declaration node.
pub(crate) fn declaration_kind(o: &dyn Oracle, r: NodeRef) -> Option<NodeKind> {
    resolve(o, r).map(|(f, n)| f.kind(n))
}

// ── Type shape ──

pub(crate) fn flags(o: &dyn Oracle, t: TypeId) -> TypeFlags {
    o.type_flags(t)
}

pub(crate) fn is_any(o: &dyn Oracle, t: TypeId) -> bool {
    flags(o, t).contains(TypeFlags::ANY)
}

pub(crate) fn is_unknown(o: &dyn Oracle, t: TypeId) -> bool {
    flags(o, t).contains(TypeFlags::UNKNOWN)
}

/// `any`, `unknown` and intersections.
pub(crate) fn is_unsupported(o: &dyn Oracle, t: TypeId) -> bool {
    flags(o, t).intersects(TypeFlags::ANY | TypeFlags::UNKNOWN | TypeFlags::INTERSECTION)
}

pub(crate) fn is_union(o: &dyn Oracle, t: TypeId) -> bool {
    flags(o, t).contains(TypeFlags::UNION)
}

pub(crate) fn is_number_like(o: &dyn Oracle, t: TypeId) -> bool {
    if is_union(o, t) {
        return o.union_members(t).iter().all(|m| is_number_like(o, *m));
    }
    flags(o, t).intersects(TypeFlags::NUMBER_LIKE)
}

pub(crate) fn is_primitive(o: &dyn Oracle, t: TypeId) -> bool {
    flags(o, t).intersects(
        TypeFlags::BOOLEAN_LIKE | TypeFlags::NUMBER_LIKE | TypeFlags::STRING_LIKE | TypeFlags::BIGINT_LIKE,
    )
}

/// String, number, boolean and bigint literal types that are not enum members.
pub(crate) fn is_pure_primitive_literal(o: &dyn Oracle, t: TypeId) -> bool {
    let f = flags(o, t);
    f.intersects(TypeFlags::LITERAL) && !f.intersects(TypeFlags::ENUM_LIKE)
}

pub(crate) fn is_enum(o: &dyn Oracle, t: TypeId) -> bool {
    flags(o, t).intersects(TypeFlags::ENUM_LIKE)
}

/// Generic target of a reference, or the type itself.
pub(crate) fn reduce_reference(o: &dyn Oracle, t: TypeId) -> TypeId {
    match o.ty(t) {
        Some(info) if info.is_object_kind(ObjectKind::Reference) => info.target.unwrap_or(t),
        _ => t,
    }
}

pub(crate) fn is_object_kind(o: &dyn Oracle, t: TypeId, kind: ObjectKind) -> bool {
    o.ty(t).is_some_and(|info| info.is_object_kind(kind))
}

pub(crate) fn is_class(o: &dyn Oracle, t: TypeId) -> bool {
    is_object_kind(o, reduce_reference(o, t), ObjectKind::Class)
}

pub(crate) fn is_interface(o: &dyn Oracle, t: TypeId) -> bool {
    is_object_kind(o, reduce_reference(o, t), ObjectKind::Interface)
}

pub(crate) fn is_class_or_interface(o: &dyn Oracle, t: TypeId) -> bool {
    is_class(o, t) || is_interface(o, t)
}

pub(crate) fn is_reference(o: &dyn Oracle, t: TypeId) -> bool {
    is_object_kind(o, t, ObjectKind::Reference)
}

pub(crate) fn is_anonymous(o: &dyn Oracle, t: TypeId) -> bool {
    if flags(o, t).intersects(TypeFlags::UNION_OR_INTERSECTION) {
        return o
            .ty(t)
            .is_some_and(|info| info.types.iter().any(|m| is_anonymous(o, *m)));
    }
    is_object_kind(o, t, ObjectKind::Anonymous)
}

pub(crate) fn is_tuple(o: &dyn Oracle, t: TypeId) -> bool {
    is_object_kind(o, t, ObjectKind::Tuple)
}

/// Instantiations of `Array` and `ReadonlyArray`.
pub(crate) fn is_array(o: &dyn Oracle, t: TypeId) -> bool {
    let Some(info) = o.ty(t) else {
        return false;
    };
    if !info.is_object_kind(ObjectKind::Reference) {
        return false;
    }
    info.symbol
        .is_some_and(|s| matches!(o.symbol_name(s), "Array" | "ReadonlyArray"))
}

/// Value type of a class object, e.g. the type of `C` in `let c = C`.
pub(crate) fn is_class_value_type(o: &dyn Oracle, t: TypeId) -> bool {
    o.ty(t).is_some_and(|info| {
        info.is_object_kind(ObjectKind::Anonymous)
            && info
                .symbol
                .is_some_and(|s| o.symbol_flags(s).contains(SymbolFlags::CLASS))
    })
}

/// Types with call signatures.
pub(crate) fn is_functional(o: &dyn Oracle, t: TypeId) -> bool {
    o.ty(t).is_some_and(|info| !info.call_signatures.is_empty())
}

/// Symbol the type is named by: its alias, else its own symbol.
pub(crate) fn naming_symbol(o: &dyn Oracle, t: TypeId) -> Option<SymbolId> {
    let info = o.ty(t)?;
    info.alias_symbol.or(info.symbol)
}

/// True if `t` or one of its bases satisfies `pred`.
pub(crate) fn is_or_derived_from(
    o: &dyn Oracle,
    t: TypeId,
    pred: &dyn Fn(TypeId) -> bool,
) -> bool {
    let mut seen = FxHashSet::default();
    let mut stack = vec![t];
    while let Some(cur) = stack.pop() {
        if pred(cur) {
            return true;
        }
        let reduced = reduce_reference(o, cur);
        if !seen.insert(reduced) {
            continue;
        }
        if reduced != cur && pred(reduced) {
            return true;
        }
        if let Some(info) = o.ty(reduced) {
            stack.extend(info.base_types.iter().copied());
        }
    }
    false
}

// ── Library membership ──

/// Symbols declared in a declaration file or the default library.
pub(crate) fn is_library_symbol(o: &dyn Oracle, sym: SymbolId) -> bool {
    first_declaration(o, sym)
        .and_then(|d| o.file_of(d))
        .is_some_and(|f| f.is_declaration_file || f.is_default_library)
}

/// Symbols of the standard library.
pub(crate) fn is_std_library_symbol(o: &dyn Oracle, sym: SymbolId) -> bool {
    first_declaration(o, sym)
        .and_then(|d| o.file_of(d))
        .is_some_and(|f| f.is_default_library)
}

pub(crate) fn is_library_type(o: &dyn Oracle, t: TypeId) -> bool {
    let t = o.non_nullable(t);
    if is_union(o, t) {
        return o.union_members(t).iter().all(|m| is_library_type(o, *m));
    }
    naming_symbol(o, t).is_some_and(|s| is_library_symbol(o, s))
}

pub(crate) fn is_std_named(o: &dyn Oracle, sym: Option<SymbolId>, name: &str) -> bool {
    sym.is_some_and(|s| o.symbol_name(s) == name && is_std_library_symbol(o, s))
}

pub(crate) fn is_std_error_type(o: &dyn Oracle, t: TypeId) -> bool {
    is_std_named(o, o.ty(reduce_reference(o, t)).and_then(|i| i.symbol), "Error")
}

pub(crate) fn is_std_record_type(o: &dyn Oracle, t: TypeId) -> bool {
    is_std_named(o, o.ty(t).and_then(|i| i.alias_symbol), "Record")
}

pub(crate) fn is_std_partial_type(o: &dyn Oracle, t: TypeId) -> bool {
    is_std_named(o, o.ty(t).and_then(|i| i.alias_symbol), "Partial")
}

pub(crate) fn is_std_map_type(o: &dyn Oracle, t: TypeId) -> bool {
    is_std_named(o, o.ty(reduce_reference(o, t)).and_then(|i| i.symbol), "Map")
}

pub(crate) fn is_object_root(o: &dyn Oracle, t: TypeId) -> bool {
    flags(o, t).contains(TypeFlags::NON_PRIMITIVE)
        || (is_class_or_interface(o, t)
            && o.ty(t).and_then(|i| i.symbol).is_some_and(|s| o.symbol_name(s) == "Object"))
}

// ── ESObject ──

/// `ESObject` type reference node.
pub(crate) fn is_es_object_type_node(file: &SourceFile, node: NodeId) -> bool {
    file.is(node, NodeKind::TypeReference) && file.name_text(node) == Some(ES_OBJECT)
}

/// Type annotation of a variable or property declaration of `sym`.
pub(crate) fn declared_type_node(o: &dyn Oracle, sym: SymbolId) -> Option<(&SourceFile, NodeId)> {
    let (file, decl) = resolve(o, first_declaration(o, sym)?)?;
    if !matches!(
        file.kind(decl),
        NodeKind::VariableDeclaration | NodeKind::PropertyDeclaration | NodeKind::Parameter
    ) {
        return None;
    }
    Some((file, file.fields(decl).ty?))
}

/// The symbol's variable or property is annotated as `ESObject`.
pub(crate) fn symbol_has_es_object_type(o: &dyn Oracle, sym: SymbolId) -> bool {
    declared_type_node(o, sym).is_some_and(|(f, ty)| is_es_object_type_node(f, ty))
}

/// The `ESObject` alias itself.
pub(crate) fn is_es_object_symbol(o: &dyn Oracle, sym: SymbolId) -> bool {
    let Some((file, decl)) = first_declaration(o, sym).and_then(|d| resolve(o, d)) else {
        return false;
    };
    file.is(decl, NodeKind::TypeAliasDeclaration)
        && file.name_text(decl) == Some(ES_OBJECT)
        && file.fields(decl).ty.is_some_and(|t| file.is(t, NodeKind::AnyKeyword))
}

// ── Decorators and sendable declarations ──

/// Name of a decorator: `@Name` or `@Name(...)`.
pub(crate) fn decorator_name(file: &SourceFile, decorator: NodeId) -> Option<&str> {
    let mut expr = file.fields(decorator).expression?;
    if file.is(expr, NodeKind::CallExpression) {
        expr = file.fields(expr).expression?;
    }
    match file.kind(expr) {
        NodeKind::Identifier => Some(file.text(expr)),
        NodeKind::PropertyAccessExpression => file.name_text(expr),
        _ => None,
    }
}

pub(crate) fn sendable_decorator(file: &SourceFile, decl: NodeId) -> Option<NodeId> {
    file.fields(decl)
        .decorators
        .iter()
        .copied()
        .find(|d| decorator_name(file, *d) == Some(SENDABLE_DECORATOR))
}

pub(crate) fn has_sendable_decorator(file: &SourceFile, decl: NodeId) -> bool {
    sendable_decorator(file, decl).is_some()
}

pub(crate) fn non_sendable_decorators(file: &SourceFile, decl: NodeId) -> Vec<NodeId> {
    file.fields(decl)
        .decorators
        .iter()
        .copied()
        .filter(|d| decorator_name(file, *d) != Some(SENDABLE_DECORATOR))
        .collect()
}

/// Decorators of a member (or constructor parameter) of a `@Sendable` class.
pub(crate) fn decorators_in_sendable_class(file: &SourceFile, decl: NodeId) -> Vec<NodeId> {
    let class = if file.is(decl, NodeKind::Parameter) {
        file.parent(decl).and_then(|p| file.parent(p))
    } else {
        file.parent(decl)
    };
    match class {
        Some(c) if file.is(c, NodeKind::ClassDeclaration) && has_sendable_decorator(file, c) => {
            file.fields(decl).decorators.clone()
        }
        _ => Vec::new(),
    }
}

/// The `lang.ISendable` marker interface.
pub(crate) fn is_isendable_interface(o: &dyn Oracle, t: TypeId) -> bool {
    let Some(sym) = naming_symbol(o, t) else {
        return false;
    };
    let Some((file, decl)) = first_declaration(o, sym).and_then(|d| resolve(o, d)) else {
        return false;
    };
    if !file.is(decl, NodeKind::InterfaceDeclaration) || file.name_text(decl) != Some("ISendable") {
        return false;
    }
    file.parent(decl)
        .filter(|b| file.is(*b, NodeKind::ModuleBlock))
        .and_then(|b| file.parent(b))
        .is_some_and(|ns| file.name_text(ns) == Some("lang"))
}

pub(crate) fn is_sendable_class_or_interface(o: &dyn Oracle, t: TypeId) -> bool {
    let Some(sym) = o.ty(t).and_then(|i| i.symbol) else {
        return false;
    };
    if is_class(o, t) {
        if let Some((file, decl)) = first_declaration(o, sym).and_then(|d| resolve(o, d)) {
            if file.is(decl, NodeKind::ClassDeclaration) {
                return has_sendable_decorator(file, decl);
            }
        }
    }
    is_or_derived_from(o, t, &|b| is_isendable_interface(o, b))
}

pub(crate) fn type_contains_sendable_class_or_interface(o: &dyn Oracle, t: TypeId) -> bool {
    if is_union(o, t) {
        return o
            .union_members(t)
            .iter()
            .any(|m| type_contains_sendable_class_or_interface(o, *m));
    }
    is_sendable_class_or_interface(o, t)
}

pub(crate) fn type_contains_non_sendable_class_or_interface(o: &dyn Oracle, t: TypeId) -> bool {
    if is_union(o, t) {
        return o
            .union_members(t)
            .iter()
            .any(|m| type_contains_non_sendable_class_or_interface(o, *m));
    }
    is_class_or_interface(o, t) && !is_sendable_class_or_interface(o, t)
}

/// Every function declaration of `sym` taken together carries `@Sendable`.
pub(crate) fn function_overloads_have_sendable(o: &dyn Oracle, sym: SymbolId) -> bool {
    o.declarations_of(sym).iter().any(|d| {
        resolve(o, *d).is_some_and(|(f, n)| {
            f.is(n, NodeKind::FunctionDeclaration) && has_sendable_decorator(f, n)
        })
    })
}

/// Function types whose declaration is a `@Sendable` function.
pub(crate) fn is_sendable_function(o: &dyn Oracle, t: TypeId) -> bool {
    let Some(sig) = o.ty(t).and_then(|i| i.call_signatures.first().copied()) else {
        return false;
    };
    let Some(decl) = o.signature(sig).and_then(|s| s.declaration) else {
        return false;
    };
    if declaration_kind(o, decl) != Some(NodeKind::FunctionDeclaration) {
        return false;
    }
    o.symbol_at(decl)
        .is_some_and(|s| function_overloads_have_sendable(o, s))
}

/// Declaration of the type alias a type was written through, following
/// alias-of-alias chains.
pub(crate) fn type_alias_declaration(o: &dyn Oracle, t: TypeId) -> Option<NodeRef> {
    let mut t = t;
    for _ in 0..MAX_DEPTH {
        let alias = o.ty(t)?.alias_symbol?;
        let decl = first_declaration(o, alias)?;
        let (file, node) = resolve(o, decl)?;
        if !file.is(node, NodeKind::TypeAliasDeclaration) {
            return None;
        }
        let aliased = file.fields(node).ty?;
        let next = file
            .is(aliased, NodeKind::TypeReference)
            .then(|| file.fields(aliased).name)
            .flatten()
            .and_then(|name| o.type_at(NodeRef::new(decl.file, name)))
            .filter(|nt| {
                o.ty(*nt)
                    .and_then(|i| i.alias_symbol)
                    .is_some_and(|s| o.symbol_flags(s).contains(SymbolFlags::TYPE_ALIAS))
            });
        match next {
            Some(nt) => t = nt,
            None => return Some(decl),
        }
    }
    None
}

pub(crate) fn is_sendable_type_alias(o: &dyn Oracle, t: TypeId) -> bool {
    type_alias_declaration(o, t)
        .and_then(|d| resolve(o, d))
        .is_some_and(|(f, n)| has_sendable_decorator(f, n))
}

pub(crate) fn has_sendable_type_alias(o: &dyn Oracle, t: TypeId) -> bool {
    if is_union(o, t) {
        return o.union_members(t).iter().any(|m| has_sendable_type_alias(o, *m));
    }
    is_sendable_type_alias(o, t)
}

fn is_non_sendable_function_type_alias(o: &dyn Oracle, t: TypeId) -> bool {
    type_alias_declaration(o, t)
        .and_then(|d| resolve(o, d))
        .is_some_and(|(f, n)| {
            f.fields(n).ty.is_some_and(|ty| f.is(ty, NodeKind::FunctionType))
                && !has_sendable_decorator(f, n)
        })
}

fn is_invalid_sendable_function_value(o: &dyn Oracle, t: TypeId) -> bool {
    if o.ty(t).is_some_and(|i| i.alias_symbol.is_some()) {
        return is_non_sendable_function_type_alias(o, t);
    }
    is_functional(o, t) && !is_sendable_function(o, t)
}

/// A sendable function alias receives a non-sendable function.
pub(crate) fn is_wrong_sendable_function_assignment(o: &dyn Oracle, lhs: TypeId, rhs: TypeId) -> bool {
    let lhs = o.non_nullable(lhs);
    let rhs = o.non_nullable(rhs);
    if !has_sendable_type_alias(o, lhs) {
        return false;
    }
    if is_union(o, rhs) {
        return o
            .union_members(rhs)
            .iter()
            .any(|m| is_invalid_sendable_function_value(o, *m));
    }
    is_invalid_sendable_function_value(o, rhs)
}

pub(crate) fn is_const_enum_symbol(o: &dyn Oracle, sym: Option<SymbolId>) -> bool {
    sym.is_some_and(|s| o.symbol_flags(s).contains(SymbolFlags::CONST_ENUM))
}

pub(crate) fn is_sendable_type(o: &dyn Oracle, t: TypeId) -> bool {
    if flags(o, t).intersects(
        TypeFlags::BOOLEAN_LIKE
            | TypeFlags::NUMBER
            | TypeFlags::STRING
            | TypeFlags::BIGINT
            | TypeFlags::NULL
            | TypeFlags::UNDEFINED
            | TypeFlags::TYPE_PARAMETER,
    ) {
        return true;
    }
    is_sendable_type_alias(o, t) || is_sendable_function(o, t) || is_sendable_class_or_interface(o, t)
}

pub(crate) fn is_shareable_type(o: &dyn Oracle, t: TypeId) -> bool {
    if is_const_enum_symbol(o, o.ty(t).and_then(|i| i.symbol)) {
        return true;
    }
    if is_union(o, t) {
        return o.union_members(t).iter().all(|m| is_shareable_type(o, *m));
    }
    is_pure_primitive_literal(o, t) || is_sendable_type(o, t)
}

/// Whether a type annotation only names sendable types.
///
/// `shared` additionally admits primitive literal types, which a shared
/// module may export.
pub(crate) fn is_sendable_type_node(o: &dyn Oracle, r: NodeRef, shared: bool) -> bool {
    let Some((file, mut node)) = resolve(o, r) else {
        return false;
    };
    while file.is(node, NodeKind::ParenthesizedType) {
        match file.children(node).first() {
            Some(&inner) => node = inner,
            None => break,
        }
    }
    let at = |n: NodeId| NodeRef::new(r.file, n);
    if file.is(node, NodeKind::UnionType) {
        return file
            .fields(node)
            .elements
            .iter()
            .all(|e| is_sendable_type_node(o, at(*e), shared));
    }
    let sym = if file.is(node, NodeKind::TypeReference) {
        file.fields(node).name.and_then(|n| o.true_symbol_at(at(n)))
    } else {
        None
    };
    if let Some(s) = sym.filter(|s| o.symbol_flags(*s).contains(SymbolFlags::TYPE_ALIAS)) {
        if let Some(decl) = first_declaration(o, s) {
            if let Some((df, dn)) = resolve(o, decl) {
                if df.is(dn, NodeKind::TypeAliasDeclaration) {
                    if !file
                        .fields(node)
                        .type_arguments
                        .iter()
                        .all(|a| is_sendable_type_node(o, at(*a), false))
                    {
                        return false;
                    }
                    return df
                        .fields(dn)
                        .ty
                        .is_some_and(|t| is_sendable_type_node(o, NodeRef::new(decl.file, t), shared));
                }
            }
        }
    }
    if is_const_enum_symbol(o, sym) {
        return true;
    }
    let Some(t) = o.type_at(at(node)) else {
        return keyword_is_sendable(file.kind(node));
    };
    if shared && is_pure_primitive_literal(o, t) {
        return true;
    }
    is_sendable_type(o, t)
}

fn keyword_is_sendable(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::NumberKeyword
            | NodeKind::StringKeyword
            | NodeKind::BooleanKeyword
            | NodeKind::BigIntKeyword
            | NodeKind::NullKeyword
            | NodeKind::UndefinedKeyword
    )
}

/// Value that may cross a shared-module boundary.
pub(crate) fn is_shareable_entity(o: &dyn Oracle, node: NodeRef) -> bool {
    let decl = o.true_symbol_at(node).and_then(|s| first_declaration(o, s));
    if let Some(d) = decl {
        if let Some((file, n)) = resolve(o, d) {
            if let Some(ty) = file.fields(n).ty.filter(|_| !file.kind(n).is_function_like()) {
                return is_sendable_type_node(o, NodeRef::new(d.file, ty), true);
            }
        }
    }
    o.type_at(decl.unwrap_or(node))
        .is_some_and(|t| is_shareable_type(o, t))
}

// ── File-level facts ──

/// First non-import statement is the `'use shared'` pragma.
pub(crate) fn is_shared_module(file: &SourceFile) -> bool {
    file.statements()
        .iter()
        .copied()
        .find(|s| !file.is(*s, NodeKind::ImportDeclaration))
        .is_some_and(|s| {
            file.is(s, NodeKind::ExpressionStatement)
                && file.fields(s).expression.is_some_and(|e| {
                    file.is(e, NodeKind::StringLiteral) && file.text(e) == "use shared"
                })
        })
}

/// How a module reached through an import is compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ModuleDialect {
    /// Plain JavaScript.
    Js,
    /// TypeScript source (not a declaration file).
    Ts,
    /// ArkTS without the `'use static'` pragma.
    LegacyEts,
    /// Static ArkTS or a declaration file.
    Static,
}

pub(crate) fn module_dialect(file: &SourceFile) -> ModuleDialect {
    let path = file.normalized_path();
    if path.ends_with(".js") {
        ModuleDialect::Js
    } else if path.ends_with(".ts") && !file.is_declaration_file && !path.ends_with(".d.ts") {
        ModuleDialect::Ts
    } else if path.ends_with(".ets") && !file.is_declaration_file && !file.has_use_static_pragma() {
        ModuleDialect::LegacyEts
    } else {
        ModuleDialect::Static
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arkts_lint_core::{NodeFlags, ProgramBuilder, SymbolFlags, TreeBuilder};

    #[test]
    fn sendable_class_is_detected_through_reference() {
        let mut b = TreeBuilder::new("a.ets");
        let deco = b.decorator_named("Sendable");
        let name = b.ident("S");
        let class = b.class_decl([deco], Some(name), [], []);
        let file = b.finish([class]);
        let mut p = ProgramBuilder::new();
        let f = p.add_file(file);
        let sym = p.symbol("S", SymbolFlags::CLASS);
        p.declare(sym, NodeRef::new(f, class));
        let class_ty = p.class_type(sym, &[]);
        let num = p.number();
        let reference = p.reference(class_ty, &[num]);
        let program = p.build();
        assert!(is_sendable_class_or_interface(&program, class_ty));
        assert!(is_sendable_class_or_interface(&program, reference));
        assert!(!type_contains_non_sendable_class_or_interface(&program, class_ty));
    }

    #[test]
    fn shared_module_pragma_may_follow_imports() {
        let mut b = TreeBuilder::new("a.ets");
        let (import, _) = b.import_named(&["x"], "./x");
        let pragma = b.string("use shared");
        let stmt = b.expr_stmt(pragma);
        let (var, _) = b.variable(NodeFlags::CONST, "y", None, None);
        let file = b.finish([import, stmt, var]);
        assert!(is_shared_module(&file));
    }

    #[test]
    fn dialect_by_extension() {
        let js = TreeBuilder::new("lib/a.js").finish([]);
        let dts = TreeBuilder::new("lib/a.d.ts").finish([]).declaration_file(true);
        let ets = TreeBuilder::new("lib/a.ets").finish([]);
        assert_eq!(module_dialect(&js), ModuleDialect::Js);
        assert_eq!(module_dialect(&dts), ModuleDialect::Static);
        assert_eq!(module_dialect(&ets), ModuleDialect::LegacyEts);
    }
}
