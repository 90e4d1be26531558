//! SDK whitelist lookups.
//!
//! Imports populate the per-file interface map as they are visited, so a
//! use is only matched against imports that precede it in the document.
//! Global entries apply regardless of imports.

use crate::linter::Linter;
use crate::semantics::{first_declaration, resolve};
use arkts_lint_core::whitelist::{ApiListItem, ApiProblem};
use arkts_lint_core::{FaultId, NodeId, NodeKind};
use tracing::debug;

const SDK_FAULTS: &[FaultId] = &[
    FaultId::LimitedVoidTypeFromSdk,
    FaultId::DuplicateDeclNameFromSdk,
    FaultId::IndexedAccessTypeFromSdk,
    FaultId::SendablePropTypeFromSdk,
    FaultId::ConstructorFuncsFromSdk,
    FaultId::OptionalMethodFromSdk,
    FaultId::LiteralAsPropertyNameFromSdk,
];

fn any_sdk_fault_enabled(cx: &Linter<'_>) -> bool {
    SDK_FAULTS.iter().any(|f| cx.enabled(*f))
}

/// Reports each distinct fault of `entries` once at `node`.
fn report_entries(cx: &mut Linter<'_>, node: NodeId, entries: &[&ApiListItem]) {
    let mut reported: Vec<FaultId> = Vec::new();
    for entry in entries {
        let Some(rule) = entry.info.problem.fault() else {
            continue;
        };
        if rule == FaultId::DuplicateDeclNameFromSdk || reported.contains(&rule) {
            continue;
        }
        reported.push(rule);
        cx.report(node, rule);
    }
}

/// Records the whitelist entries reachable through an import specifier or
/// namespace import under its local name.
pub(crate) fn record_import(cx: &mut Linter<'_>, binding: NodeId) {
    if !any_sdk_fault_enabled(cx) {
        return;
    }
    let Some(tables) = cx.whitelist() else {
        return;
    };
    let file = cx.file();
    let Some(local) = file.fields(binding).name else {
        return;
    };
    let Some(module) = file
        .ancestor_of_kind(binding, NodeKind::ImportDeclaration)
        .and_then(|d| file.fields(d).module_specifier)
        .map(|s| file.text(s))
    else {
        return;
    };
    let local_name = file.text(local).to_string();
    let entries: Vec<&ApiListItem> = if file.is(binding, NodeKind::NamespaceImport) {
        tables
            .entries()
            .iter()
            .filter(|e| e.info.parents.is_empty() && e.matches_import(module))
            .collect()
    } else {
        let imported = file.fields(binding).property_name.unwrap_or(local);
        let o = cx.oracle();
        let declaration_path = cx
            .true_symbol_at(local)
            .and_then(|s| first_declaration(o, s))
            .and_then(|d| o.file_of(d))
            .map(|f| f.normalized_path());
        tables.entries_for_import(module, declaration_path.as_deref(), file.text(imported))
    };
    if entries.is_empty() {
        return;
    }
    debug!(name = %local_name, entries = entries.len(), "SDK import recorded");
    cx.state
        .interface_map
        .entry(local_name)
        .or_default()
        .extend(entries);
}

/// `X.m` where `X` is an imported SDK name with a restricted member `m`.
pub(crate) fn check_member_use(cx: &mut Linter<'_>, access: NodeId) {
    if cx.state.interface_map.is_empty() {
        return;
    }
    let file = cx.file();
    let (Some(base), Some(member)) = (file.fields(access).expression, file.fields(access).name)
    else {
        return;
    };
    if !file.is(base, NodeKind::Identifier) {
        return;
    }
    let Some(entries) = cx.state.interface_map.get(file.text(base)) else {
        return;
    };
    let member = file.text(member);
    let hits: Vec<&ApiListItem> = entries
        .iter()
        .copied()
        .filter(|e| e.info.name.as_str() == member && e.info.parents.len() <= 1)
        .collect();
    report_entries(cx, access, &hits);
}

/// A type reference naming an imported SDK declaration.
pub(crate) fn check_type_use(cx: &mut Linter<'_>, type_ref: NodeId) {
    if cx.state.interface_map.is_empty() {
        return;
    }
    let file = cx.file();
    let Some(name) = file.fields(type_ref).name else {
        return;
    };
    let (key, wanted) = match file.kind(name) {
        NodeKind::Identifier => (file.text(name), None),
        NodeKind::QualifiedName => {
            let (Some(left), Some(right)) = (file.fields(name).expression, file.fields(name).name)
            else {
                return;
            };
            (file.text(left), Some(file.text(right)))
        }
        _ => return,
    };
    let Some(entries) = cx.state.interface_map.get(key) else {
        return;
    };
    let hits: Vec<&ApiListItem> = entries
        .iter()
        .copied()
        .filter(|e| e.info.parents.is_empty() && wanted.map_or(true, |w| e.info.name.as_str() == w))
        .collect();
    report_entries(cx, type_ref, &hits);
}

/// Members of `class` overriding restricted members of an imported SDK base.
pub(crate) fn check_heritage_overrides(cx: &mut Linter<'_>, class: NodeId) {
    if cx.state.interface_map.is_empty() {
        return;
    }
    let file = cx.file();
    let bases: Vec<&str> = file
        .fields(class)
        .heritage_clauses
        .iter()
        .flat_map(|h| file.fields(*h).elements.iter())
        .filter_map(|t| file.fields(*t).expression)
        .filter(|e| file.is(*e, NodeKind::Identifier))
        .map(|e| file.text(e))
        .collect();
    let mut hits: Vec<(NodeId, Vec<&ApiListItem>)> = Vec::new();
    for base in bases {
        let Some(entries) = cx.state.interface_map.get(base) else {
            continue;
        };
        for &member in &file.fields(class).elements {
            let Some(name) = file.fields(member).name else {
                continue;
            };
            let name_text = file.text(name);
            let matching: Vec<&ApiListItem> = entries
                .iter()
                .copied()
                .filter(|e| e.info.parents.len() == 1 && e.info.name.as_str() == name_text)
                .collect();
            if !matching.is_empty() {
                hits.push((name, matching));
            }
        }
    }
    for (name, entries) in hits {
        report_entries(cx, name, &entries);
    }
}

/// A declaration whose name collides with a global SDK declaration.
pub(crate) fn check_duplicate_global(cx: &mut Linter<'_>, name: NodeId) {
    if !cx.enabled(FaultId::DuplicateDeclNameFromSdk) {
        return;
    }
    let Some(tables) = cx.whitelist() else {
        return;
    };
    let file = cx.file();
    if !file.is(name, NodeKind::Identifier) {
        return;
    }
    let text = file.text(name);
    let collides = tables
        .entries_with_problem(&ApiProblem::DuplicateDeclaration)
        .iter()
        .any(|e| e.is_global && e.info.parents.is_empty() && e.info.name.as_str() == text);
    if collides {
        cx.report(name, FaultId::DuplicateDeclNameFromSdk);
    }
}

/// A reference to a global SDK API, or to an API declared in an SDK file.
pub(crate) fn check_global_use(cx: &mut Linter<'_>, ident: NodeId) {
    if !any_sdk_fault_enabled(cx) {
        return;
    }
    let Some(tables) = cx.whitelist() else {
        return;
    };
    let o = cx.oracle();
    let file = cx.file();
    let text = file.text(ident);
    let decl = cx.true_symbol_at(ident).and_then(|s| first_declaration(o, s));
    if decl.is_some_and(|d| cx.is_local(d)) {
        return;
    }
    let mut hits: Vec<&ApiListItem> = tables
        .global_entries(text)
        .into_iter()
        .filter(|e| e.info.parents.is_empty())
        .collect();
    if let Some((decl_file, _)) = decl.and_then(|d| resolve(o, d)) {
        if decl_file.is_declaration_file {
            hits.extend(
                tables
                    .file_entries_matching(&decl_file.normalized_path())
                    .into_iter()
                    .filter(|e| e.info.parents.is_empty() && e.info.name.as_str() == text),
            );
        }
    }
    report_entries(cx, ident, &hits);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LintContext, Linter};
    use arkts_lint_core::{
        FileId, LinterOptions, ProcessCache, ProgramBuilder, TreeBuilder, WhitelistTables,
    };
    use pretty_assertions::assert_eq;

    const WHITELIST: &str = r#"{
        "api_list": [
            {
                "file_path": "api/@ohos.net.d.ts",
                "import_path": ["@ohos.net"],
                "is_global": false,
                "api_info": {
                    "problem": "LimitedVoidType",
                    "api_name": "send",
                    "api_type": "MethodDeclaration",
                    "parent_api": [{ "api_name": "Socket", "api_type": "ClassDeclaration" }],
                    "method_return_type": "void | Promise<void>"
                }
            },
            {
                "file_path": "api/global.d.ts",
                "import_path": [],
                "is_global": true,
                "api_info": {
                    "problem": "DuplicateDeclaration",
                    "api_name": "print",
                    "api_type": "FunctionDeclaration"
                }
            }
        ]
    }"#;

    fn run(program: &arkts_lint_core::Program, tables: &WhitelistTables) -> arkts_lint_core::FileFaults {
        let mut cache = ProcessCache::new();
        let ctx = LintContext::new(program, FileId(0), &mut cache)
            .expect("file")
            .options(LinterOptions::default().arkts2(true))
            .whitelist(tables);
        Linter::new(ctx).run().expect("not cancelled")
    }

    #[test]
    fn test_member_use_matches_only_after_import() {
        let tables = WhitelistTables::from_json(WHITELIST).expect("whitelist");
        let mut b = TreeBuilder::new("entry/a.ets");
        let early_base = b.ident("Socket");
        let early = b.prop_access(early_base, "send");
        let early_stmt = b.expr_stmt(early);
        let (import, _) = b.import_named(&["Socket"], "@ohos.net");
        let late_base = b.ident("Socket");
        let late = b.prop_access(late_base, "send");
        let late_stmt = b.expr_stmt(late);
        let file = b.finish([early_stmt, import, late_stmt]);
        let late_range = file.range(late);
        let mut p = ProgramBuilder::new();
        p.add_file(file);
        let faults = run(&p.build(), &tables);
        let sdk: Vec<_> = faults
            .faults
            .iter()
            .filter(|f| f.rule == FaultId::LimitedVoidTypeFromSdk)
            .map(|f| f.range)
            .collect();
        assert_eq!(sdk, vec![late_range]);
    }

    #[test]
    fn test_declaration_colliding_with_global_api() {
        let tables = WhitelistTables::from_json(WHITELIST).expect("whitelist");
        let mut b = TreeBuilder::new("entry/a.ets");
        let name = b.ident("print");
        let body = b.block([]);
        let void = b.token(NodeKind::VoidKeyword);
        let func = b.function_decl([], Some(name), [], Some(void), Some(body));
        let file = b.finish([func]);
        let name_range = file.range(name);
        let mut p = ProgramBuilder::new();
        p.add_file(file);
        let faults = run(&p.build(), &tables);
        let dups: Vec<_> = faults
            .faults
            .iter()
            .filter(|f| f.rule == FaultId::DuplicateDeclNameFromSdk)
            .map(|f| f.range)
            .collect();
        assert_eq!(dups, vec![name_range]);
    }
}
