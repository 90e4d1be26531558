//! Checks that need the whole file: they collect during the walk and
//! report once it is done.

use crate::linter::Linter;
use arkts_lint_core::{FaultId, NodeId, NodeKind, SourceFile};
use tracing::debug;

impl Linter<'_> {
    /// Runs the finishing analyses after the walk.
    pub(crate) fn finish(&mut self) {
        self.report_missing_ui_imports();
        self.check_namespace_members();
    }

    /// UI interfaces used in the file without being imported by it.
    ///
    /// Every use is reported; the first carries the fix adding one import
    /// for all missing names.
    fn report_missing_ui_imports(&mut self) {
        let pending = std::mem::take(&mut self.state.interfaces_need_to_import);
        let missing: Vec<(String, NodeId)> = pending
            .into_iter()
            .filter(|(name, _)| !self.state.interfaces_already_imported.contains(name))
            .collect();
        if missing.is_empty() {
            return;
        }
        let mut names: Vec<String> = Vec::new();
        for (name, _) in &missing {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        debug!(count = names.len(), "UI interfaces missing an import");
        let root = self.file().root;
        let mut with_fix = true;
        for (_, node) in missing {
            if with_fix {
                with_fix = false;
                self.report_with_fix_at(node, root, FaultId::UIInterfaceImport, |fixer, site| {
                    fixer.fix_interface_import(site, &names)
                });
            } else {
                self.report(node, FaultId::UIInterfaceImport);
            }
        }
    }

    /// Names declared again by a namespace block reopening a namespace, in
    /// this file or an earlier one.
    fn check_namespace_members(&mut self) {
        let pending = std::mem::take(&mut self.state.pending_namespaces);
        if !self.enabled(FaultId::DuplicateNamespaceMember) {
            return;
        }
        let file = self.file();
        for ns in pending {
            let Some(key) = qualified_namespace_name(file, ns) else {
                continue;
            };
            for (member, name) in namespace_members(file, ns) {
                if !self.cache().declare_namespace_member(&key, name) {
                    self.report(member, FaultId::DuplicateNamespaceMember);
                }
            }
        }
    }
}

/// `Outer.Inner` for a namespace nested in another.
fn qualified_namespace_name(file: &SourceFile, ns: NodeId) -> Option<String> {
    let mut parts = vec![file.name_text(ns)?];
    for ancestor in file.ancestors(ns) {
        if file.is(ancestor, NodeKind::ModuleDeclaration) {
            parts.push(file.name_text(ancestor)?);
        }
    }
    parts.reverse();
    Some(parts.join("."))
}

/// Declarations of a namespace block with their names. Overload signatures
/// and nested namespaces are left out; both merge legally.
fn namespace_members(file: &SourceFile, ns: NodeId) -> Vec<(NodeId, &str)> {
    let Some(block) = file.fields(ns).body.filter(|b| file.is(*b, NodeKind::ModuleBlock)) else {
        return Vec::new();
    };
    let mut members = Vec::new();
    for &stmt in &file.fields(block).elements {
        match file.kind(stmt) {
            NodeKind::VariableStatement => {
                let Some(list) = file.fields(stmt).declaration else {
                    continue;
                };
                for &decl in &file.fields(list).elements {
                    if let Some(name) = file.fields(decl).name.filter(|n| file.is(*n, NodeKind::Identifier)) {
                        members.push((decl, file.text(name)));
                    }
                }
            }
            NodeKind::FunctionDeclaration if file.fields(stmt).body.is_none() => {}
            NodeKind::FunctionDeclaration
            | NodeKind::ClassDeclaration
            | NodeKind::InterfaceDeclaration
            | NodeKind::TypeAliasDeclaration
            | NodeKind::EnumDeclaration => {
                if let Some(name) = file.name_text(stmt) {
                    members.push((stmt, name));
                }
            }
            _ => {}
        }
    }
    members
}
