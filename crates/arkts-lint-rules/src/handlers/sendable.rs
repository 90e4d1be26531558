//! The `@Sendable` decorator itself.

use crate::linter::Linter;
use crate::semantics::{decorator_name, sendable_decorator};
use arkts_lint_core::whitelist::builtins::SENDABLE_DECORATOR;
use arkts_lint_core::{FaultId, NodeId, NodeKind};

/// `@Sendable` applies to classes, functions and type aliases only.
pub(crate) fn decorator(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    if decorator_name(file, node) != Some(SENDABLE_DECORATOR) {
        return;
    }
    let allowed = file.parent(node).is_some_and(|p| {
        matches!(
            file.kind(p),
            NodeKind::ClassDeclaration | NodeKind::FunctionDeclaration | NodeKind::TypeAliasDeclaration
        )
    });
    if !allowed {
        cx.report(node, FaultId::SendableDecoratorLimited);
    }
}

/// Sendable functions and type aliases need an SDK that supports them;
/// on an older one the decorator is reported and further checks skipped.
pub(crate) fn is_sendable_decorator_valid(cx: &mut Linter<'_>, decl: NodeId) -> bool {
    if !cx.options().sdk_predates_sendable_functions() {
        return true;
    }
    if let Some(decorator) = sendable_decorator(cx.file(), decl) {
        cx.report(decorator, FaultId::SendableBetaCompatible);
    }
    false
}

#[cfg(test)]
mod tests {
    use crate::test_support::{run_default, run_with};
    use arkts_lint_core::{FaultId, LinterOptions, NodeKind, ProgramBuilder, TreeBuilder};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sendable_on_method_is_limited() {
        let mut b = TreeBuilder::new("a.ets");
        let deco = b.decorator_named("Sendable");
        let m = b.ident("m");
        let void = b.token(NodeKind::VoidKeyword);
        let body = b.block([]);
        let method = b.push(NodeKind::MethodDeclaration, |n| {
            n.decorators([deco]).name(m).ty(void).body(body);
        });
        let name = b.ident("C");
        let class = b.class_decl([], Some(name), [], [method]);
        let file = b.finish([class]);
        let deco_range = file.range(deco);
        let mut p = ProgramBuilder::new();
        p.add_file(file);
        let faults = run_default(&p.build());
        let limited: Vec<_> = faults
            .faults
            .iter()
            .filter(|f| f.rule == FaultId::SendableDecoratorLimited)
            .map(|f| f.range)
            .collect();
        assert_eq!(limited, vec![deco_range]);
    }

    #[test]
    fn test_sendable_function_on_old_sdk() {
        let build = || {
            let mut b = TreeBuilder::new("a.ets");
            let deco = b.decorator_named("Sendable");
            let name = b.ident("f");
            let void = b.token(NodeKind::VoidKeyword);
            let body = b.block([]);
            let f = b.function_decl([deco], Some(name), [], Some(void), Some(body));
            let mut p = ProgramBuilder::new();
            p.add_file(b.finish([f]));
            p.build()
        };
        let beta = LinterOptions {
            compatible_sdk_version: 12,
            compatible_sdk_version_stage: "beta2".to_string(),
            ..LinterOptions::default()
        };
        assert_eq!(
            run_with(&build(), beta).count(FaultId::SendableBetaCompatible),
            1
        );
        let release = LinterOptions {
            compatible_sdk_version: 12,
            compatible_sdk_version_stage: "beta3".to_string(),
            ..LinterOptions::default()
        };
        assert_eq!(
            run_with(&build(), release).count(FaultId::SendableBetaCompatible),
            0
        );
    }
}
