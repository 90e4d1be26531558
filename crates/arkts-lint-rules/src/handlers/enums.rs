//! Enum declarations and members.

use crate::analysis::const_eval::eval_number;
use crate::analysis::duplicates::{count_declarations_with_duplicate_name, report_merging};
use crate::analysis::sdk::check_duplicate_global;
use crate::linter::Linter;
use arkts_lint_core::{ConstValue, FaultId, NodeId, NodeKind};

pub(crate) fn enum_declaration(cx: &mut Linter<'_>, node: NodeId) {
    if let Some(name) = cx.file().fields(node).name {
        count_declarations_with_duplicate_name(cx, name, node, None);
        check_duplicate_global(cx, name);
    }
    report_merging(cx, node, FaultId::EnumMerging);
}

/// Members are initialized with integer or string constants, and all
/// members of an enum hold the same kind of value.
pub(crate) fn enum_member(cx: &mut Linter<'_>, node: NodeId) {
    let file = cx.file();
    if let Some(init) = file.fields(node).initializer {
        if !is_valid_initializer(cx, init) {
            cx.report(node, FaultId::EnumMemberNonConstInit);
            return;
        }
    }
    let Some(first) = file
        .parent(node)
        .and_then(|e| file.fields(e).elements.first().copied())
    else {
        return;
    };
    if first == node {
        return;
    }
    let o = cx.oracle();
    let same_kind = matches!(
        (o.constant_value(cx.at(node)), o.constant_value(cx.at(first))),
        (Some(ConstValue::Number(_)), Some(ConstValue::Number(_)))
            | (Some(ConstValue::String(_)), Some(ConstValue::String(_)))
    );
    if !same_kind && cx.type_at(node) != cx.type_at(first) {
        cx.report(node, FaultId::EnumMemberNonConstInit);
    }
}

fn is_valid_initializer(cx: &mut Linter<'_>, init: NodeId) -> bool {
    let file = cx.file();
    let init = file.skip_parens(init);
    if matches!(
        file.kind(init),
        NodeKind::StringLiteral | NodeKind::NoSubstitutionTemplateLiteral
    ) {
        return true;
    }
    let at = cx.at(init);
    if let Some(value) = eval_number(cx, at) {
        return value.is_finite() && value.fract() == 0.0;
    }
    matches!(
        cx.oracle().constant_value(at),
        Some(ConstValue::String(_))
    )
}

#[cfg(test)]
mod tests {
    use crate::test_support::run_default;
    use arkts_lint_core::{FaultId, NodeRef, ProgramBuilder, SymbolFlags, TextRange, TreeBuilder};
    use pretty_assertions::assert_eq;

    fn enum_with(init: &str) -> usize {
        let mut b = TreeBuilder::new("a.ets");
        let name = b.ident("A");
        let value = b.number(init);
        let member = b.enum_member(name, Some(value));
        let enum_name = b.ident("E");
        let decl = b.enum_decl(enum_name, [member]);
        let mut p = ProgramBuilder::new();
        p.add_file(b.finish([decl]));
        run_default(&p.build()).count(FaultId::EnumMemberNonConstInit)
    }

    #[test]
    fn test_float_initializer_is_reported() {
        assert_eq!(enum_with("1.5"), 1);
        assert_eq!(enum_with("1"), 0);
    }

    #[test]
    fn test_call_initializer_is_reported() {
        let mut b = TreeBuilder::new("a.ets");
        let name = b.ident("A");
        let callee = b.ident("compute");
        let call = b.call(callee, []);
        let member = b.enum_member(name, Some(call));
        let enum_name = b.ident("E");
        let decl = b.enum_decl(enum_name, [member]);
        let mut p = ProgramBuilder::new();
        p.add_file(b.finish([decl]));
        assert_eq!(run_default(&p.build()).count(FaultId::EnumMemberNonConstInit), 1);
    }

    #[test]
    fn test_duplicate_enum_reported_at_second_declaration() {
        let mut b = TreeBuilder::new("a.ets");
        let mut decls = Vec::new();
        for member in ["Red", "Green"] {
            let m = b.ident(member);
            let m = b.enum_member(m, None);
            let name = b.ident("Color");
            decls.push(b.enum_decl(name, [m]));
        }
        let file = b.finish(decls.clone());
        let second = file.range(decls[1]);
        let mut p = ProgramBuilder::new();
        let f = p.add_file(file);
        let color = p.symbol("Color", SymbolFlags::REGULAR_ENUM);
        for d in &decls {
            p.declare(color, NodeRef::new(f, *d));
            p.bind(NodeRef::new(f, *d), color);
        }
        let faults = run_default(&p.build());
        let merging: Vec<TextRange> = faults
            .faults
            .iter()
            .filter(|f| f.rule == FaultId::EnumMerging)
            .map(|f| f.range)
            .collect();
        assert_eq!(merging, vec![second]);
        assert_eq!(faults.count(FaultId::DeclWithDuplicateName), 0);
    }
}
