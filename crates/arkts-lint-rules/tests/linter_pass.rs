//! Whole-pass behavior through the public API: discovery order, rule
//! guards, the auto-fix bridge and cancellation.

use arkts_lint_core::{
    Autofixer, CancellationToken, Cancelled, FaultId, FileFaults, FileId, Fix, FixSite,
    LinterOptions, NodeFlags, NodeKind, Operator, ProcessCache, Program, ProgramBuilder,
    Replacement, RuleSet, TextRange, TreeBuilder,
};
use arkts_lint_rules::{LintContext, Linter};
use std::cell::Cell;

/// `a, b; void 0; "k" in obj; <number>x;` with a `@ts-ignore` comment.
fn mixed_program() -> Program {
    let mut b = TreeBuilder::new("entry/src/main/ets/pages/Index.ets");
    let a = b.ident("a");
    let c = b.ident("b");
    let comma = b.binary(a, Operator::Comma, c);
    let comma_stmt = b.expr_stmt(comma);
    let zero = b.number("0");
    let void = b.push(NodeKind::VoidExpression, |n| {
        n.expression(zero);
    });
    let void_stmt = b.expr_stmt(void);
    let key = b.string("k");
    let obj = b.ident("obj");
    let in_expr = b.binary(key, Operator::In, obj);
    let in_stmt = b.expr_stmt(in_expr);
    let num = b.token(NodeKind::NumberKeyword);
    let x = b.ident("x");
    let cast = b.push(NodeKind::TypeAssertionExpression, |n| {
        n.ty(num).expression(x);
    });
    let cast_stmt = b.expr_stmt(cast);
    let file = b
        .finish([comma_stmt, void_stmt, in_stmt, cast_stmt])
        .with_comment(TextRange::new(0, 0), "// @ts-ignore");
    let mut p = ProgramBuilder::new();
    p.add_file(file);
    p.build()
}

/// `var x = 1;`
fn var_program() -> Program {
    let mut b = TreeBuilder::new("a.ets");
    let one = b.number("1");
    let (stmt, _) = b.variable(NodeFlags::NONE, "x", None, Some(one));
    let mut p = ProgramBuilder::new();
    p.add_file(b.finish([stmt]));
    p.build()
}

/// `class C {}`
fn class_program() -> Program {
    let mut b = TreeBuilder::new("a.ets");
    let name = b.ident("C");
    let class = b.class_decl([], Some(name), [], []);
    let mut p = ProgramBuilder::new();
    p.add_file(b.finish([class]));
    p.build()
}

fn lint(program: &Program, options: LinterOptions) -> FileFaults {
    let mut cache = ProcessCache::new();
    let ctx = LintContext::new(program, FileId(0), &mut cache)
        .unwrap()
        .options(options);
    Linter::new(ctx).run().unwrap()
}

fn summary(faults: &FileFaults) -> String {
    faults
        .faults
        .iter()
        .map(|f| format!("{} {}", f.rule.code(), f.rule.name()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Default)]
struct CountingFixer {
    calls: Cell<usize>,
}

impl Autofixer for CountingFixer {
    fn fix_var_declaration(&self, site: &FixSite<'_>) -> Option<Fix> {
        self.calls.set(self.calls.get() + 1);
        let range = site.file.range(site.node);
        Some(vec![Replacement::new(
            TextRange::new(range.start, range.start + 3),
            "let",
        )])
    }
}

#[test]
fn faults_follow_document_order_then_directives() {
    let faults = lint(&mixed_program(), LinterOptions::default());
    insta::assert_snapshot!(summary(&faults), @r"
    ARK041 arkts-no-comma-outside-loops
    ARK044 arkts-no-void-operator
    ARK046 arkts-no-in
    ARK059 arkts-as-casts
    ARK090 arkts-strict-typing-required
    ");
}

#[test]
fn repeated_runs_are_identical() {
    let program = mixed_program();
    let first = lint(&program, LinterOptions::default());
    let second = lint(&program, LinterOptions::default());
    pretty_assertions::assert_eq!(first.faults, second.faults);
    assert_eq!(first.counts, second.counts);
}

#[test]
fn disabled_rule_never_reaches_sink_or_fixer() {
    let program = var_program();
    let fixer = CountingFixer::default();
    let mut cache = ProcessCache::new();
    let ctx = LintContext::new(&program, FileId(0), &mut cache)
        .unwrap()
        .options(LinterOptions::default().autofix(true))
        .rules(RuleSet::all(false).disable(FaultId::VarDeclaration))
        .autofixer(&fixer);
    let faults = Linter::new(ctx).run().unwrap();

    assert_eq!(faults.count(FaultId::VarDeclaration), 0);
    assert_eq!(fixer.calls.get(), 0);
}

#[test]
fn enabled_rule_carries_the_fix() {
    let program = var_program();
    let fixer = CountingFixer::default();
    let mut cache = ProcessCache::new();
    let ctx = LintContext::new(&program, FileId(0), &mut cache)
        .unwrap()
        .options(LinterOptions::default().autofix(true))
        .autofixer(&fixer);
    let faults = Linter::new(ctx).run().unwrap();

    let var = faults
        .faults
        .iter()
        .find(|f| f.rule == FaultId::VarDeclaration)
        .unwrap();
    assert_eq!(fixer.calls.get(), 1);
    assert_eq!(var.fix.as_ref().map(Vec::len), Some(1));
}

#[test]
fn fixer_is_not_consulted_without_autofix() {
    let program = var_program();
    let fixer = CountingFixer::default();
    let mut cache = ProcessCache::new();
    let ctx = LintContext::new(&program, FileId(0), &mut cache)
        .unwrap()
        .autofixer(&fixer);
    let faults = Linter::new(ctx).run().unwrap();

    assert_eq!(faults.count(FaultId::VarDeclaration), 1);
    assert_eq!(fixer.calls.get(), 0);
}

#[test]
fn cancelled_token_aborts_at_first_declaration() {
    let program = class_program();
    let token = CancellationToken::new();
    token.cancel();
    let mut cache = ProcessCache::new();
    let ctx = LintContext::new(&program, FileId(0), &mut cache)
        .unwrap()
        .cancellation(token);
    assert_eq!(Linter::new(ctx).run().unwrap_err(), Cancelled);
}

#[test]
fn cancellation_is_only_polled_at_declarations() {
    let program = mixed_program();
    let token = CancellationToken::new();
    token.cancel();
    let mut cache = ProcessCache::new();
    let ctx = LintContext::new(&program, FileId(0), &mut cache)
        .unwrap()
        .cancellation(token);
    assert!(Linter::new(ctx).run().is_ok());
}

#[test]
fn unknown_file_has_no_context() {
    let program = var_program();
    let mut cache = ProcessCache::new();
    assert!(LintContext::new(&program, FileId(7), &mut cache).is_none());
}
