//! Heuristic check that array element accesses are bounds-guarded.
//!
//! An access `arr[i]` (or `arr[2]`) inside a loop or `if` body is accepted
//! when one of the enclosing conditions compares the index against
//! `arr.length`:
//!
//! ```text
//! for (let i = 0; i < arr.length; i++) { arr[i] }   // guarded
//! if (arr.length > 2) { arr[2] }                    // guarded
//! for (let i = 0;; i++) { arr[i] }                  // flagged
//! ```
//!
//! The guard is void if the index variable is assigned again anywhere after
//! the condition, apart from the guarding `for` statement's own incrementor.
//! An `else` branch and a `do` body are checked regions whose condition
//! guards nothing: the first runs when the test failed, the second before
//! the test runs. Accesses outside any such region are not checked. The
//! check errs on the side of flagging.

use crate::analysis::const_eval::parse_numeric_literal;
use crate::linter::Linter;
use crate::semantics::{is_array, is_or_derived_from};
use arkts_lint_core::walker::any_descendant;
use arkts_lint_core::{FaultId, NodeId, NodeKind, Operator, SourceFile, SymbolId};

/// What the access indexes with.
#[derive(Debug, Clone, Copy)]
enum Index {
    Literal(f64),
    Variable(SymbolId),
}

/// Reports [`FaultId::RuntimeArrayCheck`] at an unguarded element access.
pub(crate) fn check_element_access(cx: &mut Linter<'_>, access: NodeId) {
    if !cx.enabled(FaultId::RuntimeArrayCheck) {
        return;
    }
    if is_unguarded(cx, access) {
        cx.report(access, FaultId::RuntimeArrayCheck);
    }
}

fn is_unguarded(cx: &Linter<'_>, access: NodeId) -> bool {
    let o = cx.oracle();
    let file = cx.file();
    let fields = file.fields(access);
    let (Some(base), Some(index)) = (fields.expression, fields.index) else {
        return false;
    };
    let base = file.skip_parens(base);
    if !file.is(base, NodeKind::Identifier) {
        return false;
    }
    let Some(array) = cx.true_symbol_at(base) else {
        return false;
    };
    let is_array_typed = cx.type_at(base).is_some_and(|t| {
        let t = o.non_nullable(t);
        is_or_derived_from(o, t, &|b| is_array(o, b))
    });
    if !is_array_typed {
        return false;
    }
    let index = file.skip_parens(index);
    let index = match file.kind(index) {
        NodeKind::NumericLiteral => match parse_numeric_literal(file.text(index)) {
            Some(v) => Index::Literal(v),
            None => return false,
        },
        NodeKind::Identifier => match cx.true_symbol_at(index) {
            Some(s) => Index::Variable(s),
            None => return false,
        },
        _ => return false,
    };
    let regions = enclosing_regions(file, access);
    if regions.is_empty() {
        return false;
    }
    !regions
        .iter()
        .any(|r| r.guarded && guard_covers(cx, r.statement, array, index))
}

/// A loop or `if` branch containing the access.
#[derive(Debug, Clone, Copy)]
struct Region {
    statement: NodeId,
    /// The statement's condition holds whenever the region runs.
    guarded: bool,
}

/// Loop bodies and `if` branches containing `node`, nearest first, up to
/// the enclosing function.
fn enclosing_regions(file: &SourceFile, node: NodeId) -> Vec<Region> {
    let mut regions = Vec::new();
    let mut child = node;
    for ancestor in file.ancestors(node) {
        let kind = file.kind(ancestor);
        if kind.is_function_like() {
            break;
        }
        let fields = file.fields(ancestor);
        let guarded = match kind {
            NodeKind::ForStatement | NodeKind::WhileStatement | NodeKind::IfStatement
                if fields.body == Some(child) =>
            {
                Some(true)
            }
            NodeKind::DoStatement if fields.body == Some(child) => Some(false),
            NodeKind::IfStatement if fields.else_branch == Some(child) => Some(false),
            _ => None,
        };
        if let Some(guarded) = guarded {
            regions.push(Region {
                statement: ancestor,
                guarded,
            });
        }
        child = ancestor;
    }
    regions
}

fn guard_covers(cx: &Linter<'_>, guard: NodeId, array: SymbolId, index: Index) -> bool {
    let file = cx.file();
    let Some(cond) = file.fields(guard).condition else {
        return false;
    };
    let cond_end = file.range(cond).end;
    any_descendant(
        file,
        cond,
        |n| {
            length_comparison(cx, n, array).is_some_and(|bound| match (index, bound) {
                (Index::Variable(var), Bound::Variable(b)) => {
                    var == b && !reassigned_after(cx, var, cond_end, guard)
                }
                (Index::Literal(i), Bound::Literal(b)) => i >= 0.0 && i.fract() == 0.0 && i <= b,
                _ => false,
            })
        },
        |n| file.kind(n).is_function_like(),
    )
}

/// Largest index a comparison with `arr.length` admits.
#[derive(Debug, Clone, Copy)]
enum Bound {
    /// `i < arr.length`: every index below the variable's value.
    Variable(SymbolId),
    /// `arr.length > n`: indices `0..=n`.
    Literal(f64),
}

/// `x < arr.length` or `arr.length > x`.
fn length_comparison(cx: &Linter<'_>, node: NodeId, array: SymbolId) -> Option<Bound> {
    let file = cx.file();
    if !file.is(node, NodeKind::BinaryExpression) {
        return None;
    }
    let fields = file.fields(node);
    let left = file.skip_parens(fields.left?);
    let right = file.skip_parens(fields.right?);
    let bound = match file.operator(node)? {
        Operator::Lt if is_length_of(cx, right, array) => left,
        Operator::Gt if is_length_of(cx, left, array) => right,
        _ => return None,
    };
    match file.kind(bound) {
        NodeKind::Identifier => cx.true_symbol_at(bound).map(Bound::Variable),
        NodeKind::NumericLiteral => parse_numeric_literal(file.text(bound)).map(Bound::Literal),
        _ => None,
    }
}

fn is_length_of(cx: &Linter<'_>, node: NodeId, array: SymbolId) -> bool {
    let file = cx.file();
    if !file.is(node, NodeKind::PropertyAccessExpression) || file.name_text(node) != Some("length") {
        return false;
    }
    file.fields(node)
        .expression
        .map(|base| file.skip_parens(base))
        .filter(|base| file.is(*base, NodeKind::Identifier))
        .and_then(|base| cx.true_symbol_at(base))
        == Some(array)
}

/// An assignment to `var` starting at or after `offset`, other than the
/// incrementor of `guard`.
fn reassigned_after(cx: &Linter<'_>, var: SymbolId, offset: u32, guard: NodeId) -> bool {
    let file = cx.file();
    let incrementor = file
        .is(guard, NodeKind::ForStatement)
        .then(|| file.fields(guard).incrementor)
        .flatten();
    any_descendant(
        file,
        file.root,
        |n| {
            if file.range(n).start < offset {
                return false;
            }
            if incrementor.is_some_and(|inc| file.is_within(n, inc)) {
                return false;
            }
            assigned_variable(file, n).is_some_and(|target| cx.true_symbol_at(target) == Some(var))
        },
        |_| false,
    )
}

/// Identifier written by an assignment or increment expression.
fn assigned_variable(file: &SourceFile, node: NodeId) -> Option<NodeId> {
    let op = file.operator(node)?;
    let fields = file.fields(node);
    let target = match file.kind(node) {
        NodeKind::BinaryExpression if op.is_assignment() => fields.left?,
        NodeKind::PrefixUnaryExpression | NodeKind::PostfixUnaryExpression
            if matches!(op, Operator::PlusPlus | Operator::MinusMinus) =>
        {
            fields.expression?
        }
        _ => return None,
    };
    let target = file.skip_parens(target);
    file.is(target, NodeKind::Identifier).then_some(target)
}
