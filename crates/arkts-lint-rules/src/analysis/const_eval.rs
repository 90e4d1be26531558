//! Numeric constant folding.
//!
//! Folds literals, parentheses, unary sign, `as number`, the arithmetic
//! operators, `const` variables, enum members and the `Number` constants.
//! Anything else (calls, unresolved names, non-numeric operators) is unknown.
//! Values follow IEEE double semantics, so `1 / 0` folds to infinity and
//! `0 / 0` to NaN; callers decide what counts as invalid.

use crate::linter::Linter;
use crate::semantics::{first_declaration, is_std_library_symbol, resolve};
use arkts_lint_core::{NodeFlags, NodeKind, NodeRef, Operator, SymbolFlags, SymbolId};

const MAX_DEPTH: usize = 64;

/// Folds `expr` to a number, or `None` when it is not a compile-time number.
pub(crate) fn eval_number(cx: &mut Linter<'_>, expr: NodeRef) -> Option<f64> {
    fold(cx, expr, 0)
}

fn fold(cx: &mut Linter<'_>, r: NodeRef, depth: usize) -> Option<f64> {
    if depth > MAX_DEPTH {
        return None;
    }
    let o = cx.oracle();
    let file = o.file(r.file)?;
    let node = r.node;
    let at = |n| NodeRef::new(r.file, n);
    let fields = file.fields(node);
    match file.kind(node) {
        NodeKind::NumericLiteral => parse_numeric_literal(file.text(node)),
        NodeKind::ParenthesizedExpression => fold(cx, at(fields.expression?), depth + 1),
        NodeKind::AsExpression => {
            if !fields.ty.is_some_and(|t| file.is(t, NodeKind::NumberKeyword)) {
                return None;
            }
            fold(cx, at(fields.expression?), depth + 1)
        }
        NodeKind::PrefixUnaryExpression => {
            let op = file.operator(node)?;
            let value = fold(cx, at(fields.expression?), depth + 1)?;
            match op {
                Operator::Minus => Some(-value),
                Operator::Plus => Some(value),
                _ => None,
            }
        }
        NodeKind::BinaryExpression => {
            let op = file.operator(node)?;
            let (left, right) = (fields.left?, fields.right?);
            let lhs = fold(cx, at(left), depth + 1)?;
            let rhs = fold(cx, at(right), depth + 1)?;
            apply(op, lhs, rhs)
        }
        NodeKind::Identifier => {
            let Some(sym) = o.true_symbol_at(r) else {
                return global_constant(file.text(node));
            };
            if is_std_library_symbol(o, sym) {
                return global_constant(file.text(node));
            }
            fold_symbol(cx, sym, depth)
        }
        NodeKind::PropertyAccessExpression => {
            if let Some(value) = o.constant_value(r).and_then(|c| c.as_number()) {
                return Some(value);
            }
            let base = file.skip_parens(fields.expression?);
            let name = file.name_text(node)?;
            if file.is(base, NodeKind::Identifier) && file.text(base) == "Number" {
                let std_number = o
                    .true_symbol_at(at(base))
                    .map_or(true, |s| is_std_library_symbol(o, s));
                if std_number {
                    return number_constant(name);
                }
            }
            let sym = o.true_symbol_at(r)?;
            if !o.symbol_flags(sym).contains(SymbolFlags::ENUM_MEMBER) {
                return None;
            }
            fold_symbol(cx, sym, depth)
        }
        _ => None,
    }
}

/// Value of a `const` variable or enum member, memoized per file pass.
fn fold_symbol(cx: &mut Linter<'_>, sym: SymbolId, depth: usize) -> Option<f64> {
    if let Some(cached) = cx.state.const_cache.get(&sym) {
        return *cached;
    }
    // Seeded with `None` so a self-referencing initializer folds to unknown.
    cx.state.const_cache.insert(sym, None);
    let value = fold_declaration(cx, sym, depth);
    cx.state.const_cache.insert(sym, value);
    value
}

fn fold_declaration(cx: &mut Linter<'_>, sym: SymbolId, depth: usize) -> Option<f64> {
    let o = cx.oracle();
    let decl = first_declaration(o, sym)?;
    let (file, node) = resolve(o, decl)?;
    let init = file.fields(node).initializer;
    match file.kind(node) {
        NodeKind::VariableDeclaration => {
            let list = file.parent(node)?;
            if !file.has_flags(list, NodeFlags::CONST) {
                return None;
            }
            fold(cx, NodeRef::new(decl.file, init?), depth + 1)
        }
        NodeKind::EnumMember => {
            if let Some(value) = o.constant_value(decl).and_then(|c| c.as_number()) {
                return Some(value);
            }
            fold(cx, NodeRef::new(decl.file, init?), depth + 1)
        }
        _ => None,
    }
}

fn apply(op: Operator, lhs: f64, rhs: f64) -> Option<f64> {
    let value = match op {
        Operator::Plus => lhs + rhs,
        Operator::Minus => lhs - rhs,
        Operator::Star => lhs * rhs,
        Operator::Slash => lhs / rhs,
        Operator::Percent => lhs % rhs,
        Operator::StarStar => pow(lhs, rhs),
        _ => return None,
    };
    Some(value)
}

/// Exponentiation with the script semantics for NaN and unit bases.
fn pow(base: f64, exp: f64) -> f64 {
    if exp.is_nan() || (base.abs() == 1.0 && exp.is_infinite()) {
        return f64::NAN;
    }
    base.powf(exp)
}

fn global_constant(name: &str) -> Option<f64> {
    match name {
        "NaN" => Some(f64::NAN),
        "Infinity" => Some(f64::INFINITY),
        _ => None,
    }
}

fn number_constant(name: &str) -> Option<f64> {
    let value = match name {
        "MAX_SAFE_INTEGER" => 9_007_199_254_740_991.0,
        "MIN_SAFE_INTEGER" => -9_007_199_254_740_991.0,
        "MAX_VALUE" => f64::MAX,
        "MIN_VALUE" => f64::from_bits(1),
        "EPSILON" => f64::EPSILON,
        "NaN" => f64::NAN,
        "POSITIVE_INFINITY" => f64::INFINITY,
        "NEGATIVE_INFINITY" => f64::NEG_INFINITY,
        _ => return None,
    };
    Some(value)
}

/// Parses decimal, hex, octal and binary literals with `_` separators.
pub(crate) fn parse_numeric_literal(text: &str) -> Option<f64> {
    let clean: String = text.chars().filter(|c| *c != '_').collect();
    let radix = match clean.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => return clean.parse().ok(),
    };
    let digits = clean.get(2..).filter(|d| !d.is_empty())?;
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::with_linter;
    use arkts_lint_core::{NodeId, Program, ProgramBuilder, TreeBuilder};

    fn eval_in(program: &Program, node: NodeId) -> Option<f64> {
        with_linter(program, |cx| {
            let r = cx.at(node);
            eval_number(cx, r)
        })
    }

    fn single_expression(build: impl FnOnce(&mut TreeBuilder) -> NodeId) -> (Program, NodeId) {
        let mut b = TreeBuilder::new("a.ets");
        let expr = build(&mut b);
        let stmt = b.expr_stmt(expr);
        let mut p = ProgramBuilder::new();
        p.add_file(b.finish([stmt]));
        (p.build(), expr)
    }

    #[test]
    fn test_literal_forms() {
        assert_eq!(parse_numeric_literal("1_000"), Some(1000.0));
        assert_eq!(parse_numeric_literal("0x1F"), Some(31.0));
        assert_eq!(parse_numeric_literal("0b101"), Some(5.0));
        assert_eq!(parse_numeric_literal("0o17"), Some(15.0));
        assert_eq!(parse_numeric_literal("1.5e2"), Some(150.0));
        assert_eq!(parse_numeric_literal("0x"), None);
    }

    #[test]
    fn test_arithmetic_matches_direct_evaluation() {
        // -(7 + 5) % 3 ** 2 / 4
        let (program, expr) = single_expression(|b| {
            let seven = b.number("7");
            let five = b.number("5");
            let sum = b.binary(seven, Operator::Plus, five);
            let paren = b.paren(sum);
            let neg = b.prefix(Operator::Minus, paren);
            let three = b.number("3");
            let two = b.number("2");
            let pow = b.binary(three, Operator::StarStar, two);
            let rem = b.binary(neg, Operator::Percent, pow);
            let four = b.number("4");
            b.binary(rem, Operator::Slash, four)
        });
        let expected = -(7.0_f64 + 5.0) % 3.0_f64.powf(2.0) / 4.0;
        assert_eq!(eval_in(&program, expr), Some(expected));
    }

    #[test]
    fn test_division_by_zero_is_infinite() {
        let (program, expr) = single_expression(|b| {
            let one = b.number("1");
            let zero = b.number("0");
            b.binary(one, Operator::Slash, zero)
        });
        assert_eq!(eval_in(&program, expr), Some(f64::INFINITY));
    }

    #[test]
    fn test_calls_and_unknown_names_do_not_fold() {
        let (program, call) = single_expression(|b| {
            let f = b.ident("f");
            b.call(f, [])
        });
        assert_eq!(eval_in(&program, call), None);

        let (program, name) = single_expression(|b| b.ident("unknownName"));
        assert_eq!(eval_in(&program, name), None);
    }

    #[test]
    fn test_const_chain_and_number_constants() {
        let mut b = TreeBuilder::new("a.ets");
        let two = b.number("2");
        let (a_stmt, a_decl) = b.variable(NodeFlags::CONST, "a", None, Some(two));
        let a_use = b.ident("a");
        let three = b.number("3");
        let product = b.binary(a_use, Operator::Star, three);
        let (b_stmt, b_decl) = b.variable(NodeFlags::CONST, "b", None, Some(product));
        let b_use = b.ident("b");
        let number = b.ident("Number");
        let max = b.prop_access(number, "MAX_SAFE_INTEGER");
        let sum = b.binary(b_use, Operator::Plus, max);
        let stmt = b.expr_stmt(sum);
        let mut p = ProgramBuilder::new();
        let f = p.add_file(b.finish([a_stmt, b_stmt, stmt]));
        let a_sym = p.symbol("a", SymbolFlags::BLOCK_SCOPED_VARIABLE);
        p.declare(a_sym, NodeRef::new(f, a_decl));
        p.bind(NodeRef::new(f, a_use), a_sym);
        let b_sym = p.symbol("b", SymbolFlags::BLOCK_SCOPED_VARIABLE);
        p.declare(b_sym, NodeRef::new(f, b_decl));
        p.bind(NodeRef::new(f, b_use), b_sym);
        let program = p.build();

        assert_eq!(eval_in(&program, b_use), Some(6.0));
        assert_eq!(eval_in(&program, sum), Some(6.0 + 9_007_199_254_740_991.0));
    }

    #[test]
    fn test_let_variables_are_unknown() {
        let mut b = TreeBuilder::new("a.ets");
        let one = b.number("1");
        let (stmt, decl) = b.variable(NodeFlags::LET, "x", None, Some(one));
        let x = b.ident("x");
        let use_stmt = b.expr_stmt(x);
        let mut p = ProgramBuilder::new();
        let f = p.add_file(b.finish([stmt, use_stmt]));
        let sym = p.symbol("x", SymbolFlags::BLOCK_SCOPED_VARIABLE);
        p.declare(sym, NodeRef::new(f, decl));
        p.bind(NodeRef::new(f, x), sym);
        let program = p.build();
        assert_eq!(eval_in(&program, x), None);
    }
}
