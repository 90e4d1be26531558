//! Depth-first, document-order tree traversal.
//!
//! `should_stop` runs before `on_visit`: a stopped node is neither visited
//! nor descended into. `on_visit` may fail, which aborts the whole walk and
//! hands the error back to the caller; cancellation travels this way.

use crate::syntax::{NodeId, SourceFile};
use std::convert::Infallible;

/// Walks the subtree rooted at `root` in pre-order.
///
/// # Errors
///
/// Returns the first error produced by `on_visit`.
pub fn try_walk<E>(
    file: &SourceFile,
    root: NodeId,
    mut on_visit: impl FnMut(NodeId) -> Result<(), E>,
    should_stop: impl Fn(NodeId) -> bool,
) -> Result<(), E> {
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if should_stop(id) {
            continue;
        }
        on_visit(id)?;
        stack.extend(file.children(id).iter().rev());
    }
    Ok(())
}

/// Infallible [`try_walk`].
pub fn walk(
    file: &SourceFile,
    root: NodeId,
    mut on_visit: impl FnMut(NodeId),
    should_stop: impl Fn(NodeId) -> bool,
) {
    let result: Result<(), Infallible> = try_walk(
        file,
        root,
        |id| {
            on_visit(id);
            Ok(())
        },
        should_stop,
    );
    if let Err(never) = result {
        match never {}
    }
}

/// Returns true if any node of the subtree satisfies `pred`.
pub fn any_descendant(
    file: &SourceFile,
    root: NodeId,
    pred: impl Fn(NodeId) -> bool,
    should_stop: impl Fn(NodeId) -> bool,
) -> bool {
    try_walk(file, root, |id| if pred(id) { Err(()) } else { Ok(()) }, should_stop).is_err()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{NodeKind, Operator, TreeBuilder};

    fn sample() -> (SourceFile, NodeId) {
        let mut b = TreeBuilder::new("a.ets");
        let a = b.ident("a");
        let one = b.number("1");
        let sum = b.binary(a, Operator::Plus, one);
        let paren = b.paren(sum);
        let stmt = b.expr_stmt(paren);
        let file = b.finish([stmt]);
        (file, paren)
    }

    #[test]
    fn visits_in_document_order() {
        let (file, _) = sample();
        let mut kinds = Vec::new();
        walk(&file, file.root, |id| kinds.push(file.kind(id)), |_| false);
        assert_eq!(
            kinds,
            vec![
                NodeKind::SourceFile,
                NodeKind::ExpressionStatement,
                NodeKind::ParenthesizedExpression,
                NodeKind::BinaryExpression,
                NodeKind::Identifier,
                NodeKind::NumericLiteral,
            ]
        );
    }

    #[test]
    fn stopped_nodes_are_not_visited() {
        let (file, paren) = sample();
        let mut count = 0;
        walk(&file, file.root, |_| count += 1, |id| id == paren);
        assert_eq!(count, 2);
    }

    #[test]
    fn errors_abort_the_walk() {
        let (file, paren) = sample();
        let mut seen = 0;
        let result = try_walk(
            &file,
            file.root,
            |id| {
                seen += 1;
                if id == paren {
                    Err("stop")
                } else {
                    Ok(())
                }
            },
            |_| false,
        );
        assert_eq!(result, Err("stop"));
        assert_eq!(seen, 3);
    }

    #[test]
    fn any_descendant_finds_literals() {
        let (file, _) = sample();
        assert!(any_descendant(&file, file.root, |id| file.kind(id) == NodeKind::NumericLiteral, |_| false));
        assert!(!any_descendant(&file, file.root, |id| file.kind(id) == NodeKind::StringLiteral, |_| false));
    }
}
