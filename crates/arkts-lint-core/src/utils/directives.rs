//! Comment directives that suppress type checking.
//!
//! Recognizes:
//! ```text
//! // @ts-nocheck
//! // @ts-ignore
//! /* @ts-expect-error */
//! ```
//! The strict dialect does not allow silencing the checker, so every
//! occurrence is reported.

use crate::syntax::{Comment, TextRange};

/// Kind of a suppression directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// `@ts-nocheck`
    NoCheck,
    /// `@ts-ignore`
    Ignore,
    /// `@ts-expect-error`
    ExpectError,
}

impl DirectiveKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "ts-nocheck" => Some(Self::NoCheck),
            "ts-ignore" => Some(Self::Ignore),
            "ts-expect-error" => Some(Self::ExpectError),
            _ => None,
        }
    }
}

/// A directive found in a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive {
    /// Directive kind.
    pub kind: DirectiveKind,
    /// Range of the comment carrying it.
    pub range: TextRange,
}

/// Parses a single comment.
///
/// The directive must be the first thing in the comment body, after
/// optional whitespace and leading `*`/`/` characters.
#[must_use]
pub fn parse_directive(comment: &str) -> Option<DirectiveKind> {
    let body = if let Some(rest) = comment.strip_prefix("//") {
        rest
    } else {
        comment.strip_prefix("/*")?.trim_end_matches("*/")
    };
    let body = body.trim_start_matches(|c: char| c.is_whitespace() || c == '*' || c == '/');
    let tag = body.strip_prefix('@')?;
    let end = tag
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .unwrap_or(tag.len());
    DirectiveKind::from_tag(&tag[..end])
}

/// Collects every directive among `comments`, in document order.
#[must_use]
pub fn find_directives(comments: &[Comment]) -> Vec<Directive> {
    comments
        .iter()
        .filter_map(|c| {
            parse_directive(&c.text).map(|kind| Directive {
                kind,
                range: c.range,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_line_and_block_comments() {
        assert_eq!(parse_directive("// @ts-ignore"), Some(DirectiveKind::Ignore));
        assert_eq!(parse_directive("//@ts-nocheck"), Some(DirectiveKind::NoCheck));
        assert_eq!(
            parse_directive("/* @ts-expect-error: legacy */"),
            Some(DirectiveKind::ExpectError)
        );
        assert_eq!(
            parse_directive("/**\n * @ts-ignore\n */"),
            Some(DirectiveKind::Ignore)
        );
    }

    #[test]
    fn ignores_other_comments() {
        assert_eq!(parse_directive("// see @ts-ignore"), None);
        assert_eq!(parse_directive("// @ts-ignored"), None);
        assert_eq!(parse_directive("// plain"), None);
    }

    #[test]
    fn finds_in_order() {
        let comments = vec![
            Comment {
                range: TextRange::new(0, 14),
                text: "// @ts-nocheck".into(),
            },
            Comment {
                range: TextRange::new(20, 26),
                text: "// foo".into(),
            },
            Comment {
                range: TextRange::new(30, 43),
                text: "// @ts-ignore".into(),
            },
        ];
        let found = find_directives(&comments);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].kind, DirectiveKind::NoCheck);
        assert_eq!(found[1].range, TextRange::new(30, 43));
    }
}
