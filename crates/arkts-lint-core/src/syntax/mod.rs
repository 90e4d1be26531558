//! Syntax model of a type-checked source file.
//!
//! A [`SourceFile`] owns an arena of [`Node`]s. Children are kept in document
//! order and every node knows its parent, so handlers can walk both down and
//! up the tree without an explicit visit stack.

mod builder;
mod kind;

pub use builder::{NodeDraft, TreeBuilder};
pub use kind::NodeKind;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Index of a node inside its file's arena.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a file inside a program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub u32);

/// A node anywhere in the program.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeRef {
    /// File the node lives in.
    pub file: FileId,
    /// Node inside that file.
    pub node: NodeId,
}

impl NodeRef {
    /// Creates a node reference.
    #[must_use]
    pub fn new(file: FileId, node: NodeId) -> Self {
        Self { file, node }
    }
}

/// Half-open byte range `[start, end)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextRange {
    /// Start offset.
    pub start: u32,
    /// End offset (exclusive).
    pub end: u32,
}

impl TextRange {
    /// Creates a range.
    #[must_use]
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns true if `offset` falls inside the range.
    #[must_use]
    pub fn contains(self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Returns true if the two ranges overlap.
    #[must_use]
    pub fn intersects(self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Length of the range.
    #[must_use]
    pub fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Returns true for an empty range.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

/// Modifier and token flags carried by a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeFlags(pub u32);

impl NodeFlags {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// `export` modifier.
    pub const EXPORT: Self = Self(1);
    /// `default` modifier.
    pub const DEFAULT: Self = Self(1 << 1);
    /// `declare` modifier.
    pub const DECLARE: Self = Self(1 << 2);
    /// `const` modifier (const enums) or `const` declaration list.
    pub const CONST: Self = Self(1 << 3);
    /// `let` declaration list.
    pub const LET: Self = Self(1 << 4);
    /// `static` modifier.
    pub const STATIC: Self = Self(1 << 5);
    /// `readonly` modifier.
    pub const READONLY: Self = Self(1 << 6);
    /// `abstract` modifier.
    pub const ABSTRACT: Self = Self(1 << 7);
    /// `async` modifier.
    pub const ASYNC: Self = Self(1 << 8);
    /// `public` modifier.
    pub const PUBLIC: Self = Self(1 << 9);
    /// `private` modifier.
    pub const PRIVATE: Self = Self(1 << 10);
    /// `protected` modifier.
    pub const PROTECTED: Self = Self(1 << 11);
    /// `override` modifier.
    pub const OVERRIDE: Self = Self(1 << 12);
    /// Generator asterisk (`function*`).
    pub const ASTERISK: Self = Self(1 << 13);
    /// Optional marker (`?`).
    pub const QUESTION: Self = Self(1 << 14);
    /// Definite assignment marker (`!`).
    pub const EXCLAMATION: Self = Self(1 << 15);
    /// Dot-dot-dot of rest parameters and binding elements.
    pub const DOT_DOT_DOT: Self = Self(1 << 16);
    /// Node produced by the compiler, not written by the user.
    pub const SYNTHESIZED: Self = Self(1 << 17);
    /// `implements` heritage clause (`extends` otherwise).
    pub const IMPLEMENTS: Self = Self(1 << 18);
    /// Type-only import or export.
    pub const TYPE_ONLY: Self = Self(1 << 19);
    /// Module declaration written with the `namespace` keyword.
    pub const NAMESPACE: Self = Self(1 << 20);
    /// Optional chaining (`?.`).
    pub const QUESTION_DOT: Self = Self(1 << 21);

    /// Returns true if every flag in `other` is set.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if any flag in `other` is set.
    #[must_use]
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Access modifiers (`public`, `private`, `protected`, `readonly`).
    #[must_use]
    pub fn has_access_modifier(self) -> bool {
        self.intersects(Self::PUBLIC | Self::PRIVATE | Self::PROTECTED | Self::READONLY)
    }
}

impl std::ops::BitOr for NodeFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for NodeFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Operator token of unary and binary expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Operator {
    Comma,
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    StarStarEq,
    AmpEq,
    BarEq,
    CaretEq,
    LtLtEq,
    GtGtEq,
    GtGtGtEq,
    AmpAmpEq,
    BarBarEq,
    QuestionQuestionEq,
    EqEq,
    EqEqEq,
    NotEq,
    NotEqEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    StarStar,
    Amp,
    Bar,
    Caret,
    LtLt,
    GtGt,
    GtGtGt,
    AmpAmp,
    BarBar,
    QuestionQuestion,
    In,
    Instanceof,
    Tilde,
    Exclamation,
    PlusPlus,
    MinusMinus,
}

impl Operator {
    /// `=` and every compound assignment.
    #[must_use]
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            Self::Eq
                | Self::PlusEq
                | Self::MinusEq
                | Self::StarEq
                | Self::SlashEq
                | Self::PercentEq
                | Self::StarStarEq
                | Self::AmpEq
                | Self::BarEq
                | Self::CaretEq
                | Self::LtLtEq
                | Self::GtGtEq
                | Self::GtGtGtEq
                | Self::AmpAmpEq
                | Self::BarBarEq
                | Self::QuestionQuestionEq
        )
    }

    /// Bitwise binary operators and their compound assignments.
    #[must_use]
    pub fn is_bitwise(self) -> bool {
        matches!(
            self,
            Self::Amp
                | Self::Bar
                | Self::Caret
                | Self::LtLt
                | Self::GtGt
                | Self::GtGtGt
                | Self::AmpEq
                | Self::BarEq
                | Self::CaretEq
                | Self::LtLtEq
                | Self::GtGtEq
                | Self::GtGtGtEq
        )
    }

}

/// Named child roles of a node.
///
/// Which roles are populated depends on the node kind; every populated role
/// also appears in [`Node::children`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fields {
    /// Declared name, accessed property name, import local name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<NodeId>,
    /// Original name of import/export specifiers and binding elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_name: Option<NodeId>,
    /// Type annotation, asserted type, return type or aliased type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ty: Option<NodeId>,
    /// Initializer of variables, parameters, properties, enum members and loops.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initializer: Option<NodeId>,
    /// Operand, callee, accessed object, decorator or heritage expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<NodeId>,
    /// Argument of an element access.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<NodeId>,
    /// Left operand of a binary expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<NodeId>,
    /// Right operand of a binary expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<NodeId>,
    /// Loop, `if` or conditional-expression condition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<NodeId>,
    /// `for` statement incrementor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incrementor: Option<NodeId>,
    /// Body of functions, loops, namespaces; `then` branch of conditionals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<NodeId>,
    /// `else` branch of conditionals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub else_branch: Option<NodeId>,
    /// Declaration list of variable statements, catch variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration: Option<NodeId>,
    /// Import clause of an import declaration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_clause: Option<NodeId>,
    /// Named or namespace bindings of an import clause, named exports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bindings: Option<NodeId>,
    /// Module specifier string literal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_specifier: Option<NodeId>,
    /// Import attributes (`assert { ... }` / `with { ... }`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<NodeId>,
    /// Catch clause of a `try` statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handler: Option<NodeId>,
    /// `finally` block of a `try` statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalizer: Option<NodeId>,
    /// Statements, members, elements, properties, declarations, specifiers.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<NodeId>,
    /// Call and `new` arguments.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<NodeId>,
    /// Function-like parameters.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<NodeId>,
    /// Explicit type arguments.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<NodeId>,
    /// Declared type parameters.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<NodeId>,
    /// `extends` / `implements` clauses.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub heritage_clauses: Vec<NodeId>,
    /// Decorators, in source order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<NodeId>,
}

impl Fields {
    /// Every populated role with its node id, singular roles first.
    pub fn roles(&self) -> impl Iterator<Item = (&'static str, NodeId)> + '_ {
        let single = [
            ("name", self.name),
            ("property_name", self.property_name),
            ("ty", self.ty),
            ("initializer", self.initializer),
            ("expression", self.expression),
            ("index", self.index),
            ("left", self.left),
            ("right", self.right),
            ("condition", self.condition),
            ("incrementor", self.incrementor),
            ("body", self.body),
            ("else_branch", self.else_branch),
            ("declaration", self.declaration),
            ("import_clause", self.import_clause),
            ("bindings", self.bindings),
            ("module_specifier", self.module_specifier),
            ("attributes", self.attributes),
            ("handler", self.handler),
            ("finalizer", self.finalizer),
        ];
        let lists = [
            ("elements", &self.elements),
            ("arguments", &self.arguments),
            ("parameters", &self.parameters),
            ("type_arguments", &self.type_arguments),
            ("type_parameters", &self.type_parameters),
            ("heritage_clauses", &self.heritage_clauses),
            ("decorators", &self.decorators),
        ];
        single
            .into_iter()
            .filter_map(|(role, id)| id.map(|id| (role, id)))
            .chain(
                lists
                    .into_iter()
                    .flat_map(|(role, ids)| ids.iter().map(move |&id| (role, id))),
            )
    }
}

/// A syntax node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Syntactic kind.
    pub kind: NodeKind,
    /// Source range.
    #[serde(default)]
    pub range: TextRange,
    /// Parent node, `None` for the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
    /// Children in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeId>,
    /// Named child roles.
    #[serde(default)]
    pub fields: Fields,
    /// Identifier or literal text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Operator of unary/binary expressions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    /// Modifier and token flags.
    #[serde(default)]
    pub flags: NodeFlags,
}

/// A comment found in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Range of the whole comment including delimiters.
    pub range: TextRange,
    /// Comment text including delimiters.
    pub text: String,
}

/// A parsed, type-checked source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    /// File path as the host compiler names it.
    pub path: PathBuf,
    /// Original source text, when available.
    #[serde(default)]
    pub text: String,
    /// Comments in document order.
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// True for `.d.ts`/`.d.ets` declaration files.
    #[serde(default)]
    pub is_declaration_file: bool,
    /// True for files of the standard library.
    #[serde(default)]
    pub is_default_library: bool,
    /// Node arena.
    pub nodes: Vec<Node>,
    /// Root node (kind [`NodeKind::SourceFile`]).
    pub root: NodeId,
    #[serde(skip)]
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Creates a file from an already wired node arena.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, nodes: Vec<Node>, root: NodeId) -> Self {
        let mut file = Self {
            path: path.into(),
            text: String::new(),
            comments: Vec::new(),
            is_declaration_file: false,
            is_default_library: false,
            nodes,
            root,
            line_starts: Vec::new(),
        };
        file.index_lines();
        file
    }

    /// Sets the source text and recomputes line starts.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self.index_lines();
        self
    }

    /// Marks the file as a declaration file.
    #[must_use]
    pub fn declaration_file(mut self, yes: bool) -> Self {
        self.is_declaration_file = yes;
        self
    }

    /// Adds a comment.
    #[must_use]
    pub fn with_comment(mut self, range: TextRange, text: impl Into<String>) -> Self {
        self.comments.push(Comment {
            range,
            text: text.into(),
        });
        self
    }

    /// Recomputes the line table. Needed after deserialization.
    pub fn index_lines(&mut self) {
        self.line_starts = std::iter::once(0)
            .chain(
                self.text
                    .bytes()
                    .enumerate()
                    .filter(|(_, b)| *b == b'\n')
                    .filter_map(|(i, _)| u32::try_from(i + 1).ok()),
            )
            .collect();
    }

    /// File path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path with forward slashes, for OS-independent comparisons.
    #[must_use]
    pub fn normalized_path(&self) -> String {
        crate::utils::paths::normalize_path(&self.path)
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this file. Node ids come from the
    /// file itself or from the oracle, so a foreign id is a defect.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Returns the node if the id is in range.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the file has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    /// Returns true if the node has the given kind.
    #[must_use]
    pub fn is(&self, id: NodeId, kind: NodeKind) -> bool {
        self.kind(id) == kind
    }

    /// Parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Children of a node in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Named roles of a node.
    #[must_use]
    pub fn fields(&self, id: NodeId) -> &Fields {
        &self.node(id).fields
    }

    /// Flags of a node.
    #[must_use]
    pub fn flags(&self, id: NodeId) -> NodeFlags {
        self.node(id).flags
    }

    /// Returns true if the node carries every flag in `flags`.
    #[must_use]
    pub fn has_flags(&self, id: NodeId, flags: NodeFlags) -> bool {
        self.flags(id).contains(flags)
    }

    /// Identifier or literal text, empty when the node has none.
    #[must_use]
    pub fn text(&self, id: NodeId) -> &str {
        self.node(id).text.as_deref().unwrap_or("")
    }

    /// Operator of a unary or binary expression.
    #[must_use]
    pub fn operator(&self, id: NodeId) -> Option<Operator> {
        self.node(id).operator
    }

    /// Source range of a node.
    #[must_use]
    pub fn range(&self, id: NodeId) -> TextRange {
        self.node(id).range
    }

    /// Strict ancestors of a node, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Nearest ancestor of the given kind.
    #[must_use]
    pub fn ancestor_of_kind(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.ancestors(id).find(|&a| self.kind(a) == kind)
    }

    /// Returns true if `ancestor` is `id` or one of its ancestors.
    #[must_use]
    pub fn is_within(&self, id: NodeId, ancestor: NodeId) -> bool {
        id == ancestor || self.ancestors(id).any(|a| a == ancestor)
    }

    /// Top-level statements.
    #[must_use]
    pub fn statements(&self) -> &[NodeId] {
        &self.fields(self.root).elements
    }

    /// Name text of a declaration, if its name is an identifier or literal.
    #[must_use]
    pub fn name_text(&self, id: NodeId) -> Option<&str> {
        let name = self.fields(id).name?;
        self.node(name).text.as_deref()
    }

    /// Strips any number of enclosing parentheses.
    #[must_use]
    pub fn skip_parens(&self, mut id: NodeId) -> NodeId {
        while self.kind(id) == NodeKind::ParenthesizedExpression {
            match self.fields(id).expression {
                Some(inner) => id = inner,
                None => break,
            }
        }
        id
    }

    /// 1-based line and column of an offset.
    ///
    /// Files without text report line 1 and the offset as column.
    #[must_use]
    pub fn line_col(&self, offset: u32) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let start = self.line_starts.get(line).copied().unwrap_or(0);
        (line + 1, (offset - start) as usize + 1)
    }

    /// Returns true if the first statement is the `'use static'` pragma.
    #[must_use]
    pub fn has_use_static_pragma(&self) -> bool {
        let Some(&first) = self.statements().first() else {
            return false;
        };
        if self.kind(first) != NodeKind::ExpressionStatement {
            return false;
        }
        self.fields(first)
            .expression
            .is_some_and(|e| self.kind(e) == NodeKind::StringLiteral && self.text(e) == "use static")
    }

    /// Source text of a node, empty when the file has no text.
    #[must_use]
    pub fn source_text(&self, id: NodeId) -> &str {
        let range = self.range(id);
        self.text
            .get(range.start as usize..range.end as usize)
            .unwrap_or("")
    }
}
