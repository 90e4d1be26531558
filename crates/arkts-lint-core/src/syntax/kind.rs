//! Syntactic node kinds.

use serde::{Deserialize, Serialize};

macro_rules! node_kinds {
    ($( $(#[$doc:meta])* $variant:ident, )*) => {
        /// Kind of a syntax node.
        ///
        /// Mirrors the host compiler's syntax kinds closely enough that a typed
        /// program can be exported one-to-one. Kinds the linter never distinguishes
        /// collapse into [`NodeKind::Other`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[allow(missing_docs)]
        pub enum NodeKind {
            $( $(#[$doc])* $variant, )*
        }

        impl NodeKind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [NodeKind] = &[$(Self::$variant,)*];
        }
    };
}

node_kinds! {
    // Top level
    SourceFile,

    // Names and literals
    Identifier,
    PrivateIdentifier,
    QualifiedName,
    ComputedPropertyName,
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    NoSubstitutionTemplateLiteral,
    TemplateExpression,
    TrueKeyword,
    FalseKeyword,
    NullKeyword,
    ThisKeyword,
    SuperKeyword,
    /// Callee of a dynamic `import(..)`.
    ImportKeyword,

    // Type keywords
    AnyKeyword,
    UnknownKeyword,
    NumberKeyword,
    BigIntKeyword,
    StringKeyword,
    BooleanKeyword,
    SymbolKeyword,
    VoidKeyword,
    UndefinedKeyword,
    NeverKeyword,
    ObjectKeyword,

    // Type nodes
    TypeReference,
    ArrayType,
    TupleType,
    UnionType,
    IntersectionType,
    TypeLiteral,
    FunctionType,
    ConstructorType,
    TypeQuery,
    IndexedAccessType,
    ConditionalType,
    MappedType,
    ThisType,
    TypePredicate,
    TypeOperator,
    LiteralType,
    ImportType,
    ParenthesizedType,
    ExpressionWithTypeArguments,
    TypeParameter,

    // Declarations
    VariableStatement,
    VariableDeclarationList,
    VariableDeclaration,
    FunctionDeclaration,
    ClassDeclaration,
    ClassExpression,
    InterfaceDeclaration,
    TypeAliasDeclaration,
    EnumDeclaration,
    EnumMember,
    ModuleDeclaration,
    ModuleBlock,
    ImportDeclaration,
    ImportClause,
    NamespaceImport,
    NamedImports,
    ImportSpecifier,
    ImportEqualsDeclaration,
    ImportAttributes,
    ExportDeclaration,
    ExportAssignment,
    NamedExports,
    NamespaceExport,
    ExportSpecifier,
    NamespaceExportDeclaration,
    Parameter,
    Decorator,
    HeritageClause,
    PropertyDeclaration,
    MethodDeclaration,
    Constructor,
    GetAccessor,
    SetAccessor,
    ClassStaticBlockDeclaration,
    IndexSignature,
    PropertySignature,
    MethodSignature,
    CallSignature,
    ConstructSignature,
    ObjectBindingPattern,
    ArrayBindingPattern,
    BindingElement,
    CatchClause,

    // Statements
    Block,
    EmptyStatement,
    ExpressionStatement,
    IfStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    WhileStatement,
    DoStatement,
    ReturnStatement,
    ThrowStatement,
    TryStatement,
    WithStatement,
    LabeledStatement,
    SwitchStatement,
    BreakStatement,
    ContinueStatement,

    // Expressions
    ObjectLiteralExpression,
    ArrayLiteralExpression,
    PropertyAssignment,
    ShorthandPropertyAssignment,
    SpreadAssignment,
    SpreadElement,
    PropertyAccessExpression,
    ElementAccessExpression,
    CallExpression,
    NewExpression,
    FunctionExpression,
    ArrowFunction,
    ParenthesizedExpression,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    BinaryExpression,
    ConditionalExpression,
    TypeAssertionExpression,
    AsExpression,
    NonNullExpression,
    DeleteExpression,
    TypeOfExpression,
    VoidExpression,
    AwaitExpression,
    YieldExpression,
    MetaProperty,
    TaggedTemplateExpression,
    OmittedExpression,
    JsxElement,
    JsxSelfClosingElement,

    /// Anything the linter has no interest in beyond its children.
    Other,
}

impl NodeKind {
    /// Keyword and literal tokens: leaves that never need descending into.
    #[must_use]
    pub fn is_terminal_token(self) -> bool {
        matches!(
            self,
            Self::NumericLiteral
                | Self::BigIntLiteral
                | Self::StringLiteral
                | Self::RegularExpressionLiteral
                | Self::NoSubstitutionTemplateLiteral
                | Self::TrueKeyword
                | Self::FalseKeyword
                | Self::NullKeyword
                | Self::SuperKeyword
                | Self::ImportKeyword
                | Self::NumberKeyword
                | Self::BigIntKeyword
                | Self::StringKeyword
                | Self::BooleanKeyword
                | Self::VoidKeyword
                | Self::UndefinedKeyword
                | Self::NeverKeyword
                | Self::ObjectKeyword
                | Self::EmptyStatement
                | Self::OmittedExpression
        )
    }

    /// Function-like declarations and expressions.
    #[must_use]
    pub fn is_function_like(self) -> bool {
        matches!(
            self,
            Self::FunctionDeclaration
                | Self::FunctionExpression
                | Self::ArrowFunction
                | Self::MethodDeclaration
                | Self::Constructor
                | Self::GetAccessor
                | Self::SetAccessor
        )
    }

    /// Class declarations and class expressions.
    #[must_use]
    pub fn is_class_like(self) -> bool {
        matches!(self, Self::ClassDeclaration | Self::ClassExpression)
    }

    /// Declarations that may be merged by name into one symbol.
    #[must_use]
    pub fn is_type_declaration(self) -> bool {
        matches!(
            self,
            Self::ClassDeclaration
                | Self::InterfaceDeclaration
                | Self::TypeAliasDeclaration
                | Self::EnumDeclaration
        )
    }

    /// Literal expression kinds whose value is known syntactically.
    #[must_use]
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::NumericLiteral
                | Self::BigIntLiteral
                | Self::StringLiteral
                | Self::NoSubstitutionTemplateLiteral
                | Self::TrueKeyword
                | Self::FalseKeyword
                | Self::NullKeyword
        )
    }
}
