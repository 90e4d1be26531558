//! Symbol and type resolution service.
//!
//! The linter never infers types itself. Everything it knows about symbols,
//! declarations and types comes through the [`Oracle`] trait, which a host
//! compiler implements (see [`crate::Program`] for the in-memory one).
//!
//! Lookups return `Option`: a missing answer is an oracle inconsistency and
//! callers bail out of the current check instead of failing.

use crate::syntax::{FileId, NodeRef, SourceFile};
use serde::{Deserialize, Serialize};

/// Index of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

/// Index of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(pub u32);

/// Index of a call or construct signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureId(pub u32);

macro_rules! flag_set {
    ($(#[$meta:meta])* $name:ident { $($(#[$doc:meta])* $flag:ident = $value:expr;)* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// No flags.
            pub const NONE: Self = Self(0);
            $(
                $(#[$doc])*
                pub const $flag: Self = Self($value);
            )*

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
        }

        impl std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }
    };
}

flag_set! {
    /// Symbol classification flags.
    SymbolFlags {
        /// `var` binding.
        FUNCTION_SCOPED_VARIABLE = 1;
        /// `let`/`const` binding.
        BLOCK_SCOPED_VARIABLE = 1 << 1;
        /// Class or interface property.
        PROPERTY = 1 << 2;
        /// Enum member.
        ENUM_MEMBER = 1 << 3;
        /// Function.
        FUNCTION = 1 << 4;
        /// Class.
        CLASS = 1 << 5;
        /// Interface.
        INTERFACE = 1 << 6;
        /// `const enum`.
        CONST_ENUM = 1 << 7;
        /// Regular enum.
        REGULAR_ENUM = 1 << 8;
        /// Namespace with values.
        VALUE_MODULE = 1 << 9;
        /// Type-only namespace.
        NAMESPACE_MODULE = 1 << 10;
        /// Anonymous type literal.
        TYPE_LITERAL = 1 << 11;
        /// Object literal.
        OBJECT_LITERAL = 1 << 12;
        /// Method.
        METHOD = 1 << 13;
        /// Constructor.
        CONSTRUCTOR = 1 << 14;
        /// Get accessor.
        GET_ACCESSOR = 1 << 15;
        /// Set accessor.
        SET_ACCESSOR = 1 << 16;
        /// Type parameter.
        TYPE_PARAMETER = 1 << 17;
        /// Type alias.
        TYPE_ALIAS = 1 << 18;
        /// Import or export alias.
        ALIAS = 1 << 19;
        /// `prototype` property of a class.
        PROTOTYPE = 1 << 20;
        /// Optional member.
        OPTIONAL = 1 << 21;
        /// Any variable.
        VARIABLE = 1 | 1 << 1;
        /// Any enum.
        ENUM = 1 << 7 | 1 << 8;
        /// Any namespace.
        MODULE = 1 << 9 | 1 << 10;
        /// Accessors.
        ACCESSOR = 1 << 15 | 1 << 16;
    }
}

flag_set! {
    /// Type classification flags.
    TypeFlags {
        /// `any`
        ANY = 1;
        /// `unknown`
        UNKNOWN = 1 << 1;
        /// `string`
        STRING = 1 << 2;
        /// `number`
        NUMBER = 1 << 3;
        /// `boolean`
        BOOLEAN = 1 << 4;
        /// Enum type.
        ENUM = 1 << 5;
        /// `bigint`
        BIGINT = 1 << 6;
        /// String literal type.
        STRING_LITERAL = 1 << 7;
        /// Number literal type.
        NUMBER_LITERAL = 1 << 8;
        /// `true`/`false`
        BOOLEAN_LITERAL = 1 << 9;
        /// Enum member literal.
        ENUM_LITERAL = 1 << 10;
        /// Bigint literal.
        BIGINT_LITERAL = 1 << 11;
        /// `symbol`
        ES_SYMBOL = 1 << 12;
        /// `unique symbol`
        UNIQUE_ES_SYMBOL = 1 << 13;
        /// `void`
        VOID = 1 << 14;
        /// `undefined`
        UNDEFINED = 1 << 15;
        /// `null`
        NULL = 1 << 16;
        /// `never`
        NEVER = 1 << 17;
        /// Type parameter.
        TYPE_PARAMETER = 1 << 18;
        /// Object type (see [`ObjectKind`]).
        OBJECT = 1 << 19;
        /// Union.
        UNION = 1 << 20;
        /// Intersection.
        INTERSECTION = 1 << 21;
        /// `keyof T`.
        INDEX = 1 << 22;
        /// `T[K]`.
        INDEXED_ACCESS = 1 << 23;
        /// Conditional type.
        CONDITIONAL = 1 << 24;
        /// `object` keyword.
        NON_PRIMITIVE = 1 << 25;
        /// Template literal type.
        TEMPLATE_LITERAL = 1 << 26;
        /// Any literal.
        LITERAL = 1 << 7 | 1 << 8 | 1 << 9 | 1 << 11;
        /// Number-like.
        NUMBER_LIKE = 1 << 3 | 1 << 8 | 1 << 5;
        /// String-like.
        STRING_LIKE = 1 << 2 | 1 << 7 | 1 << 26;
        /// Boolean-like.
        BOOLEAN_LIKE = 1 << 4 | 1 << 9;
        /// Bigint-like.
        BIGINT_LIKE = 1 << 6 | 1 << 11;
        /// Enum-like.
        ENUM_LIKE = 1 << 5 | 1 << 10;
        /// `null` or `undefined`.
        NULLABLE = 1 << 15 | 1 << 16;
        /// Union or intersection.
        UNION_OR_INTERSECTION = 1 << 20 | 1 << 21;
    }
}

/// Shape of an object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Class instance type.
    Class,
    /// Interface type.
    Interface,
    /// Instantiation of a generic class or interface (arrays included).
    Reference,
    /// Tuple.
    Tuple,
    /// Anonymous object type (literals, function types).
    Anonymous,
    /// Mapped type.
    Mapped,
}

/// Compile-time constant value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstValue {
    /// Numeric constant.
    Number(f64),
    /// String constant.
    String(String),
    /// Boolean constant.
    Boolean(bool),
}

impl ConstValue {
    /// Numeric value, if the constant is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// What the oracle knows about a symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolInfo {
    /// Symbol name.
    pub name: String,
    /// Classification.
    pub flags: SymbolFlags,
    /// All declarations merged into the symbol, in declaration order.
    pub declarations: Vec<NodeRef>,
    /// Declaration that introduces the value meaning.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_declaration: Option<NodeRef>,
    /// Target of an alias symbol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_target: Option<SymbolId>,
    /// Enclosing symbol (class of a member, namespace of an export).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<SymbolId>,
    /// Members and exports.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<SymbolId>,
    /// Type of the symbol's value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeId>,
    /// Declared type of a class, interface, enum or alias.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<TypeId>,
}

impl SymbolInfo {
    /// Creates a symbol.
    #[must_use]
    pub fn new(name: impl Into<String>, flags: SymbolFlags) -> Self {
        Self {
            name: name.into(),
            flags,
            ..Self::default()
        }
    }
}

/// What the oracle knows about a type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeInfo {
    /// Classification.
    pub flags: TypeFlags,
    /// Object shape, when [`TypeFlags::OBJECT`] is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_kind: Option<ObjectKind>,
    /// Symbol of the class, interface, enum or literal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<SymbolId>,
    /// Alias the type was written through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_symbol: Option<SymbolId>,
    /// Generic target of a reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<TypeId>,
    /// Type arguments of a reference, element types of a tuple.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<TypeId>,
    /// Constituents of a union or intersection.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeId>,
    /// Properties.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<SymbolId>,
    /// Direct base types.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub base_types: Vec<TypeId>,
    /// Call signatures.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub call_signatures: Vec<SignatureId>,
    /// Construct signatures.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub construct_signatures: Vec<SignatureId>,
    /// Number index signature type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_index: Option<TypeId>,
    /// String index signature type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_index: Option<TypeId>,
    /// Constraint of a type parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint: Option<TypeId>,
    /// Value of a literal type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literal: Option<ConstValue>,
    /// Display name.
    pub name: String,
}

impl TypeInfo {
    /// Creates a type with flags and display name.
    #[must_use]
    pub fn new(flags: TypeFlags, name: impl Into<String>) -> Self {
        Self {
            flags,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns true for object types of the given shape.
    #[must_use]
    pub fn is_object_kind(&self, kind: ObjectKind) -> bool {
        self.flags.contains(TypeFlags::OBJECT) && self.object_kind == Some(kind)
    }
}

/// What the oracle knows about a signature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureInfo {
    /// Declaration of the signature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration: Option<NodeRef>,
    /// Parameter symbols.
    pub parameters: Vec<SymbolId>,
    /// Return type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeId>,
    /// Type arguments the signature was instantiated with, one per type
    /// parameter; `unknown` where inference found nothing.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeId>,
    /// Number of required arguments.
    pub min_argument_count: usize,
}

/// The host type checker as seen by the linter.
pub trait Oracle {
    /// Source file by id.
    fn file(&self, id: FileId) -> Option<&SourceFile>;

    /// Symbol a node refers to or declares.
    fn symbol_at(&self, node: NodeRef) -> Option<SymbolId>;

    /// Symbol metadata.
    fn symbol(&self, id: SymbolId) -> Option<&SymbolInfo>;

    /// Type of an expression or declaration.
    fn type_at(&self, node: NodeRef) -> Option<TypeId>;

    /// Type the context expects for an expression.
    fn contextual_type_at(&self, node: NodeRef) -> Option<TypeId>;

    /// Type metadata.
    fn ty(&self, id: TypeId) -> Option<&TypeInfo>;

    /// Type of a symbol's value.
    fn type_of_symbol(&self, id: SymbolId) -> Option<TypeId>;

    /// Declared type of a class, interface, enum or alias symbol.
    fn declared_type_of_symbol(&self, id: SymbolId) -> Option<TypeId>;

    /// Constant value of a literal, enum member or constant expression.
    fn constant_value(&self, node: NodeRef) -> Option<ConstValue>;

    /// Signature a call or `new` expression resolves to.
    fn resolved_signature(&self, node: NodeRef) -> Option<SignatureId>;

    /// Signature metadata.
    fn signature(&self, id: SignatureId) -> Option<&SignatureInfo>;

    /// Returns true if `source` is assignable to `target`.
    fn is_assignable(&self, source: TypeId, target: TypeId) -> bool;

    /// Symbol at `node` with import aliases resolved.
    fn true_symbol_at(&self, node: NodeRef) -> Option<SymbolId> {
        self.symbol_at(node).map(|s| self.resolve_alias(s))
    }

    /// Follows alias targets until a non-alias symbol is reached.
    fn resolve_alias(&self, mut id: SymbolId) -> SymbolId {
        // Alias chains are short; the bound guards cyclic snapshots.
        for _ in 0..32 {
            match self.symbol(id) {
                Some(info) if info.flags.contains(SymbolFlags::ALIAS) => match info.alias_target {
                    Some(target) => id = target,
                    None => break,
                },
                _ => break,
            }
        }
        id
    }

    /// Declarations merged into a symbol.
    fn declarations_of(&self, id: SymbolId) -> &[NodeRef] {
        self.symbol(id).map_or(&[], |s| s.declarations.as_slice())
    }

    /// Flags of a type, empty when unknown.
    fn type_flags(&self, id: TypeId) -> TypeFlags {
        self.ty(id).map_or(TypeFlags::NONE, |t| t.flags)
    }

    /// Flags of a symbol, empty when unknown.
    fn symbol_flags(&self, id: SymbolId) -> SymbolFlags {
        self.symbol(id).map_or(SymbolFlags::NONE, |s| s.flags)
    }

    /// Name of a symbol, empty when unknown.
    fn symbol_name(&self, id: SymbolId) -> &str {
        self.symbol(id).map_or("", |s| s.name.as_str())
    }

    /// Constituents of a union, or the type itself.
    fn union_members(&self, id: TypeId) -> Vec<TypeId> {
        match self.ty(id) {
            Some(t) if t.flags.contains(TypeFlags::UNION) => t.types.clone(),
            _ => vec![id],
        }
    }

    /// Removes `null` and `undefined` from a union.
    ///
    /// Returns the single remaining constituent, or `id` when zero or
    /// several remain.
    fn non_nullable(&self, id: TypeId) -> TypeId {
        let Some(info) = self.ty(id) else {
            return id;
        };
        if !info.flags.contains(TypeFlags::UNION) {
            return id;
        }
        let rest: Vec<TypeId> = info
            .types
            .iter()
            .copied()
            .filter(|t| !self.type_flags(*t).intersects(TypeFlags::NULLABLE))
            .collect();
        match rest.as_slice() {
            [single] => *single,
            _ => id,
        }
    }

    /// Display text of a type.
    fn type_to_string(&self, id: TypeId) -> String {
        let Some(info) = self.ty(id) else {
            return String::new();
        };
        if !info.name.is_empty() {
            return info.name.clone();
        }
        if info.flags.intersects(TypeFlags::UNION_OR_INTERSECTION) {
            let sep = if info.flags.contains(TypeFlags::UNION) {
                " | "
            } else {
                " & "
            };
            return info
                .types
                .iter()
                .map(|t| self.type_to_string(*t))
                .collect::<Vec<_>>()
                .join(sep);
        }
        info.symbol
            .map(|s| self.symbol_name(s).to_string())
            .unwrap_or_default()
    }

    /// Source file containing a node.
    fn file_of(&self, node: NodeRef) -> Option<&SourceFile> {
        self.file(node.file)
    }
}
