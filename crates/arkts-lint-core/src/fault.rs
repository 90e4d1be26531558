//! Fault catalogue and the per-file fault sink.
//!
//! Every rule the linter can report has a stable [`FaultId`]. The id is the
//! join key between a recorded [`Fault`] and its human-readable metadata
//! (code, kebab-case name, description, default severity, tier).

use crate::syntax::{SourceFile, TextRange};
use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Which rule set must be active for a fault to be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleTier {
    /// Always active.
    Base,
    /// Requires the static-dialect rule set (`arkts2`).
    Static,
    /// Requires `arkts2` and a file starting with `'use static'`.
    Interop,
}

macro_rules! fault_catalogue {
    ($( $variant:ident => ($code:literal, $name:literal, $sev:ident, $tier:ident, $desc:literal), )*) => {
        /// Stable identifier of a lint rule.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum FaultId {
            $(
                #[doc = $desc]
                $variant,
            )*
        }

        impl FaultId {
            /// Every fault, in catalogue order.
            pub const ALL: &'static [FaultId] = &[$(Self::$variant,)*];

            /// Rule code, e.g. `ARK001`.
            #[must_use]
            pub fn code(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)*
                }
            }

            /// Kebab-case rule name, e.g. `arkts-no-var`.
            #[must_use]
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// One-line description.
            #[must_use]
            pub fn description(self) -> &'static str {
                match self {
                    $(Self::$variant => $desc,)*
                }
            }

            /// Default severity.
            #[must_use]
            pub fn default_severity(self) -> Severity {
                match self {
                    $(Self::$variant => Severity::$sev,)*
                }
            }

            /// Rule tier.
            #[must_use]
            pub fn tier(self) -> RuleTier {
                match self {
                    $(Self::$variant => RuleTier::$tier,)*
                }
            }
        }
    };
}

fault_catalogue! {
    ObjectLiteralNoContextType => ("ARK001", "arkts-no-untyped-obj-literals", Error, Base, "Object literal must correspond to some explicitly declared class or interface"),
    ArrayLiteralNoContextType => ("ARK002", "arkts-no-noninferrable-arr-literals", Error, Base, "Array literals must contain elements of only inferrable types"),
    ObjectTypeLiteral => ("ARK003", "arkts-no-obj-literals-as-types", Error, Base, "Object literals cannot be used as type declarations"),
    ObjectLiteralProperty => ("ARK004", "arkts-no-obj-literal-props", Error, Base, "Object literal property is not supported"),
    ComputedPropertyName => ("ARK005", "arkts-identifiers-as-prop-names", Error, Base, "Objects with property names that are not identifiers are not supported"),
    LiteralAsPropertyName => ("ARK006", "arkts-identifiers-as-prop-names-literal", Error, Base, "Use identifiers instead of literals as property names"),
    PrivateIdentifier => ("ARK007", "arkts-no-private-identifiers", Error, Base, "Use 'private' keyword instead of '#' identifiers"),
    DeclWithDuplicateName => ("ARK008", "arkts-unique-names", Error, Base, "Use unique names for types and namespaces"),
    VarDeclaration => ("ARK009", "arkts-no-var", Error, Base, "Use 'let' instead of 'var'"),
    AnyType => ("ARK010", "arkts-no-any-unknown", Error, Base, "Use explicit types instead of 'any'"),
    UnknownType => ("ARK011", "arkts-no-any-unknown-unknown", Error, Base, "Use explicit types instead of 'unknown'"),
    SymbolType => ("ARK012", "arkts-no-symbol", Error, Base, "'Symbol()' API is not supported"),
    CallSignature => ("ARK013", "arkts-no-call-signatures", Error, Base, "Use 'class' instead of a type with call signature"),
    ConstructorType => ("ARK014", "arkts-no-ctor-signatures-type", Error, Base, "Constructor function type is not supported"),
    ConstructorIface => ("ARK015", "arkts-no-ctor-signatures-iface", Error, Base, "Construct signatures are not supported in interfaces"),
    ConstructorFuncs => ("ARK016", "arkts-no-ctor-signatures-funcs", Error, Base, "Constructor function types are not supported"),
    IndexMember => ("ARK017", "arkts-no-indexed-signatures", Error, Base, "Indexed signatures are not supported"),
    IntersectionType => ("ARK018", "arkts-no-intersection-types", Error, Base, "Use inheritance instead of intersection types"),
    ThisType => ("ARK019", "arkts-no-typing-with-this", Error, Base, "Type notation using 'this' is not supported"),
    ConditionalType => ("ARK020", "arkts-no-conditional-types", Error, Base, "Conditional types are not supported"),
    ParameterProperties => ("ARK021", "arkts-no-ctor-prop-decls", Error, Base, "Declaring fields in constructor is not supported"),
    InterfaceMerging => ("ARK022", "arkts-no-decl-merging", Error, Base, "Declaration merging is not supported"),
    InterfaceExtendsClass => ("ARK023", "arkts-extends-only-class", Error, Base, "Interfaces cannot extend classes"),
    IntefaceExtendDifProps => ("ARK024", "arkts-no-extend-same-prop", Error, Base, "Extended interfaces contain properties with different types"),
    MappedType => ("ARK025", "arkts-no-mapped-types", Error, Base, "Mapped type expression is not supported"),
    TypeQuery => ("ARK026", "arkts-no-type-query", Error, Base, "'typeof' operator is allowed only in expression contexts"),
    IndexedAccessType => ("ARK027", "arkts-no-aliases-by-index", Error, Base, "Indexed access types are not supported"),
    FunctionExpression => ("ARK028", "arkts-no-func-expressions", Error, Base, "Use arrow functions instead of function expressions"),
    GeneratorFunction => ("ARK029", "arkts-no-generators", Error, Base, "Generator functions are not supported"),
    YieldExpression => ("ARK030", "arkts-no-generators-yield", Error, Base, "'yield' is not supported"),
    FunctionContainsThis => ("ARK031", "arkts-no-standalone-this", Error, Base, "Using 'this' inside stand-alone functions is not supported"),
    LimitedReturnTypeInference => ("ARK032", "arkts-no-implicit-return-types", Error, Base, "Function return type inference is limited"),
    LocalFunction => ("ARK033", "arkts-no-nested-funcs", Error, Base, "Nested functions are not supported"),
    IsOperator => ("ARK034", "arkts-no-is", Error, Base, "'is' operator is not supported"),
    DestructuringParameter => ("ARK035", "arkts-no-destruct-params", Error, Base, "Destructuring parameter declarations are not supported"),
    DestructuringAssignment => ("ARK036", "arkts-no-destruct-assignment", Error, Base, "Destructuring assignment is not supported"),
    DestructuringDeclaration => ("ARK037", "arkts-no-destruct-decls", Error, Base, "Destructuring variable declarations are not supported"),
    CatchWithUnsupportedType => ("ARK038", "arkts-no-types-in-catch", Error, Base, "Type annotation in catch clause is not supported"),
    ForInStatement => ("ARK039", "arkts-no-for-in", Error, Base, "'for .. in' is not supported"),
    SpreadOperator => ("ARK040", "arkts-no-spread", Error, Base, "The spread operator can be applied only to arrays and array-derived classes"),
    CommaOperator => ("ARK041", "arkts-no-comma-outside-loops", Error, Base, "The comma operator ',' is supported only in 'for' loops"),
    UnaryArithmNotNumber => ("ARK042", "arkts-no-polymorphic-unops", Error, Base, "Unary operators '+', '-' and '~' work only on numbers"),
    DeleteOperator => ("ARK043", "arkts-no-delete", Error, Base, "'delete' operator is not supported"),
    VoidOperator => ("ARK044", "arkts-no-void-operator", Error, Base, "'void' operator is not supported"),
    InstanceofUnsupported => ("ARK045", "arkts-instanceof-ref-types", Error, Base, "'instanceof' requires a reference type on the left side"),
    InOperator => ("ARK046", "arkts-no-in", Error, Base, "'in' operator is not supported"),
    BitOpWithWrongType => ("ARK047", "arkts-bitop-integral", Error, Base, "Bitwise operators require integral operands"),
    WithStatement => ("ARK048", "arkts-no-with", Error, Base, "'with' statement is not supported"),
    ThrowStatement => ("ARK049", "arkts-limited-throw", Error, Base, "'throw' statements cannot accept values of arbitrary types"),
    LabeledStatement => ("ARK050", "arkts-no-labels", Error, Base, "Labeled statements are not supported"),
    ClassExpression => ("ARK051", "arkts-no-class-literals", Error, Base, "Class literals are not supported"),
    ImplementsClass => ("ARK052", "arkts-implements-only-iface", Error, Base, "Classes cannot be specified in 'implements' clause"),
    MethodReassignment => ("ARK053", "arkts-no-method-reassignment", Error, Base, "Reassigning object methods is not supported"),
    PropertyDeclOnFunction => ("ARK054", "arkts-no-func-props", Error, Base, "Declaring properties on functions is not supported"),
    FunctionApplyCall => ("ARK055", "arkts-no-func-apply-call", Error, Base, "'Function.apply' and 'Function.call' are not supported"),
    FunctionBind => ("ARK056", "arkts-no-func-bind", Warning, Base, "'Function.bind' is not supported"),
    FunctionBindError => ("ARK057", "arkts-no-func-bind-error", Error, Base, "'Function.bind' is not supported"),
    ConstAssertion => ("ARK058", "arkts-no-as-const", Error, Base, "'as const' assertions are not supported"),
    TypeAssertion => ("ARK059", "arkts-as-casts", Error, Base, "Only 'as T' syntax is supported for type casts"),
    ImportAssertion => ("ARK060", "arkts-no-import-assertions", Error, Base, "Import assertions are not supported"),
    ImportAfterStatement => ("ARK061", "arkts-no-misplaced-imports", Error, Base, "Import statements after other statements are not allowed"),
    ImportAssignment => ("ARK062", "arkts-no-require", Error, Base, "'require' and 'import' assignment are not supported"),
    ImportType => ("ARK063", "arkts-no-import-types", Error, Static, "Import types are not supported"),
    ExportAssignment => ("ARK064", "arkts-no-export-assignment", Error, Base, "'export = ...' assignment is not supported"),
    UMDModuleDefinition => ("ARK065", "arkts-no-umd", Error, Base, "Universal module definitions are not supported"),
    NewTarget => ("ARK066", "arkts-no-new-target", Error, Base, "'new.target' is not supported"),
    DefiniteAssignment => ("ARK067", "arkts-no-definite-assignment", Warning, Base, "Definite assignment assertions are not supported"),
    DefiniteAssignmentError => ("ARK068", "arkts-no-definite-assignment-error", Error, Base, "Definite assignment assertions are not supported"),
    Prototype => ("ARK069", "arkts-no-prototype-assignment", Error, Base, "Prototype assignment is not supported"),
    GlobalThis => ("ARK070", "arkts-no-globalthis", Warning, Base, "'globalThis' is not supported"),
    GlobalThisError => ("ARK071", "arkts-no-globalthis-error", Error, Base, "'globalThis' is not supported"),
    UtilityType => ("ARK072", "arkts-no-utility-types", Error, Base, "Some of utility types are not supported"),
    PropertyAccessByIndex => ("ARK073", "arkts-no-props-by-index", Error, Base, "Indexed access is not supported for fields"),
    JsxElement => ("ARK074", "arkts-no-jsx", Error, Base, "JSX expressions are not supported"),
    EnumMemberNonConstInit => ("ARK075", "arkts-no-enum-mixed-types", Error, Base, "Enumeration members can be initialized only with compile time expressions of the same type"),
    EnumMerging => ("ARK076", "arkts-no-enum-merging", Error, Base, "'enum' declaration merging is not supported"),
    NonDeclarationInNamespace => ("ARK078", "arkts-no-ns-statements", Error, Base, "Non-declaration statements in namespaces are not supported"),
    ShorthandAmbientModuleDecl => ("ARK079", "arkts-no-ambient-decls", Error, Base, "Shorthand ambient module declarations are not supported"),
    WildcardsInModuleName => ("ARK080", "arkts-no-module-wildcards", Error, Base, "Wildcards in module names are not supported"),
    ClassAsObject => ("ARK081", "arkts-no-classes-as-obj", Warning, Base, "Classes cannot be used as objects"),
    ClassAsObjectError => ("ARK082", "arkts-no-classes-as-obj-error", Error, Base, "Classes cannot be used as objects"),
    NamespaceAsObject => ("ARK083", "arkts-no-ns-as-obj", Error, Base, "Namespaces cannot be used as objects"),
    DynamicCtorCall => ("ARK084", "arkts-no-dynamic-ctor-call", Error, Base, "Constructor call on a value that is not a class is not supported"),
    GenericCallNoTypeArgs => ("ARK085", "arkts-no-inferred-generic-params", Error, Base, "Type inference in case of generic function calls is limited"),
    StructuralIdentity => ("ARK086", "arkts-no-structural-typing", Error, Base, "Structural typing is not supported"),
    EsObjectType => ("ARK087", "arkts-limited-esobj", Warning, Base, "Usage of 'ESObject' type is restricted"),
    EsObjectTypeError => ("ARK088", "arkts-limited-esobj-error", Error, Base, "Usage of 'ESObject' type is restricted"),
    LimitedStdLibApi => ("ARK089", "arkts-limited-stdlib", Error, Base, "Usage of standard library is restricted"),
    ErrorSuppression => ("ARK090", "arkts-strict-typing-required", Error, Base, "Switching off type checks with in-place comments is not allowed"),
    MultipleStaticBlocks => ("ARK091", "arkts-no-multiple-static-blocks", Error, Base, "Only one static block is supported"),
    OptionalMethod => ("ARK092", "arkts-optional-methods", Error, Static, "Optional methods are not supported"),
    SendableClassInheritance => ("ARK100", "arkts-sendable-class-inheritance", Error, Base, "The inheritance for 'Sendable' class is limited"),
    SendablePropType => ("ARK101", "arkts-sendable-prop-types", Error, Base, "Properties in 'Sendable' classes and interfaces must have a Sendable data type"),
    SendableDefiniteAssignment => ("ARK102", "arkts-sendable-definite-assignment", Error, Base, "Definite assignment assertion is not allowed in 'Sendable' classes"),
    SendableGenericTypes => ("ARK103", "arkts-sendable-generic-types", Error, Base, "Type arguments of generic 'Sendable' type must be a 'Sendable' data type"),
    SendableCapturedVars => ("ARK104", "arkts-sendable-imported-variables", Error, Base, "Only imported variables can be captured by 'Sendable' class"),
    SendableClassDecorator => ("ARK105", "arkts-sendable-class-decorator", Error, Base, "Only '@Sendable' decorator can be used on 'Sendable' class"),
    SendableObjectInitialization => ("ARK106", "arkts-sendable-obj-init", Error, Base, "Objects of 'Sendable' type can not be initialized using object literal or array literal"),
    SendableComputedPropName => ("ARK107", "arkts-sendable-computed-prop-name", Error, Base, "Computed property names are not allowed in 'Sendable' classes"),
    SendableAsExpr => ("ARK108", "arkts-sendable-as-expr", Error, Base, "Casting \"Non-sendable\" data to \"Sendable\" type is not allowed"),
    SendableExplicitFieldType => ("ARK109", "arkts-sendable-explicit-field-type", Error, Base, "Properties in 'Sendable' classes must have an explicit type annotation"),
    SendableFunctionImportedVariables => ("ARK110", "arkts-sendable-function-imported-variables", Error, Base, "Only imported variables can be captured by 'Sendable' function"),
    SendableFunctionDecorator => ("ARK111", "arkts-sendable-function-decorator", Error, Base, "Only '@Sendable' decorator can be used on 'Sendable' function"),
    SendableTypeAliasDecorator => ("ARK112", "arkts-sendable-typealias-decorator", Error, Base, "Only '@Sendable' decorator can be used on 'Sendable' typeAlias"),
    SendableTypeAliasDeclaration => ("ARK113", "arkts-sendable-typeAlias-declaration", Error, Base, "Only 'FunctionType' can declare 'Sendable' typeAlias"),
    SendableFunctionAssignment => ("ARK114", "arkts-sendable-function-assignment", Error, Base, "Only 'Sendable' function or 'Sendable' typeAlias object can be assigned to 'Sendable' function type"),
    SendableFunctionOverloadDecorator => ("ARK115", "arkts-sendable-function-overload-decorator", Error, Base, "The overload function and the implementation must both carry the '@Sendable' decorator"),
    SendableFunctionProperty => ("ARK116", "arkts-sendable-function-property", Error, Base, "'Sendable' function does not support property declaration"),
    SendableFunctionAsExpr => ("ARK117", "arkts-sendable-function-as-expr", Error, Base, "'Sendable' function cannot be cast to non-'Sendable' function"),
    SendableDecoratorLimited => ("ARK118", "arkts-sendable-decorator-limited", Error, Base, "The '@Sendable' decorator can only be used on 'class', 'function' and 'typeAlias'"),
    SendableBetaCompatible => ("ARK119", "arkts-sendable-beta-compatible", Error, Base, "'Sendable' functions and type aliases are not supported by the compatible SDK version"),
    SendableClosureExport => ("ARK120", "arkts-sendable-closure-export", Error, Base, "Exported top-level declarations cannot be captured by 'Sendable' class or function"),
    SharedNoSideEffectImport => ("ARK121", "arkts-no-side-effects-import", Error, Base, "Shared module does not allow side effect import"),
    SharedModuleExports => ("ARK122", "arkts-shared-module-exports", Error, Base, "Only 'Sendable' entities can be exported in shared module"),
    SharedModuleExportsWarning => ("ARK123", "arkts-shared-module-exports-warning", Warning, Base, "Only 'Sendable' entities can be exported in shared module"),
    SharedModuleNoWildcardExport => ("ARK124", "arkts-shared-module-no-wildcard-export", Error, Base, "'export *' is not allowed in shared module"),
    RuntimeArrayCheck => ("ARK130", "arkts-runtime-array-check", Error, Static, "Array bound not checked before element access"),
    IndexNegative => ("ARK131", "arkts-array-index-negative", Error, Static, "Array index must be a non-negative integer"),
    DuplicateNamespaceMember => ("ARK132", "arkts-no-duplicate-ns-member", Error, Static, "Namespace members must have unique names across namespace blocks"),
    UIInterfaceImport => ("ARK133", "arkts-ui-interface-import", Error, Static, "UI interfaces must be imported explicitly"),
    LimitedVoidTypeFromSdk => ("ARK140", "arkts-limited-void-type-sdk", Error, Static, "SDK API returning 'void' in a union is restricted"),
    DuplicateDeclNameFromSdk => ("ARK141", "arkts-duplicate-decl-sdk", Error, Static, "Declaration name collides with an SDK declaration"),
    IndexedAccessTypeFromSdk => ("ARK142", "arkts-indexed-access-type-sdk", Error, Static, "SDK API uses an indexed access type"),
    SendablePropTypeFromSdk => ("ARK143", "arkts-sendable-prop-type-sdk", Error, Static, "SDK property type is not 'Sendable'"),
    ConstructorFuncsFromSdk => ("ARK144", "arkts-constructor-funcs-sdk", Error, Static, "SDK API uses a constructor function type"),
    OptionalMethodFromSdk => ("ARK145", "arkts-optional-method-sdk", Error, Static, "SDK API declares an optional method"),
    LiteralAsPropertyNameFromSdk => ("ARK146", "arkts-literal-prop-name-sdk", Error, Static, "SDK API uses a literal as property name"),
    InteropImportJs => ("ARK150", "arkts-interop-js2s-import-js", Error, Interop, "Importing JavaScript code into a static file is restricted"),
    InteropImportTs => ("ARK151", "arkts-interop-ts2s-import-ts", Error, Interop, "Importing TypeScript code into a static file is restricted"),
    InteropImportLegacyEts => ("ARK152", "arkts-interop-d2s-import-ets", Error, Interop, "Importing dynamic-dialect code into a static file is restricted"),
    InteropArkTs1ObjectExport => ("ARK153", "arkts-interop-d2s-export-entity", Error, Interop, "Re-exporting dynamic-dialect entities from a static file is not supported"),
}

impl FaultId {
    /// Looks a fault up by kebab-case name, code or variant name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s || f.code() == s || format!("{f:?}") == s)
    }

    /// Faults counted without further analysis, see the dispatch table.
    #[must_use]
    pub fn is_count_only(self) -> bool {
        matches!(
            self,
            Self::AnyType
                | Self::SymbolType
                | Self::ThisType
                | Self::TypeQuery
                | Self::DeleteOperator
                | Self::IsOperator
                | Self::YieldExpression
                | Self::WithStatement
                | Self::IndexedAccessType
                | Self::UnknownType
                | Self::CallSignature
                | Self::IntersectionType
                | Self::ConstructorFuncs
                | Self::ConditionalType
                | Self::MappedType
                | Self::JsxElement
                | Self::ImportAssignment
                | Self::UMDModuleDefinition
                | Self::ClassExpression
                | Self::LabeledStatement
        )
    }
}

impl std::fmt::Display for FaultId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One text replacement of a fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    /// Range to replace.
    pub range: TextRange,
    /// Replacement text.
    pub text: String,
}

impl Replacement {
    /// Creates a replacement.
    #[must_use]
    pub fn new(range: TextRange, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }
}

/// Ordered list of replacements produced by the auto-fix bridge.
pub type Fix = Vec<Replacement>;

/// A recorded rule violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fault {
    /// Rule that fired.
    pub rule: FaultId,
    /// Source range.
    pub range: TextRange,
    /// 1-based line of the range start.
    pub line: usize,
    /// 1-based column of the range start.
    pub column: usize,
    /// Fix, if the auto-fix bridge produced one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
}

/// Append-only fault sink for one file.
///
/// The sink never deduplicates: handlers are responsible for not reporting
/// the same logical violation twice.
#[derive(Debug, Default)]
pub struct FaultLog {
    faults: Vec<Fault>,
    node_counters: BTreeMap<FaultId, usize>,
    line_counters: BTreeMap<(FaultId, usize), usize>,
}

impl FaultLog {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a fault at `range` of `file`.
    pub fn report(&mut self, file: &SourceFile, rule: FaultId, range: TextRange, fix: Option<Fix>) {
        let (line, column) = file.line_col(range.start);
        *self.node_counters.entry(rule).or_default() += 1;
        *self.line_counters.entry((rule, line)).or_default() += 1;
        self.faults.push(Fault {
            rule,
            range,
            line,
            column,
            fix,
        });
    }

    /// Recorded faults in discovery order.
    #[must_use]
    pub fn faults(&self) -> &[Fault] {
        &self.faults
    }

    /// Number of reports of `rule`.
    #[must_use]
    pub fn count(&self, rule: FaultId) -> usize {
        self.node_counters.get(&rule).copied().unwrap_or(0)
    }

    /// Number of reports of `rule` on `line`.
    #[must_use]
    pub fn count_on_line(&self, rule: FaultId, line: usize) -> usize {
        self.line_counters.get(&(rule, line)).copied().unwrap_or(0)
    }

    /// Consumes the sink into a per-file result.
    #[must_use]
    pub fn into_file_faults(self, path: PathBuf) -> FileFaults {
        FileFaults {
            path,
            faults: self.faults,
            counts: self.node_counters,
        }
    }
}

/// Faults of one completed file pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileFaults {
    /// File path.
    pub path: PathBuf,
    /// Faults in discovery order.
    pub faults: Vec<Fault>,
    /// Report count per rule.
    pub counts: BTreeMap<FaultId, usize>,
}

impl FileFaults {
    /// Rules that fired, in discovery order, with repeats.
    #[must_use]
    pub fn rules(&self) -> Vec<FaultId> {
        self.faults.iter().map(|f| f.rule).collect()
    }

    /// Number of faults of `rule`.
    #[must_use]
    pub fn count(&self, rule: FaultId) -> usize {
        self.counts.get(&rule).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::TreeBuilder;
    use std::collections::HashSet;

    #[test]
    fn codes_and_names_are_unique() {
        let codes: HashSet<_> = FaultId::ALL.iter().map(|f| f.code()).collect();
        let names: HashSet<_> = FaultId::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(codes.len(), FaultId::ALL.len());
        assert_eq!(names.len(), FaultId::ALL.len());
    }

    #[test]
    fn parse_accepts_every_spelling() {
        assert_eq!(FaultId::parse("arkts-no-var"), Some(FaultId::VarDeclaration));
        assert_eq!(FaultId::parse("ARK009"), Some(FaultId::VarDeclaration));
        assert_eq!(FaultId::parse("VarDeclaration"), Some(FaultId::VarDeclaration));
        assert_eq!(FaultId::parse("nope"), None);
    }

    #[test]
    fn sink_counts_without_dedup() {
        let mut b = TreeBuilder::new("a.ets");
        let x = b.ident("x");
        let stmt = b.expr_stmt(x);
        let file = b.finish([stmt]);
        let mut log = FaultLog::new();
        let range = file.range(x);
        log.report(&file, FaultId::AnyType, range, None);
        log.report(&file, FaultId::AnyType, range, None);
        assert_eq!(log.count(FaultId::AnyType), 2);
        assert_eq!(log.count_on_line(FaultId::AnyType, 1), 2);
        assert_eq!(log.faults().len(), 2);
    }
}
