//! Node kind → handler table.
//!
//! Count-only kinds are looked up first and never reach a handler. Every
//! other kind has at most one handler; a kind without one contributes
//! nothing beyond its children.

use crate::handlers::{
    classes, declarations, enums, expressions, functions, identifiers, imports, interfaces,
    literals, modules, sendable, statements, types,
};
use crate::linter::Linter;
use arkts_lint_core::{FaultId, NodeId, NodeKind};

/// A rule handler. Receives the visited node, already known to be of the
/// kind it was registered for.
pub(crate) type Handler = fn(&mut Linter<'_>, NodeId);

/// Fault counted for a kind without further analysis.
#[must_use]
pub(crate) fn count_only(kind: NodeKind) -> Option<FaultId> {
    let rule = match kind {
        NodeKind::AnyKeyword => FaultId::AnyType,
        NodeKind::SymbolKeyword => FaultId::SymbolType,
        NodeKind::ThisType => FaultId::ThisType,
        NodeKind::TypeQuery => FaultId::TypeQuery,
        NodeKind::DeleteExpression => FaultId::DeleteOperator,
        NodeKind::TypePredicate => FaultId::IsOperator,
        NodeKind::YieldExpression => FaultId::YieldExpression,
        NodeKind::WithStatement => FaultId::WithStatement,
        NodeKind::IndexedAccessType => FaultId::IndexedAccessType,
        NodeKind::UnknownKeyword => FaultId::UnknownType,
        NodeKind::CallSignature => FaultId::CallSignature,
        NodeKind::IntersectionType => FaultId::IntersectionType,
        NodeKind::ConstructorType => FaultId::ConstructorFuncs,
        NodeKind::ConditionalType => FaultId::ConditionalType,
        NodeKind::MappedType => FaultId::MappedType,
        NodeKind::JsxElement | NodeKind::JsxSelfClosingElement => FaultId::JsxElement,
        NodeKind::ImportEqualsDeclaration => FaultId::ImportAssignment,
        NodeKind::NamespaceExportDeclaration => FaultId::UMDModuleDefinition,
        NodeKind::ClassExpression => FaultId::ClassExpression,
        NodeKind::LabeledStatement => FaultId::LabeledStatement,
        _ => return None,
    };
    Some(rule)
}

/// Handler registered for a kind.
#[must_use]
pub(crate) fn handler_for(kind: NodeKind) -> Option<Handler> {
    let handler: Handler = match kind {
        NodeKind::SourceFile => modules::source_file,

        NodeKind::ObjectLiteralExpression => literals::object_literal,
        NodeKind::ArrayLiteralExpression => literals::array_literal,
        NodeKind::PropertyAssignment => literals::property_assignment,
        NodeKind::ComputedPropertyName => literals::computed_property_name,
        NodeKind::SpreadElement | NodeKind::SpreadAssignment => literals::spread,

        NodeKind::Parameter => declarations::parameter,
        NodeKind::VariableDeclarationList => declarations::variable_declaration_list,
        NodeKind::VariableDeclaration => declarations::variable_declaration,
        NodeKind::PropertyDeclaration => declarations::property_declaration,
        NodeKind::PropertySignature => declarations::property_signature,

        NodeKind::EnumDeclaration => enums::enum_declaration,
        NodeKind::EnumMember => enums::enum_member,

        NodeKind::InterfaceDeclaration => interfaces::interface_declaration,
        NodeKind::MethodSignature => interfaces::method_signature,
        NodeKind::ConstructSignature => interfaces::construct_signature,
        NodeKind::IndexSignature => interfaces::index_signature,
        NodeKind::TypeLiteral => interfaces::type_literal,

        NodeKind::ClassDeclaration => classes::class_declaration,
        NodeKind::MethodDeclaration => classes::method_declaration,
        NodeKind::Constructor => classes::constructor,
        NodeKind::ClassStaticBlockDeclaration => classes::static_block,
        NodeKind::GetAccessor | NodeKind::SetAccessor => classes::accessor,
        NodeKind::PrivateIdentifier => classes::private_identifier,

        NodeKind::FunctionExpression => functions::function_expression,
        NodeKind::ArrowFunction => functions::arrow_function,
        NodeKind::FunctionDeclaration => functions::function_declaration,

        NodeKind::ThrowStatement => statements::throw_statement,
        NodeKind::ForStatement => statements::for_statement,
        NodeKind::ForInStatement => statements::for_in_statement,
        NodeKind::ForOfStatement => statements::for_of_statement,
        NodeKind::CatchClause => statements::catch_clause,
        NodeKind::ReturnStatement => statements::return_statement,

        NodeKind::ImportDeclaration => imports::import_declaration,
        NodeKind::ImportClause => imports::import_clause,
        NodeKind::ImportSpecifier => imports::import_specifier,
        NodeKind::NamespaceImport => imports::namespace_import,
        NodeKind::ImportType => imports::import_type,

        NodeKind::ModuleDeclaration => modules::module_declaration,
        NodeKind::TypeAliasDeclaration => modules::type_alias_declaration,
        NodeKind::ExportAssignment => modules::export_assignment,
        NodeKind::ExportDeclaration => modules::export_declaration,

        NodeKind::PrefixUnaryExpression => expressions::prefix_unary,
        NodeKind::BinaryExpression => expressions::binary,
        NodeKind::PropertyAccessExpression => expressions::property_access,
        NodeKind::ElementAccessExpression => expressions::element_access,
        NodeKind::CallExpression => expressions::call,
        NodeKind::NewExpression => expressions::new_expression,
        NodeKind::AsExpression => expressions::as_expression,
        NodeKind::TypeAssertionExpression => expressions::type_assertion,
        NodeKind::MetaProperty => expressions::meta_property,
        NodeKind::VoidExpression => expressions::void_expression,

        NodeKind::Identifier => identifiers::identifier,

        NodeKind::TypeReference => types::type_reference,
        NodeKind::ExpressionWithTypeArguments => types::expression_with_type_arguments,

        NodeKind::Decorator => sendable::decorator,
        _ => return None,
    };
    Some(handler)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_only_and_handlers_are_disjoint() {
        for kind in NodeKind::ALL {
            assert!(
                !(count_only(*kind).is_some() && handler_for(*kind).is_some()),
                "{kind:?} is registered twice"
            );
        }
    }

    #[test]
    fn test_count_only_faults_are_flagged_in_catalogue() {
        let counted: Vec<FaultId> = NodeKind::ALL.iter().filter_map(|k| count_only(*k)).collect();
        for rule in &counted {
            assert!(rule.is_count_only(), "{rule:?}");
        }
        for rule in FaultId::ALL.iter().filter(|r| r.is_count_only()) {
            assert!(counted.contains(rule), "{rule:?} has no kind");
        }
    }

    #[test]
    fn test_kinds_without_entry() {
        assert!(count_only(NodeKind::Block).is_none());
        assert!(handler_for(NodeKind::Block).is_none());
        assert!(handler_for(NodeKind::NumericLiteral).is_none());
    }
}
