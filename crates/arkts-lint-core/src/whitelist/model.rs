//! Validated whitelist entries.

use crate::fault::FaultId;
use crate::utils::paths::normalize_str;

/// Field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A name that must not be empty is empty.
    #[error("name must not be empty")]
    EmptyName,
    /// The problem category is missing.
    #[error("problem must not be empty")]
    EmptyProblem,
}

/// Problem category of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApiProblem {
    /// `void` inside a union return type.
    LimitedVoidType,
    /// Name collides with a user declaration.
    DuplicateDeclaration,
    /// Indexed access type in the signature.
    IndexedAccessType,
    /// Non-sendable property type.
    SendablePropType,
    /// Constructor function type.
    ConstructorFuncs,
    /// Optional method.
    OptionalMethod,
    /// Literal used as property name.
    LiteralAsPropertyName,
    /// A category this linter does not act on.
    Other(String),
}

impl ApiProblem {
    /// Parses a category, accepting `PascalCase` and spaced spellings.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyProblem`] for an empty string.
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        let key: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if key.is_empty() {
            return Err(ModelError::EmptyProblem);
        }
        Ok(match key.as_str() {
            "limitedvoidtype" => Self::LimitedVoidType,
            "duplicatedeclaration" | "duplicatedeclname" => Self::DuplicateDeclaration,
            "indexedaccesstype" => Self::IndexedAccessType,
            "sendableproptype" => Self::SendablePropType,
            "constructorfuncs" | "constructortype" => Self::ConstructorFuncs,
            "optionalmethod" => Self::OptionalMethod,
            "literalaspropertyname" => Self::LiteralAsPropertyName,
            _ => Self::Other(raw.to_string()),
        })
    }

    /// Fault reported for uses of an entry with this problem.
    #[must_use]
    pub fn fault(&self) -> Option<FaultId> {
        match self {
            Self::LimitedVoidType => Some(FaultId::LimitedVoidTypeFromSdk),
            Self::DuplicateDeclaration => Some(FaultId::DuplicateDeclNameFromSdk),
            Self::IndexedAccessType => Some(FaultId::IndexedAccessTypeFromSdk),
            Self::SendablePropType => Some(FaultId::SendablePropTypeFromSdk),
            Self::ConstructorFuncs => Some(FaultId::ConstructorFuncsFromSdk),
            Self::OptionalMethod => Some(FaultId::OptionalMethodFromSdk),
            Self::LiteralAsPropertyName => Some(FaultId::LiteralAsPropertyNameFromSdk),
            Self::Other(_) => None,
        }
    }
}

/// A non-empty identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiName(String);

impl ApiName {
    /// Validates a name.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::EmptyName`] for blank input.
    pub fn new(raw: &str) -> Result<Self, ModelError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Syntactic role of an API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApiType {
    /// Interface method.
    MethodSignature,
    /// Class method.
    MethodDeclaration,
    /// `new (...)` signature.
    ConstructSignature,
    /// Class constructor.
    Constructor,
    /// Top-level function.
    FunctionDeclaration,
    /// Interface property.
    PropertySignature,
    /// Class property.
    PropertyDeclaration,
    /// Class.
    ClassDeclaration,
    /// Interface.
    InterfaceDeclaration,
    /// Type alias.
    TypeAliasDeclaration,
    /// Namespace.
    ModuleDeclaration,
    /// Anything else.
    Other(String),
}

impl ApiType {
    /// Parses a role name.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "MethodSignature" => Self::MethodSignature,
            "MethodDeclaration" => Self::MethodDeclaration,
            "ConstructSignature" => Self::ConstructSignature,
            "Constructor" => Self::Constructor,
            "FunctionDeclaration" => Self::FunctionDeclaration,
            "PropertySignature" => Self::PropertySignature,
            "PropertyDeclaration" => Self::PropertyDeclaration,
            "ClassDeclaration" => Self::ClassDeclaration,
            "InterfaceDeclaration" => Self::InterfaceDeclaration,
            "TypeAliasDeclaration" => Self::TypeAliasDeclaration,
            "ModuleDeclaration" => Self::ModuleDeclaration,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Enclosing declaration of an API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentApi {
    /// Name.
    pub name: ApiName,
    /// Role.
    pub api_type: ApiType,
}

/// A function argument of an API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFuncArg {
    /// Argument name.
    pub name: String,
    /// Argument type text.
    pub ty: String,
}

/// The restricted API itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiInfo {
    /// Problem category.
    pub problem: ApiProblem,
    /// Name.
    pub name: ApiName,
    /// Role.
    pub api_type: ApiType,
    /// Function arguments.
    pub func_args: Vec<ApiFuncArg>,
    /// Enclosing declarations, outermost first.
    pub parents: Vec<ParentApi>,
    /// Property type text.
    pub property_type: Option<String>,
    /// Return type text.
    pub return_type: Option<String>,
}

/// A validated whitelist entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiListItem {
    /// Declaration file, forward slashes.
    pub file_path: String,
    /// Module specifiers, forward slashes.
    pub import_paths: Vec<String>,
    /// Applies regardless of imports.
    pub is_global: bool,
    /// The API.
    pub info: ApiInfo,
}

impl ApiListItem {
    /// Creates an entry, normalizing its paths.
    #[must_use]
    pub fn new(file_path: &str, import_paths: &[String], is_global: bool, info: ApiInfo) -> Self {
        Self {
            file_path: normalize_str(file_path),
            import_paths: import_paths.iter().map(|p| normalize_str(p)).collect(),
            is_global,
            info,
        }
    }

    /// Outermost name: the first parent, or the API itself.
    #[must_use]
    pub fn leading_name(&self) -> &str {
        self.info
            .parents
            .first()
            .map_or(self.info.name.as_str(), |p| p.name.as_str())
    }

    /// Dotted name including parents.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        self.info
            .parents
            .iter()
            .map(|p| p.name.as_str())
            .chain(std::iter::once(self.info.name.as_str()))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Returns true if the entry is reachable through `module_specifier`.
    #[must_use]
    pub fn matches_import(&self, module_specifier: &str) -> bool {
        let spec = normalize_str(module_specifier);
        self.import_paths.iter().any(|p| *p == spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn problem_spellings() {
        assert_eq!(ApiProblem::parse("LimitedVoidType"), Ok(ApiProblem::LimitedVoidType));
        assert_eq!(ApiProblem::parse("limited void type"), Ok(ApiProblem::LimitedVoidType));
        assert_eq!(
            ApiProblem::parse("Indexed_Access_Type"),
            Ok(ApiProblem::IndexedAccessType)
        );
        assert_eq!(
            ApiProblem::parse("SomethingNew"),
            Ok(ApiProblem::Other("SomethingNew".into()))
        );
        assert_eq!(ApiProblem::parse(" "), Err(ModelError::EmptyProblem));
        assert_eq!(ApiProblem::Other("x".into()).fault(), None);
    }

    #[test]
    fn names_are_trimmed_and_required() {
        assert_eq!(ApiName::new(" foo ").unwrap().as_str(), "foo");
        assert_eq!(ApiName::new(""), Err(ModelError::EmptyName));
    }
}
