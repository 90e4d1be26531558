//! JSON deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization.
//! They are converted to model types via [`super::load`].

use serde::Deserialize;

/// Raw whitelist document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiListDto {
    /// Restricted API entries.
    #[serde(default)]
    pub api_list: Vec<ApiListItemDto>,
}

/// One raw entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiListItemDto {
    /// Declaration file the entry belongs to.
    #[serde(default)]
    pub file_path: String,
    /// Module specifiers the declaration is imported through.
    #[serde(default)]
    pub import_path: Vec<String>,
    /// Applies regardless of imports.
    #[serde(default)]
    pub is_global: bool,
    /// The restricted API.
    pub api_info: ApiInfoDto,
}

/// Raw API description.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiInfoDto {
    /// Problem category.
    #[serde(default)]
    pub problem: String,
    /// API identifier.
    #[serde(default)]
    pub api_name: String,
    /// Syntactic role, e.g. `MethodSignature`.
    #[serde(default)]
    pub api_type: String,
    /// Function arguments.
    #[serde(default)]
    pub api_func_args: Vec<ApiFuncArgDto>,
    /// Enclosing declarations, outermost first.
    #[serde(default)]
    pub parent_api: Vec<ParentApiDto>,
    /// Type of a property entry.
    #[serde(default)]
    pub api_property_type: Option<String>,
    /// Return type of a method entry.
    #[serde(default)]
    pub method_return_type: Option<String>,
}

/// Raw function argument.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiFuncArgDto {
    /// Argument name.
    #[serde(default)]
    pub name: String,
    /// Argument type text.
    #[serde(default, rename = "type")]
    pub ty: String,
}

/// Raw enclosing declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct ParentApiDto {
    /// Declaration name.
    #[serde(default)]
    pub api_name: String,
    /// Declaration role.
    #[serde(default)]
    pub api_type: String,
}
