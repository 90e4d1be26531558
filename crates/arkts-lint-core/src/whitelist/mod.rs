//! SDK whitelist tables and process-wide initialization.
//!
//! The whitelist is a JSON list of restricted SDK APIs. It is loaded once,
//! validated into [`ApiListItem`]s and indexed for the lookups the rule
//! handlers need. [`init_globals`] installs the tables as the process
//! singleton; they are read-only afterwards.

pub mod builtins;
mod dto;
mod model;

pub use dto::{ApiFuncArgDto, ApiInfoDto, ApiListDto, ApiListItemDto, ParentApiDto};
pub use model::{
    ApiFuncArg, ApiInfo, ApiListItem, ApiName, ApiProblem, ApiType, ModelError, ParentApi,
};

use crate::utils::paths::{normalize_str, path_ends_with, strip_source_extension};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info};

/// Errors from loading the whitelist.
#[derive(Debug, thiserror::Error)]
pub enum WhitelistError {
    /// The file could not be read.
    #[error("failed to read whitelist {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The JSON is malformed.
    #[error("failed to parse whitelist: {0}")]
    Json(#[from] serde_json::Error),

    /// A field-level validation error.
    #[error("{context}: {source}")]
    Validation {
        /// Where the error occurred (e.g., "api_list[3].api_info.api_name").
        context: String,
        /// The underlying model error.
        source: ModelError,
    },
}

/// Errors from process-wide initialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InitError {
    /// [`init_globals`] ran before.
    #[error("process globals are already initialized")]
    AlreadyInitialized,
}

/// Converts the raw document into validated entries.
///
/// # Errors
///
/// Returns [`WhitelistError::Validation`] naming the first invalid field.
pub fn load(dto: ApiListDto) -> Result<Vec<ApiListItem>, WhitelistError> {
    dto.api_list
        .into_iter()
        .enumerate()
        .map(|(i, item)| load_item(i, item))
        .collect()
}

fn load_item(i: usize, item: ApiListItemDto) -> Result<ApiListItem, WhitelistError> {
    let ctx = |field: &str| format!("api_list[{i}].{field}");
    let info = item.api_info;
    let name = ApiName::new(&info.api_name).map_err(|source| WhitelistError::Validation {
        context: ctx("api_info.api_name"),
        source,
    })?;
    let problem = ApiProblem::parse(&info.problem).map_err(|source| WhitelistError::Validation {
        context: ctx("api_info.problem"),
        source,
    })?;
    let parents = info
        .parent_api
        .iter()
        .enumerate()
        .map(|(j, p)| {
            ApiName::new(&p.api_name)
                .map(|name| ParentApi {
                    name,
                    api_type: ApiType::parse(&p.api_type),
                })
                .map_err(|source| WhitelistError::Validation {
                    context: ctx(&format!("api_info.parent_api[{j}].api_name")),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let api = ApiInfo {
        problem,
        name,
        api_type: ApiType::parse(&info.api_type),
        func_args: info
            .api_func_args
            .into_iter()
            .map(|a| ApiFuncArg {
                name: a.name,
                ty: a.ty,
            })
            .collect(),
        parents,
        property_type: info.api_property_type,
        return_type: info.method_return_type,
    };
    Ok(ApiListItem::new(
        &item.file_path,
        &item.import_path,
        item.is_global,
        api,
    ))
}

/// Indexed whitelist.
#[derive(Debug, Clone, Default)]
pub struct WhitelistTables {
    entries: Vec<ApiListItem>,
    by_leading_name: HashMap<String, Vec<usize>>,
    by_path: HashMap<String, Vec<usize>>,
    by_problem: HashMap<ApiProblem, Vec<usize>>,
    global: HashMap<String, Vec<usize>>,
}

impl WhitelistTables {
    /// Indexes validated entries.
    #[must_use]
    pub fn new(entries: Vec<ApiListItem>) -> Self {
        let mut tables = Self::default();
        for (i, entry) in entries.iter().enumerate() {
            tables
                .by_leading_name
                .entry(entry.leading_name().to_string())
                .or_default()
                .push(i);
            tables
                .by_path
                .entry(strip_source_extension(&entry.file_path).to_string())
                .or_default()
                .push(i);
            tables
                .by_problem
                .entry(entry.info.problem.clone())
                .or_default()
                .push(i);
            if entry.is_global {
                tables
                    .global
                    .entry(entry.leading_name().to_string())
                    .or_default()
                    .push(i);
            }
        }
        tables.entries = entries;
        tables
    }

    /// Parses and indexes a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or an entry is invalid.
    pub fn from_json(content: &str) -> Result<Self, WhitelistError> {
        let dto: ApiListDto = serde_json::from_str(content)?;
        let entries = load(dto)?;
        debug!(entries = entries.len(), "Whitelist parsed");
        Ok(Self::new(entries))
    }

    /// Loads a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn from_file(path: &Path) -> Result<Self, WhitelistError> {
        let content = std::fs::read_to_string(path).map_err(|source| WhitelistError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tables = Self::from_json(&content)?;
        info!(path = %path.display(), entries = tables.len(), "Loaded SDK whitelist");
        Ok(tables)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in load order.
    #[must_use]
    pub fn entries(&self) -> &[ApiListItem] {
        &self.entries
    }

    fn pick(&self, ids: Option<&Vec<usize>>) -> Vec<&ApiListItem> {
        ids.map(|ids| ids.iter().filter_map(|&i| self.entries.get(i)).collect())
            .unwrap_or_default()
    }

    /// Entries whose outermost name is `name`.
    #[must_use]
    pub fn entries_named(&self, name: &str) -> Vec<&ApiListItem> {
        self.pick(self.by_leading_name.get(name))
    }

    /// Entries reachable through an import of `imported_name`.
    ///
    /// An entry matches when its outermost name is `imported_name` and
    /// either one of its import paths equals `module_specifier` or its file
    /// path is a suffix of `declaration_path`.
    #[must_use]
    pub fn entries_for_import(
        &self,
        module_specifier: &str,
        declaration_path: Option<&str>,
        imported_name: &str,
    ) -> Vec<&ApiListItem> {
        let declaration = declaration_path.map(|p| normalize_str(strip_source_extension(p)));
        self.entries_named(imported_name)
            .into_iter()
            .filter(|e| {
                e.matches_import(module_specifier)
                    || declaration.as_deref().is_some_and(|d| {
                        path_ends_with(d, strip_source_extension(&e.file_path))
                    })
            })
            .collect()
    }

    /// Global entries whose outermost name is `name`.
    #[must_use]
    pub fn global_entries(&self, name: &str) -> Vec<&ApiListItem> {
        self.pick(self.global.get(name))
    }

    /// Entries declared in a file whose stored path is a suffix of `path`.
    #[must_use]
    pub fn file_entries_matching(&self, path: &str) -> Vec<&ApiListItem> {
        let path = normalize_str(strip_source_extension(path));
        let mut hits: Vec<usize> = self
            .by_path
            .iter()
            .filter(|(stored, _)| path_ends_with(&path, stored))
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect();
        hits.sort_unstable();
        hits.into_iter().filter_map(|i| self.entries.get(i)).collect()
    }

    /// Entries with the given problem.
    #[must_use]
    pub fn entries_with_problem(&self, problem: &ApiProblem) -> Vec<&ApiListItem> {
        self.pick(self.by_problem.get(problem))
    }
}

static GLOBALS: OnceLock<WhitelistTables> = OnceLock::new();

/// Installs the process-wide whitelist tables.
///
/// # Errors
///
/// Returns [`InitError::AlreadyInitialized`] on every call after the first.
pub fn init_globals(tables: WhitelistTables) -> Result<(), InitError> {
    let entries = tables.len();
    GLOBALS
        .set(tables)
        .map_err(|_| InitError::AlreadyInitialized)?;
    info!(entries, "Process globals initialized");
    Ok(())
}

/// Process-wide whitelist tables, if [`init_globals`] ran.
#[must_use]
pub fn globals() -> Option<&'static WhitelistTables> {
    GLOBALS.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
        "api_list": [
            {
                "file_path": "api\\@ohos.foo.d.ts",
                "import_path": ["@ohos.foo"],
                "is_global": false,
                "api_info": {
                    "problem": "LimitedVoidType",
                    "api_name": "run",
                    "api_type": "MethodSignature",
                    "parent_api": [{ "api_name": "Foo", "api_type": "InterfaceDeclaration" }],
                    "method_return_type": "void | number"
                }
            },
            {
                "file_path": "api/global.d.ts",
                "import_path": [],
                "is_global": true,
                "api_info": {
                    "problem": "DuplicateDeclaration",
                    "api_name": "print",
                    "api_type": "FunctionDeclaration"
                }
            }
        ]
    }"#;

    #[test]
    fn loads_and_indexes() {
        let tables = WhitelistTables::from_json(SAMPLE).unwrap();
        assert_eq!(tables.len(), 2);
        let foo = tables.entries_named("Foo");
        assert_eq!(foo.len(), 1);
        assert_eq!(foo[0].file_path, "api/@ohos.foo.d.ts");
        assert_eq!(foo[0].qualified_name(), "Foo.run");
        assert_eq!(tables.global_entries("print").len(), 1);
        assert!(tables.global_entries("Foo").is_empty());
        assert_eq!(
            tables.entries_with_problem(&ApiProblem::LimitedVoidType).len(),
            1
        );
    }

    #[test]
    fn import_matching_by_specifier_or_path() {
        let tables = WhitelistTables::from_json(SAMPLE).unwrap();
        assert_eq!(tables.entries_for_import("@ohos.foo", None, "Foo").len(), 1);
        assert_eq!(
            tables
                .entries_for_import("./x", Some("/sdk/openharmony/ets/api/@ohos.foo.d.ts"), "Foo")
                .len(),
            1
        );
        assert!(tables.entries_for_import("@ohos.bar", None, "Foo").is_empty());
        assert!(tables.entries_for_import("@ohos.foo", None, "Bar").is_empty());
    }

    #[test]
    fn file_suffix_matching() {
        let tables = WhitelistTables::from_json(SAMPLE).unwrap();
        let hits = tables.file_entries_matching("/sdk/openharmony/ets/api/@ohos.foo.d.ts");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].info.name.as_str(), "run");
        assert!(tables.file_entries_matching("/sdk/other/@ohos.foo.d.ts").is_empty());
    }

    #[test]
    fn empty_name_is_rejected_with_context() {
        let json = r#"{ "api_list": [ { "api_info": { "problem": "OptionalMethod", "api_name": "" } } ] }"#;
        let err = WhitelistTables::from_json(json).unwrap_err();
        assert_eq!(err.to_string(), "api_list[0].api_info.api_name: name must not be empty");
    }
}
