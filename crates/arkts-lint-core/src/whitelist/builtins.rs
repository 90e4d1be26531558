//! Restriction tables compiled into the linter.

/// Global functions of the standard library that are restricted.
pub const LIMITED_GLOBAL_API: &[&str] = &["eval"];

/// Restricted members of `Object` and `ObjectConstructor`.
pub const LIMITED_STD_OBJECT_API: &[&str] = &[
    "__proto__",
    "__defineGetter__",
    "__defineSetter__",
    "__lookupGetter__",
    "__lookupSetter__",
    "assign",
    "create",
    "defineProperties",
    "defineProperty",
    "freeze",
    "fromEntries",
    "getOwnPropertyDescriptor",
    "getOwnPropertyDescriptors",
    "getOwnPropertySymbols",
    "getPrototypeOf",
    "hasOwnProperty",
    "is",
    "isExtensible",
    "isFrozen",
    "isPrototypeOf",
    "isSealed",
    "preventExtensions",
    "propertyIsEnumerable",
    "seal",
    "setPrototypeOf",
];

/// Restricted members of `Reflect`.
pub const LIMITED_STD_REFLECT_API: &[&str] = &[
    "apply",
    "construct",
    "defineProperty",
    "deleteProperty",
    "getOwnPropertyDescriptor",
    "getPrototypeOf",
    "isExtensible",
    "preventExtensions",
    "setPrototypeOf",
];

/// Restricted members of `ProxyHandler`.
pub const LIMITED_STD_PROXYHANDLER_API: &[&str] = &[
    "apply",
    "construct",
    "defineProperty",
    "deleteProperty",
    "get",
    "getOwnPropertyDescriptor",
    "getPrototypeOf",
    "has",
    "isExtensible",
    "ownKeys",
    "preventExtensions",
    "set",
    "setPrototypeOf",
];

/// `Symbol` members that stay usable.
pub const ALLOWED_STD_SYMBOL_API: &[&str] = &["iterator"];

/// Utility types that have no counterpart in the strict dialect.
pub const LIMITED_STANDARD_UTILITY_TYPES: &[&str] = &[
    "Awaited",
    "Pick",
    "Omit",
    "Exclude",
    "Extract",
    "NonNullable",
    "Parameters",
    "ConstructorParameters",
    "ReturnType",
    "InstanceType",
    "ThisParameterType",
    "OmitThisParameter",
    "ThisType",
    "Uppercase",
    "Lowercase",
    "Capitalize",
    "Uncapitalize",
];

/// Decorators permitted on sendable declarations.
pub const SENDABLE_DECORATORS: &[&str] = &["Sendable"];

/// Name of the sendable decorator.
pub const SENDABLE_DECORATOR: &str = "Sendable";

/// Type name that marks dynamic objects.
pub const ES_OBJECT: &str = "ESObject";

/// UI decorators and components that the static dialect requires to be
/// imported explicitly.
pub const UI_INTERFACES: &[&str] = &[
    "Builder",
    "BuilderParam",
    "Component",
    "ComponentV2",
    "Consume",
    "Entry",
    "Extend",
    "Link",
    "LocalStorageLink",
    "LocalStorageProp",
    "ObjectLink",
    "Observed",
    "Preview",
    "Prop",
    "Provide",
    "Reusable",
    "State",
    "StorageLink",
    "StorageProp",
    "Styles",
    "Watch",
    "Blank",
    "Button",
    "Column",
    "Divider",
    "Flex",
    "ForEach",
    "Grid",
    "GridItem",
    "Image",
    "LazyForEach",
    "List",
    "ListItem",
    "Navigation",
    "Row",
    "Scroll",
    "Stack",
    "Tabs",
    "TabContent",
    "Text",
    "TextInput",
    "Toggle",
];

/// Module the UI interfaces are imported from.
pub const UI_MODULE: &str = "@kit.ArkUI";

/// Restriction of a standard-library member access or call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdApiRestriction {
    /// The member is restricted outright.
    Limited,
    /// The member belongs to the `Symbol` API.
    Symbol,
}

/// Looks up a restriction for `name` accessed on `parent`.
///
/// `parent` is `None` for global functions.
#[must_use]
pub fn limited_std_api(parent: Option<&str>, name: &str) -> Option<StdApiRestriction> {
    let list = match parent {
        None => {
            if name == "Symbol" || name == "SymbolConstructor" {
                return Some(StdApiRestriction::Symbol);
            }
            LIMITED_GLOBAL_API
        }
        Some("Object" | "ObjectConstructor") => LIMITED_STD_OBJECT_API,
        Some("Reflect") => LIMITED_STD_REFLECT_API,
        Some("ProxyHandler") => LIMITED_STD_PROXYHANDLER_API,
        Some("Symbol" | "SymbolConstructor") => return Some(StdApiRestriction::Symbol),
        Some(_) => return None,
    };
    list.contains(&name).then_some(StdApiRestriction::Limited)
}

/// Returns true for utility types without a strict-dialect counterpart.
#[must_use]
pub fn is_limited_utility_type(name: &str) -> bool {
    LIMITED_STANDARD_UTILITY_TYPES.contains(&name)
}

/// Returns true for UI names that need an explicit import.
#[must_use]
pub fn is_ui_interface(name: &str) -> bool {
    UI_INTERFACES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_api_lookup() {
        assert_eq!(limited_std_api(None, "eval"), Some(StdApiRestriction::Limited));
        assert_eq!(limited_std_api(None, "parseInt"), None);
        assert_eq!(limited_std_api(None, "Symbol"), Some(StdApiRestriction::Symbol));
        assert_eq!(
            limited_std_api(Some("Object"), "assign"),
            Some(StdApiRestriction::Limited)
        );
        assert_eq!(limited_std_api(Some("Object"), "keys"), None);
        assert_eq!(
            limited_std_api(Some("Reflect"), "apply"),
            Some(StdApiRestriction::Limited)
        );
        assert_eq!(
            limited_std_api(Some("Symbol"), "for"),
            Some(StdApiRestriction::Symbol)
        );
        assert_eq!(limited_std_api(Some("Math"), "max"), None);
    }

    #[test]
    fn partial_is_not_limited() {
        assert!(is_limited_utility_type("Pick"));
        assert!(!is_limited_utility_type("Partial"));
        assert!(!is_limited_utility_type("Record"));
    }
}
