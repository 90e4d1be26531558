//! OS-independent path comparison.
//!
//! Declarations can be reached through different roots (an SDK checkout, a
//! build cache, an IDE workspace), so stored paths are compared by segment
//! suffix rather than equality.

use std::path::Path;

/// Renders a path with forward slashes.
#[must_use]
pub fn normalize_path(path: &Path) -> String {
    normalize_str(&path.to_string_lossy())
}

/// Replaces backslashes with forward slashes and collapses repeated separators.
#[must_use]
pub fn normalize_str(path: &str) -> String {
    let replaced = path.replace('\\', "/");
    let mut out = String::with_capacity(replaced.len());
    let mut last_slash = false;
    for c in replaced.chars() {
        if c == '/' {
            if !last_slash {
                out.push(c);
            }
            last_slash = true;
        } else {
            out.push(c);
            last_slash = false;
        }
    }
    out
}

/// Returns true if `path` ends with the segments of `suffix`.
///
/// Matching is per segment: `api/@ohos.foo.d.ts` matches
/// `/sdk/ets/api/@ohos.foo.d.ts` but not `/sdk/ets/myapi/@ohos.foo.d.ts`.
#[must_use]
pub fn path_ends_with(path: &str, suffix: &str) -> bool {
    let path = normalize_str(path);
    let suffix = normalize_str(suffix);
    let suffix = suffix.trim_start_matches("./").trim_start_matches('/');
    if suffix.is_empty() {
        return false;
    }
    let path_parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let suffix_parts: Vec<&str> = suffix.split('/').filter(|s| !s.is_empty()).collect();
    path_parts.len() >= suffix_parts.len() && path_parts.ends_with(&suffix_parts)
}

/// Checks if a slash-separated path matches a pattern.
///
/// Supports wildcards:
/// - `*` matches any single segment
/// - `**` matches any number of segments
#[must_use]
pub fn path_matches(path: &str, pattern: &str) -> bool {
    let path = normalize_str(path);
    let pattern = normalize_str(pattern);
    let path_parts: Vec<&str> = path.split('/').collect();
    let pattern_parts: Vec<&str> = pattern.split('/').collect();

    match_parts(&path_parts, &pattern_parts)
}

fn match_parts(path: &[&str], pattern: &[&str]) -> bool {
    let Some((&first, rest)) = pattern.split_first() else {
        return path.is_empty();
    };

    match first {
        "**" => (0..=path.len()).any(|i| match_parts(&path[i..], rest)),
        "*" => !path.is_empty() && match_parts(&path[1..], rest),
        literal => path.first() == Some(&literal) && match_parts(&path[1..], rest),
    }
}

/// File name without any of the known source extensions.
#[must_use]
pub fn strip_source_extension(path: &str) -> &str {
    const EXTENSIONS: &[&str] = &[".d.ets", ".d.ts", ".ets", ".ts", ".js"];
    EXTENSIONS
        .iter()
        .find_map(|ext| path.strip_suffix(ext))
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_backslashes() {
        assert_eq!(normalize_str(r"C:\sdk\\api\a.d.ts"), "C:/sdk/api/a.d.ts");
    }

    #[test]
    fn suffix_matches_whole_segments() {
        assert!(path_ends_with(
            "/sdk/openharmony/ets/api/@ohos.foo.d.ts",
            "api/@ohos.foo.d.ts"
        ));
        assert!(path_ends_with(r"D:\sdk\api\@ohos.foo.d.ts", "api/@ohos.foo.d.ts"));
        assert!(!path_ends_with("/sdk/myapi/@ohos.foo.d.ts", "api/@ohos.foo.d.ts"));
        assert!(!path_ends_with("/sdk/api/@ohos.foo.d.ts", ""));
    }

    #[test]
    fn glob_segments() {
        assert!(path_matches("src/gen/a.ets", "src/**"));
        assert!(path_matches("src/gen/a.ets", "**/gen/*"));
        assert!(!path_matches("src/gen/a.ets", "lib/**"));
        assert!(path_matches("a.ets", "a.ets"));
    }

    #[test]
    fn strips_declaration_extension_first() {
        assert_eq!(strip_source_extension("x/y.d.ets"), "x/y");
        assert_eq!(strip_source_extension("x/y.ets"), "x/y");
        assert_eq!(strip_source_extension("x/y"), "x/y");
    }
}
