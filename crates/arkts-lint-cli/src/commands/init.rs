//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "arkts-lint.toml";

const DEFAULT_CONFIG: &str = r#"# arkts-lint configuration

[linter]
# Static-dialect rule tier
arkts2 = false
# Runtime semantics for decorators and return types
use_rt_logic = false
# Flag class objects used as values
advanced_class_checks = false
# Ask the auto-fix bridge for fixes
enable_autofix = false
# Oldest SDK level the project must run on
compatible_sdk_version = 12
compatible_sdk_version_stage = "beta1"

[analyzer]
# Glob patterns over program file paths
exclude = [
    "**/oh_modules/**",
    "**/build/**",
]
# SDK whitelist JSON
# whitelist = "sdk-whitelist.json"

# Rule configurations, keyed by name or code

[rules.arkts-no-var]
enabled = true
# severity = "warning"  # Override default severity

# [rules.arkts-no-comma-outside-loops]
# enabled = false
"#;

/// Writes a default `arkts-lint.toml` into `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: arkts-lint check <snapshot.json>");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arkts_lint::Config;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert!(!config.linter.arkts2);
        assert_eq!(config.linter.compatible_sdk_version, 12);
        assert_eq!(config.analyzer.exclude.len(), 2);
        assert!(config.is_rule_enabled(arkts_lint::FaultId::VarDeclaration));
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "# mine").unwrap();

        assert!(run(tmp.path(), false).is_err());
        assert_eq!(
            std::fs::read_to_string(tmp.path().join(CONFIG_FILE)).unwrap(),
            "# mine"
        );

        run(tmp.path(), true).unwrap();
        assert_eq!(
            std::fs::read_to_string(tmp.path().join(CONFIG_FILE)).unwrap(),
            DEFAULT_CONFIG
        );
    }
}
