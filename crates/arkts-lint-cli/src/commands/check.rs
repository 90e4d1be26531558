//! Check command implementation.

use anyhow::{bail, Context, Result};
use arkts_lint::{init_globals, Config, FaultId, LintResult, Program, Runner, WhitelistTables};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Command-line overrides of the check command.
#[derive(Debug, Default)]
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes to report.
    pub rules: Option<String>,
    /// Whitelist JSON overriding the configured one.
    pub whitelist: Option<PathBuf>,
    /// Forces the static-dialect rule tier.
    pub arkts2: bool,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
}

/// Runs the check command and prints the result.
pub fn run(path: &Path, source: &ConfigSource, options: CheckOptions) -> Result<LintResult> {
    let format = options.format;
    let result = lint(path, source, options)?;
    super::output::print(&result, format)?;
    Ok(result)
}

/// Lints every snapshot under `path` without printing.
pub fn lint(path: &Path, source: &ConfigSource, options: CheckOptions) -> Result<LintResult> {
    let mut config = source.load()?;
    apply_overrides(&mut config, &options);

    if let Some(whitelist) = &config.analyzer.whitelist {
        let tables = WhitelistTables::from_file(whitelist)
            .with_context(|| format!("Failed to load whitelist: {}", whitelist.display()))?;
        if let Err(e) = init_globals(tables) {
            tracing::warn!("{e}");
        }
    }

    let snapshots = collect_snapshots(path)?;
    if snapshots.is_empty() {
        bail!("No program snapshots found at {}", path.display());
    }

    let mut runner = Runner::new(config);
    if let Some(filter) = &options.rules {
        runner = runner.only(parse_rules(filter));
    }

    tracing::info!(
        "Checking {} snapshot(s) under {}",
        snapshots.len(),
        path.display()
    );

    let mut result = LintResult::new();
    for snapshot in &snapshots {
        let program = Program::from_file(snapshot)
            .with_context(|| format!("Failed to load snapshot: {}", snapshot.display()))?;
        let partial = runner
            .run(&program)
            .with_context(|| format!("Lint run failed: {}", snapshot.display()))?;
        result.extend(partial);
    }
    Ok(result)
}

fn apply_overrides(config: &mut Config, options: &CheckOptions) {
    if options.arkts2 {
        config.linter.arkts2 = true;
    }
    if let Some(whitelist) = &options.whitelist {
        config.analyzer.whitelist = Some(whitelist.clone());
    }
    config
        .analyzer
        .exclude
        .extend(options.exclude.iter().cloned());
}

/// Snapshot files: `path` itself, or every `*.json` below it in walk order.
fn collect_snapshots(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut snapshots = Vec::new();
    for entry in WalkBuilder::new(path).sort_by_file_name(|a, b| a.cmp(b)).build() {
        let entry = entry.context("Failed to walk snapshot directory")?;
        let file = entry.path();
        if file.is_file() && file.extension().is_some_and(|e| e == "json") {
            snapshots.push(file.to_path_buf());
        }
    }
    Ok(snapshots)
}

fn parse_rules(filter: &str) -> Vec<FaultId> {
    filter
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter_map(|name| {
            let id = FaultId::parse(name);
            if id.is_none() {
                tracing::warn!("Unknown rule: {}", name);
            }
            id
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_rules_accepts_names_and_codes() {
        assert_eq!(
            parse_rules("arkts-no-var, ARK041,,bogus"),
            vec![FaultId::VarDeclaration, FaultId::CommaOperator]
        );
    }

    #[test]
    fn test_collect_snapshots_walks_json_files_in_order() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("b.json"), "{}").unwrap();
        fs::write(tmp.path().join("a.json"), "{}").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();
        fs::write(tmp.path().join("nested/c.json"), "{}").unwrap();

        let found = collect_snapshots(tmp.path()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.strip_prefix(tmp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.json"),
                PathBuf::from("b.json"),
                PathBuf::from("nested/c.json"),
            ]
        );
    }

    #[test]
    fn test_single_file_is_its_own_snapshot() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("program.json");
        fs::write(&file, "{}").unwrap();
        assert_eq!(collect_snapshots(&file).unwrap(), vec![file]);
    }

    #[test]
    fn test_overrides_extend_config() {
        let mut config = Config::default();
        let options = CheckOptions {
            arkts2: true,
            whitelist: Some(PathBuf::from("sdk.json")),
            exclude: vec!["**/generated/**".to_string()],
            ..CheckOptions::default()
        };
        apply_overrides(&mut config, &options);

        assert!(config.linter.arkts2);
        assert_eq!(config.analyzer.whitelist, Some(PathBuf::from("sdk.json")));
        assert!(config.analyzer.is_excluded(Path::new("entry/generated/a.ets")));
        assert!(config.analyzer.is_excluded(Path::new("entry/oh_modules/a.ets")));
    }

    fn write_var_snapshot(dir: &Path) -> PathBuf {
        use arkts_lint::{NodeFlags, ProgramBuilder, TreeBuilder};
        let mut b = TreeBuilder::new("entry/src/main/ets/a.ets");
        let one = b.number("1");
        let (stmt, _) = b.variable(NodeFlags::NONE, "x", None, Some(one));
        let mut p = ProgramBuilder::new();
        p.add_file(b.finish([stmt]));
        let path = dir.join("program.json");
        fs::write(&path, serde_json::to_string(&p.build()).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_snapshot_is_linted_with_project_config() {
        let tmp = TempDir::new().unwrap();
        let snapshot = write_var_snapshot(tmp.path());
        let config = tmp.path().join("arkts-lint.toml");
        fs::write(&config, "[rules.arkts-no-var]\nseverity = \"warning\"\n").unwrap();

        let result = lint(
            &snapshot,
            &ConfigSource::Project(config),
            CheckOptions::default(),
        )
        .unwrap();
        assert_eq!(result.files_checked, 1);
        let var = result
            .violations
            .iter()
            .find(|v| v.code == FaultId::VarDeclaration.code())
            .unwrap();
        assert_eq!(var.severity, arkts_lint::Severity::Warning);
    }

    #[test]
    fn test_rules_filter_limits_report() {
        let tmp = TempDir::new().unwrap();
        let snapshot = write_var_snapshot(tmp.path());
        let options = CheckOptions {
            rules: Some("arkts-no-comma-outside-loops".to_string()),
            ..CheckOptions::default()
        };

        let result = lint(&snapshot, &ConfigSource::Default, options).unwrap();
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = lint(tmp.path(), &ConfigSource::Default, CheckOptions::default()).unwrap_err();
        assert!(err.to_string().contains("No program snapshots"));
    }
}
