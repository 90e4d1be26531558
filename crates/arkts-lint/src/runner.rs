//! Program-level driver: one linter pass per file, faults turned into
//! reportable violations.

use arkts_lint_core::{
    Autofixer, CancellationToken, Cancelled, Config, Edit, Fault, FaultId, LintResult,
    Location, ProcessCache, Program, RuleSet, SourceFile, Suggestion, Violation,
    WhitelistTables,
};
use arkts_lint_rules::{LintContext, Linter};
use std::path::PathBuf;
use tracing::{debug, info};

/// Errors raised while running the linter over a program.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The cancellation token fired while a file was being checked.
    #[error("lint run cancelled while checking {}", path.display())]
    Cancelled {
        /// File whose pass was aborted.
        path: PathBuf,
        /// Underlying signal.
        #[source]
        source: Cancelled,
    },
}

/// Runs the rule set over every checkable file of a program.
pub struct Runner<'a> {
    config: Config,
    rules: RuleSet,
    whitelist: Option<&'a WhitelistTables>,
    autofixer: Option<&'a dyn Autofixer>,
    cancel: CancellationToken,
}

impl<'a> Runner<'a> {
    /// Creates a runner; the active rules follow `config`.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let rules = RuleSet::from_config(&config);
        Self {
            config,
            rules,
            whitelist: None,
            autofixer: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Restricts reporting to `rules` on top of the configuration.
    #[must_use]
    pub fn only(mut self, rules: impl IntoIterator<Item = FaultId>) -> Self {
        self.rules = self.rules.only(rules);
        self
    }

    /// Uses `tables` instead of the process-wide whitelist.
    #[must_use]
    pub fn whitelist(mut self, tables: &'a WhitelistTables) -> Self {
        self.whitelist = Some(tables);
        self
    }

    /// Installs the auto-fix bridge.
    #[must_use]
    pub fn autofixer(mut self, fixer: &'a dyn Autofixer) -> Self {
        self.autofixer = Some(fixer);
        self
    }

    /// Sets the token polled by every file pass.
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// The effective configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Lints every file of `program` in program order.
    ///
    /// Declaration files, default libraries and files matching the
    /// analyzer's exclude patterns are skipped. One [`ProcessCache`] is
    /// shared by all passes.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Cancelled`] if the token fires; no partial
    /// result is returned.
    pub fn run(&self, program: &Program) -> Result<LintResult, RunError> {
        info!(
            files = program.file_count(),
            arkts2 = self.config.linter.arkts2,
            "Starting lint run"
        );
        let mut cache = ProcessCache::new();
        let mut result = LintResult::new();

        for (file_id, file) in program.iter_files() {
            if file.is_declaration_file || file.is_default_library {
                debug!(path = %file.path.display(), "Skipping declaration file");
                continue;
            }
            if self.config.analyzer.is_excluded(&file.path) {
                debug!(path = %file.path.display(), "Skipping excluded file");
                continue;
            }
            let Some(mut ctx) = LintContext::new(program, file_id, &mut cache) else {
                continue;
            };
            ctx = ctx
                .options(self.config.linter.clone())
                .rules(self.rules.clone())
                .cancellation(self.cancel.clone());
            if let Some(tables) = self.whitelist {
                ctx = ctx.whitelist(tables);
            }
            if let Some(fixer) = self.autofixer {
                ctx = ctx.autofixer(fixer);
            }

            let faults = Linter::new(ctx).run().map_err(|source| RunError::Cancelled {
                path: file.path.clone(),
                source,
            })?;
            debug!(
                path = %file.path.display(),
                faults = faults.faults.len(),
                "File checked"
            );
            result.files_checked += 1;
            result
                .violations
                .extend(faults.faults.iter().map(|f| self.violation(file, f)));
        }

        info!(
            files_checked = result.files_checked,
            violations = result.violations.len(),
            "Lint run finished"
        );
        Ok(result)
    }

    fn violation(&self, file: &SourceFile, fault: &Fault) -> Violation {
        let rule = fault.rule;
        let severity = self
            .config
            .rule_severity(rule)
            .unwrap_or_else(|| rule.default_severity());
        let location = Location::new(file.path.clone(), fault.line, fault.column)
            .with_span(fault.range.start as usize, fault.range.len() as usize);
        let violation = Violation::new(rule.code(), rule.name(), severity, location, rule.description());
        let Some(fix) = &fault.fix else {
            return violation;
        };
        let edits = fix
            .iter()
            .map(|r| {
                let (line, column) = file.line_col(r.range.start);
                let at = Location::new(file.path.clone(), line, column)
                    .with_span(r.range.start as usize, r.range.len() as usize);
                Edit::new(at, r.text.clone())
            })
            .collect();
        violation.with_suggestion(Suggestion::with_edits("apply the automatic fix", edits))
    }
}

impl std::fmt::Debug for Runner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("config", &self.config)
            .field("rules", &self.rules)
            .field("autofixer", &self.autofixer.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arkts_lint_core::{NodeFlags, ProgramBuilder, Severity, TreeBuilder};

    fn var_file(path: &str) -> SourceFile {
        let mut b = TreeBuilder::new(path);
        let one = b.number("1");
        let (stmt, _) = b.variable(NodeFlags::NONE, "x", None, Some(one));
        b.finish([stmt])
    }

    fn program(files: impl IntoIterator<Item = SourceFile>) -> Program {
        let mut p = ProgramBuilder::new();
        for file in files {
            p.add_file(file);
        }
        p.build()
    }

    #[test]
    fn test_declaration_and_excluded_files_are_skipped() {
        let program = program([
            var_file("entry/src/main/ets/a.ets"),
            var_file("entry/src/main/ets/b.d.ets").declaration_file(true),
            var_file("entry/oh_modules/dep/index.ets"),
        ]);
        let result = Runner::new(Config::default()).run(&program).unwrap();
        assert_eq!(result.files_checked, 1);
        assert!(result
            .violations
            .iter()
            .all(|v| v.location.file == PathBuf::from("entry/src/main/ets/a.ets")));
    }

    #[test]
    fn test_fault_becomes_violation() {
        let program = program([var_file("a.ets")]);
        let result = Runner::new(Config::default()).run(&program).unwrap();
        let var = result
            .violations
            .iter()
            .find(|v| v.code == FaultId::VarDeclaration.code())
            .unwrap();
        assert_eq!(var.rule, FaultId::VarDeclaration.name());
        assert_eq!(var.severity, FaultId::VarDeclaration.default_severity());
        assert_eq!(var.message, FaultId::VarDeclaration.description());
        assert!(var.suggestion.is_none());
    }

    #[test]
    fn test_severity_override() {
        let config = Config::parse(
            r#"
[rules.arkts-no-var]
severity = "info"
"#,
        )
        .unwrap();
        let program = program([var_file("a.ets")]);
        let result = Runner::new(config).run(&program).unwrap();
        let var = result
            .violations
            .iter()
            .find(|v| v.code == FaultId::VarDeclaration.code())
            .unwrap();
        assert_eq!(var.severity, Severity::Info);
    }

    #[test]
    fn test_cancelled_run_has_no_result() {
        let mut b = TreeBuilder::new("a.ets");
        let name = b.ident("C");
        let class = b.class_decl([], Some(name), [], []);
        let program = program([b.finish([class])]);
        let token = CancellationToken::new();
        token.cancel();
        let err = Runner::new(Config::default())
            .cancellation(token)
            .run(&program)
            .unwrap_err();
        assert!(matches!(err, RunError::Cancelled { ref path, .. } if path == &PathBuf::from("a.ets")));
    }
}
