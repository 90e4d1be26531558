//! Linter switches and the active rule set.

use crate::config::Config;
use crate::fault::{FaultId, RuleTier};
use crate::syntax::TextRange;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default compatible SDK API level.
pub const DEFAULT_COMPATIBLE_SDK_VERSION: u32 = 12;
/// Default compatible SDK stage.
pub const DEFAULT_COMPATIBLE_SDK_VERSION_STAGE: &str = "beta1";

/// Behaviour switches of the linter, the `[linter]` config table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinterOptions {
    /// Enables the static-dialect rule tier.
    pub arkts2: bool,
    /// Applies runtime semantics (decorators, return-type annotations).
    pub use_rt_logic: bool,
    /// Flags class objects used as values in property accesses.
    pub advanced_class_checks: bool,
    /// Relaxes standard-library restrictions for supported call patterns.
    pub use_relaxed_rules: bool,
    /// Asks the auto-fix bridge for fixes.
    pub enable_autofix: bool,
    /// Oldest SDK API level the project must run on.
    pub compatible_sdk_version: u32,
    /// Stage of that SDK level (`beta1`, `beta2`, `beta3`, ...).
    pub compatible_sdk_version_stage: String,
    /// Incremental window; nodes outside it are skipped.
    #[serde(skip)]
    pub check_range: Option<TextRange>,
}

impl Default for LinterOptions {
    fn default() -> Self {
        Self {
            arkts2: false,
            use_rt_logic: false,
            advanced_class_checks: false,
            use_relaxed_rules: false,
            enable_autofix: false,
            compatible_sdk_version: DEFAULT_COMPATIBLE_SDK_VERSION,
            compatible_sdk_version_stage: DEFAULT_COMPATIBLE_SDK_VERSION_STAGE.to_string(),
            check_range: None,
        }
    }
}

impl LinterOptions {
    /// Enables the static-dialect tier.
    #[must_use]
    pub fn arkts2(mut self, yes: bool) -> Self {
        self.arkts2 = yes;
        self
    }

    /// Enables auto-fix requests.
    #[must_use]
    pub fn autofix(mut self, yes: bool) -> Self {
        self.enable_autofix = yes;
        self
    }

    /// Restricts checks to an incremental window.
    #[must_use]
    pub fn check_range(mut self, range: TextRange) -> Self {
        self.check_range = Some(range);
        self
    }

    /// Returns true if the compatible SDK predates sendable functions and
    /// type aliases (API 12 beta3).
    #[must_use]
    pub fn sdk_predates_sendable_functions(&self) -> bool {
        const SENDABLE_FUNCTION_SDK: u32 = 12;
        if self.compatible_sdk_version != SENDABLE_FUNCTION_SDK {
            return self.compatible_sdk_version < SENDABLE_FUNCTION_SDK;
        }
        matches!(self.compatible_sdk_version_stage.as_str(), "beta1" | "beta2")
    }
}

/// The set of rules a file pass may report.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    disabled: HashSet<FaultId>,
    only: Option<HashSet<FaultId>>,
    arkts2: bool,
}

impl RuleSet {
    /// Every rule enabled, static tier per `arkts2`.
    #[must_use]
    pub fn all(arkts2: bool) -> Self {
        Self {
            arkts2,
            ..Self::default()
        }
    }

    /// Builds the rule set from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let disabled = FaultId::ALL
            .iter()
            .copied()
            .filter(|f| !config.is_rule_enabled(*f))
            .collect();
        Self {
            disabled,
            only: None,
            arkts2: config.linter.arkts2,
        }
    }

    /// Restricts reporting to `rules`.
    #[must_use]
    pub fn only(mut self, rules: impl IntoIterator<Item = FaultId>) -> Self {
        self.only = Some(rules.into_iter().collect());
        self
    }

    /// Disables a rule.
    #[must_use]
    pub fn disable(mut self, rule: FaultId) -> Self {
        self.disabled.insert(rule);
        self
    }

    /// Returns true if the static tier is on.
    #[must_use]
    pub fn arkts2(&self) -> bool {
        self.arkts2
    }

    /// Returns true if `rule` may be reported in a file whose
    /// `'use static'` state is `use_static`.
    #[must_use]
    pub fn allows(&self, rule: FaultId, use_static: bool) -> bool {
        if self.disabled.contains(&rule) {
            return false;
        }
        if self.only.as_ref().is_some_and(|only| !only.contains(&rule)) {
            return false;
        }
        match rule.tier() {
            RuleTier::Base => true,
            RuleTier::Static => self.arkts2,
            RuleTier::Interop => self.arkts2 && use_static,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_gate_rules() {
        let base = RuleSet::all(false);
        assert!(base.allows(FaultId::VarDeclaration, false));
        assert!(!base.allows(FaultId::RuntimeArrayCheck, false));
        let strict = RuleSet::all(true);
        assert!(strict.allows(FaultId::RuntimeArrayCheck, false));
        assert!(!strict.allows(FaultId::InteropImportJs, false));
        assert!(strict.allows(FaultId::InteropImportJs, true));
    }

    #[test]
    fn only_and_disable() {
        let rules = RuleSet::all(false)
            .only([FaultId::VarDeclaration, FaultId::AnyType])
            .disable(FaultId::AnyType);
        assert!(rules.allows(FaultId::VarDeclaration, false));
        assert!(!rules.allows(FaultId::AnyType, false));
        assert!(!rules.allows(FaultId::LocalFunction, false));
    }

    #[test]
    fn sdk_stage_comparison() {
        let mut options = LinterOptions::default();
        assert!(options.sdk_predates_sendable_functions());
        options.compatible_sdk_version_stage = "beta3".into();
        assert!(!options.sdk_predates_sendable_functions());
        options.compatible_sdk_version = 11;
        assert!(options.sdk_predates_sendable_functions());
    }
}
