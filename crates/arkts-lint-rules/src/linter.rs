//! The per-file linter.
//!
//! A [`Linter`] owns the fault sink and the per-file caches for exactly one
//! pass over one file. Handlers receive `&mut Linter` and the visited node;
//! they compose their checks by calling each other directly.

use crate::context::LintContext;
use crate::dispatch;
use arkts_lint_core::autofix::{Autofixer, FixSite};
use arkts_lint_core::utils::directives::find_directives;
use arkts_lint_core::walker::try_walk;
use arkts_lint_core::whitelist::{globals, ApiListItem};
use arkts_lint_core::{
    Cancelled, FaultId, FileId, FaultLog, FileFaults, Fix, LinterOptions, NodeFlags, NodeId, NodeKind,
    NodeRef, Oracle, ProcessCache, RuleSet, SourceFile, SymbolId, TextRange, TypeId,
    WhitelistTables,
};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// State accumulated while walking one file.
#[derive(Debug, Default)]
pub(crate) struct FileState<'a> {
    /// The file starts with `'use static'`.
    pub(crate) use_static: bool,
    /// Imported name → SDK whitelist entries, filled as imports are visited.
    pub(crate) interface_map: FxHashMap<String, Vec<&'a ApiListItem>>,
    /// Folded values of `const` variables and enum members.
    pub(crate) const_cache: FxHashMap<SymbolId, Option<f64>>,
    /// UI interfaces used without an import, in first-use order.
    pub(crate) interfaces_need_to_import: Vec<(String, NodeId)>,
    /// Names bound by the file's imports.
    pub(crate) interfaces_already_imported: FxHashSet<String>,
    /// Namespace declarations whose members are checked after the walk.
    pub(crate) pending_namespaces: Vec<NodeId>,
    /// Top-level classes and functions the file exports, computed on first use.
    pub(crate) exported_decls: Option<FxHashSet<NodeId>>,
}

/// Lints one file.
pub struct Linter<'a> {
    ctx: LintContext<'a>,
    rules: RuleSet,
    log: FaultLog,
    pub(crate) state: FileState<'a>,
    fixer_present: bool,
}

impl std::fmt::Debug for Linter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Linter")
            .field("ctx", &self.ctx)
            .field("faults", &self.log.faults().len())
            .finish_non_exhaustive()
    }
}

/// Declarations at which a pass polls for cancellation.
fn is_checkpoint(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::ClassDeclaration
            | NodeKind::InterfaceDeclaration
            | NodeKind::FunctionDeclaration
            | NodeKind::ModuleDeclaration
            | NodeKind::ImportDeclaration
    )
}

fn should_stop(file: &SourceFile, window: Option<TextRange>, node: NodeId) -> bool {
    if file.has_flags(node, NodeFlags::SYNTHESIZED) || file.kind(node).is_terminal_token() {
        return true;
    }
    window.is_some_and(|w| node != file.root && !w.intersects(file.range(node)))
}

impl<'a> Linter<'a> {
    /// Creates a linter for the context's file.
    #[must_use]
    pub fn new(mut ctx: LintContext<'a>) -> Self {
        let rules = ctx
            .rules
            .take()
            .unwrap_or_else(|| RuleSet::all(ctx.options.arkts2));
        let fixer_present = ctx.options.enable_autofix && ctx.autofixer.is_some();
        Self {
            ctx,
            rules,
            log: FaultLog::new(),
            state: FileState::default(),
            fixer_present,
        }
    }

    /// Walks the file and runs the finishing analyses.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if the token was cancelled; no partial result
    /// is produced.
    pub fn run(mut self) -> Result<FileFaults, Cancelled> {
        let file = self.file();
        self.state.use_static = file.has_use_static_pragma();
        debug!(
            path = %file.path.display(),
            use_static = self.state.use_static,
            nodes = file.len(),
            "Linting file"
        );
        let window = self.ctx.options.check_range;
        try_walk(
            file,
            file.root,
            |node| self.visit(node),
            |node| should_stop(file, window, node),
        )?;
        self.check_directives();
        self.finish();
        debug!(path = %file.path.display(), faults = self.log.faults().len(), "File done");
        Ok(self.log.into_file_faults(file.path.clone()))
    }

    fn visit(&mut self, node: NodeId) -> Result<(), Cancelled> {
        let kind = self.file().kind(node);
        if is_checkpoint(kind) {
            self.ctx.cancel.check()?;
        }
        if let Some(rule) = dispatch::count_only(kind) {
            self.report(node, rule);
        } else if let Some(handler) = dispatch::handler_for(kind) {
            handler(self, node);
        }
        Ok(())
    }

    fn check_directives(&mut self) {
        if !self.enabled(FaultId::ErrorSuppression) {
            return;
        }
        for directive in find_directives(&self.file().comments) {
            self.report_range(directive.range, FaultId::ErrorSuppression);
        }
    }

    // ── Accessors ──

    /// File under check.
    pub(crate) fn file(&self) -> &'a SourceFile {
        self.ctx.file
    }

    pub(crate) fn oracle(&self) -> &'a dyn Oracle {
        self.ctx.oracle
    }

    pub(crate) fn options(&self) -> &LinterOptions {
        &self.ctx.options
    }

    /// Tables given to this pass, else the process globals.
    pub(crate) fn whitelist(&self) -> Option<&'a WhitelistTables> {
        self.ctx.whitelist.or_else(|| globals())
    }

    pub(crate) fn cache(&mut self) -> &mut ProcessCache {
        &mut *self.ctx.cache
    }

    /// Static-dialect tier is on.
    pub(crate) fn arkts2(&self) -> bool {
        self.rules.arkts2()
    }

    pub(crate) fn file_id(&self) -> FileId {
        self.ctx.file_id
    }

    pub(crate) fn at(&self, node: NodeId) -> NodeRef {
        NodeRef::new(self.ctx.file_id, node)
    }

    pub(crate) fn type_at(&self, node: NodeId) -> Option<TypeId> {
        self.oracle().type_at(self.at(node))
    }

    pub(crate) fn contextual_type_at(&self, node: NodeId) -> Option<TypeId> {
        self.oracle().contextual_type_at(self.at(node))
    }

    pub(crate) fn symbol_at(&self, node: NodeId) -> Option<SymbolId> {
        self.oracle().symbol_at(self.at(node))
    }

    pub(crate) fn true_symbol_at(&self, node: NodeId) -> Option<SymbolId> {
        self.oracle().true_symbol_at(self.at(node))
    }

    /// Returns true if a declaration lives in the file under check.
    pub(crate) fn is_local(&self, decl: NodeRef) -> bool {
        decl.file == self.ctx.file_id
    }

    // ── Reporting ──

    /// Returns true if `rule` may be reported in this file.
    pub(crate) fn enabled(&self, rule: FaultId) -> bool {
        self.rules.allows(rule, self.state.use_static)
    }

    /// Reports `rule` at `node` if it is enabled.
    pub(crate) fn report(&mut self, node: NodeId, rule: FaultId) {
        let range = self.file().range(node);
        self.report_range(range, rule);
    }

    pub(crate) fn report_range(&mut self, range: TextRange, rule: FaultId) {
        if self.enabled(rule) {
            self.log.report(self.ctx.file, rule, range, None);
        }
    }

    /// Reports `rule` at `node`, asking the auto-fix bridge for a fix.
    ///
    /// The bridge is not called when the rule is disabled or fixing is off.
    pub(crate) fn report_with_fix(
        &mut self,
        node: NodeId,
        rule: FaultId,
        fix: impl FnOnce(&dyn Autofixer, &FixSite<'_>) -> Option<Fix>,
    ) {
        self.report_with_fix_at(node, node, rule, fix);
    }

    /// Like [`Self::report_with_fix`], but the fix is requested for `site`
    /// instead of the reported node.
    pub(crate) fn report_with_fix_at(
        &mut self,
        node: NodeId,
        site: NodeId,
        rule: FaultId,
        fix: impl FnOnce(&dyn Autofixer, &FixSite<'_>) -> Option<Fix>,
    ) {
        if !self.enabled(rule) {
            return;
        }
        let fix = match self.ctx.autofixer {
            Some(fixer) if self.fixer_present => {
                let site = FixSite {
                    oracle: self.ctx.oracle,
                    file: self.ctx.file,
                    file_id: self.ctx.file_id,
                    node: site,
                };
                fix(fixer, &site)
            }
            _ => None,
        };
        let range = self.file().range(node);
        self.log.report(self.ctx.file, rule, range, fix);
    }

    /// Faults recorded so far.
    #[cfg(test)]
    pub(crate) fn faults(&self) -> &[arkts_lint_core::Fault] {
        self.log.faults()
    }
}
