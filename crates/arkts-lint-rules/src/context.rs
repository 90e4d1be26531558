//! Inputs of one file pass.

use arkts_lint_core::{
    Autofixer, CancellationToken, FileId, LinterOptions, Oracle, ProcessCache, RuleSet,
    SourceFile, WhitelistTables,
};

/// Everything a [`Linter`](crate::Linter) needs to check one file.
///
/// ```ignore
/// let mut cache = ProcessCache::new();
/// let ctx = LintContext::new(&program, file_id, &mut cache)
///     .ok_or(MissingFile)?
///     .options(LinterOptions::default().arkts2(true));
/// let faults = Linter::new(ctx).run()?;
/// ```
pub struct LintContext<'a> {
    pub(crate) oracle: &'a dyn Oracle,
    pub(crate) file_id: FileId,
    pub(crate) file: &'a SourceFile,
    pub(crate) options: LinterOptions,
    pub(crate) rules: Option<RuleSet>,
    pub(crate) whitelist: Option<&'a WhitelistTables>,
    pub(crate) cache: &'a mut ProcessCache,
    pub(crate) autofixer: Option<&'a dyn Autofixer>,
    pub(crate) cancel: CancellationToken,
}

impl<'a> LintContext<'a> {
    /// Creates a context for `file_id`; `None` if the oracle does not know
    /// the file.
    #[must_use]
    pub fn new(oracle: &'a dyn Oracle, file_id: FileId, cache: &'a mut ProcessCache) -> Option<Self> {
        let file = oracle.file(file_id)?;
        Some(Self {
            oracle,
            file_id,
            file,
            options: LinterOptions::default(),
            rules: None,
            whitelist: None,
            cache,
            autofixer: None,
            cancel: CancellationToken::new(),
        })
    }

    /// Sets the linter switches.
    #[must_use]
    pub fn options(mut self, options: LinterOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the active rules; defaults to every rule of the configured tier.
    #[must_use]
    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Sets the SDK whitelist tables.
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

    /// Sets the cancellation token polled at checkpoint declarations.
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// The file under check.
    #[must_use]
    pub fn file(&self) -> &'a SourceFile {
        self.file
    }
}

impl std::fmt::Debug for LintContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LintContext")
            .field("file", &self.file.path)
            .field("options", &self.options)
            .field("whitelist", &self.whitelist.map(WhitelistTables::len))
            .field("autofixer", &self.autofixer.is_some())
            .finish_non_exhaustive()
    }
}
