//! Helpers for the unit tests: run a linter over the first file of a program.

use crate::{LintContext, Linter};
use arkts_lint_core::{FileFaults, FileId, LinterOptions, ProcessCache, Program};

pub(crate) fn with_linter<R>(program: &Program, f: impl FnOnce(&mut Linter<'_>) -> R) -> R {
    let mut cache = ProcessCache::new();
    let ctx = LintContext::new(program, FileId(0), &mut cache).expect("program has a file");
    let mut linter = Linter::new(ctx);
    f(&mut linter)
}

pub(crate) fn run_with(program: &Program, options: LinterOptions) -> FileFaults {
    let mut cache = ProcessCache::new();
    let ctx = LintContext::new(program, FileId(0), &mut cache)
        .expect("program has a file")
        .options(options);
    Linter::new(ctx).run().expect("not cancelled")
}

pub(crate) fn run_default(program: &Program) -> FileFaults {
    run_with(program, LinterOptions::default())
}

pub(crate) fn run_arkts2(program: &Program) -> FileFaults {
    run_with(program, LinterOptions::default().arkts2(true))
}
