//! List rules command implementation.

use arkts_lint::{FaultId, RuleTier};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!(
        "{:<8} {:<44} {:<8} {:<8} Description",
        "Code", "Name", "Tier", "Severity"
    );
    println!("{}", "-".repeat(110));

    for rule in FaultId::ALL {
        println!(
            "{:<8} {:<44} {:<8} {:<8} {}",
            rule.code(),
            rule.name(),
            tier_label(rule.tier()),
            rule.default_severity().to_string(),
            rule.description()
        );
    }

    println!("\nTiers:");
    println!("  base     - always active");
    println!("  static   - requires `arkts2 = true` (or --arkts2)");
    println!("  interop  - static tier, files starting with 'use static'");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  arkts-lint check --rules arkts-no-var,arkts-no-any-unknown");
    println!("  arkts-lint check --rules ARK009,ARK041");
}

fn tier_label(tier: RuleTier) -> &'static str {
    match tier {
        RuleTier::Base => "base",
        RuleTier::Static => "static",
        RuleTier::Interop => "interop",
    }
}
