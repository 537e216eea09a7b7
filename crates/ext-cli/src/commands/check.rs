//! `extmgr check`

use colored::Colorize;
use ext_manager::validate;

use crate::context::Context;
use crate::error::Result;

/// Print dependency diagnostics and canonical-name conflicts.
///
/// Problems are reported, never fixed, so this succeeds either way.
pub fn run_check(ctx: &Context) -> Result<()> {
    let issues = validate(&ctx.registry);
    let conflicts = ctx.registry.conflicts();

    if issues.is_empty() && conflicts.is_empty() {
        println!(
            "{} {} extensions, no problems found",
            "OK".green().bold(),
            ctx.registry.len()
        );
        return Ok(());
    }

    for conflict in conflicts {
        println!("{} {}", "conflict:".yellow().bold(), conflict);
    }
    for issue in &issues {
        println!("{} {}", "requires:".yellow().bold(), issue);
    }
    println!();
    println!(
        "{} {} conflict(s), {} unmet requirement(s)",
        "Total:".dimmed(),
        conflicts.len(),
        issues.len()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{context, tree};

    #[test]
    fn test_check_reports_without_failing() {
        let tree = tree();
        let foo = tree.add_user("foo");
        tree.write_metadata(&foo, "[Extension]\nRequires = missing\n");
        tree.add_builtin("dup");
        tree.add_user("dup");

        assert!(run_check(&context(&tree)).is_ok());
    }
}
