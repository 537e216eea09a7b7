//! `extmgr info <name>`

use colored::Colorize;

use super::{status_label, version_label};
use crate::context::Context;
use crate::error::Result;

pub fn run_info(ctx: &Context, name: &str, json: bool) -> Result<()> {
    let ext = ctx.find(name)?;
    ctx.info.read_info(ext);

    if json {
        println!("{}", serde_json::to_string_pretty(&ext.snapshot())?);
        return Ok(());
    }

    let or_dash = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
    let active = ctx
        .active()
        .iter()
        .any(|a| a.canonical_name() == ext.canonical_name());

    println!("{}", ext.name().cyan().bold());
    println!("  {:<14} {}", "Canonical:".dimmed(), ext.canonical_name());
    if let Some(declared) = &ext.metadata().declared_name {
        println!("  {:<14} {}", "Declared name:".dimmed(), declared);
    }
    println!("  {:<14} {}", "Path:".dimmed(), ext.path().display());
    println!(
        "  {:<14} {}",
        "Kind:".dimmed(),
        if ext.is_builtin() { "builtin" } else { "user" }
    );
    println!("  {:<14} {}", "Enabled:".dimmed(), ext.enabled());
    println!("  {:<14} {}", "Active:".dimmed(), active);
    println!(
        "  {:<14} {}",
        "Requires:".dimmed(),
        if ext.requires().is_empty() { "-".to_string() } else { ext.requires().join(", ") }
    );
    println!("  {:<14} {}", "Remote:".dimmed(), or_dash(ext.remote()));
    println!("  {:<14} {}", "Branch:".dimmed(), or_dash(ext.branch()));
    println!("  {:<14} {}", "Version:".dimmed(), version_label(ext));
    println!(
        "  {:<14} {}",
        "Commit date:".dimmed(),
        or_dash(ext.commit_date().map(|d| d.to_rfc3339()))
    );
    println!("  {:<14} {}", "Status:".dimmed(), status_label(ext));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{context, tree};
    use crate::error::CliError;

    #[test]
    fn test_info_unknown_extension() {
        let tree = tree();
        let result = run_info(&context(&tree), "nope", false);
        assert!(matches!(result, Err(CliError::Manager(_))));
    }

    #[test]
    fn test_info_plain_directory() {
        let tree = tree();
        tree.add_user("alpha");
        let ctx = context(&tree);

        run_info(&ctx, "Alpha", false).unwrap();
        assert!(ctx.registry.get("alpha").unwrap().have_info_from_repo());
    }
}
