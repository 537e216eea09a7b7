//! `extmgr check-updates` and `extmgr update`

use std::sync::Arc;

use colored::Colorize;
use dialoguer::Confirm;
use ext_git::has_git_dir;
use ext_manager::Extension;

use super::{status_label, version_label};
use crate::context::Context;
use crate::error::{CliError, Result};

/// Check one named extension, or every active git working copy.
pub fn run_check_updates(ctx: &Context, name: Option<&str>) -> Result<()> {
    let targets: Vec<Arc<Extension>> = match name {
        Some(name) => {
            let ext = ctx.find(name)?;
            if ext.is_builtin() {
                return Err(CliError::user(format!(
                    "'{}' is a builtin extension and is not updated separately",
                    ext.name()
                )));
            }
            vec![Arc::clone(ext)]
        }
        None => ctx
            .active()
            .into_iter()
            .filter(|ext| !ext.is_builtin() && has_git_dir(ext.path()))
            .collect(),
    };

    if targets.is_empty() {
        println!("{}", "No version-controlled extensions to check.".dimmed());
        return Ok(());
    }

    for ext in &targets {
        ctx.info.read_info(ext);
        ctx.updates.check_updates(ext);
        println!(
            "  {} {} {}",
            format!("{:<24}", ext.name()).green(),
            format!("{:<10}", version_label(ext)),
            status_label(ext)
        );
    }

    let updatable = targets.iter().filter(|ext| ext.can_update()).count();
    println!();
    if updatable > 0 {
        println!(
            "{} {} of {} extensions can be updated. Run {} to apply.",
            "=>".blue().bold(),
            updatable,
            targets.len(),
            "extmgr update <name>".cyan()
        );
    } else {
        println!("{} All checked extensions are up to date.", "=>".blue().bold());
    }

    Ok(())
}

/// Force-resync an extension to `reference`.
///
/// Asks for confirmation unless `yes`, since local changes are lost.
pub fn run_update(ctx: &Context, name: &str, reference: &str, yes: bool) -> Result<()> {
    let ext = ctx.find(name)?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Reset '{}' to '{}'? Local changes in {} will be lost",
                ext.name(),
                reference,
                ext.path().display()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Aborted.".dimmed());
            return Ok(());
        }
    }

    ctx.info.read_info(ext);
    let before = version_label(ext);

    ctx.updates.sync_to_commit(ext, reference)?;
    ctx.info.read_info(ext);

    println!(
        "{} {} {} -> {}",
        "=>".blue().bold(),
        ext.name().cyan(),
        before.dimmed(),
        version_label(ext).green()
    );
    Ok(())
}
