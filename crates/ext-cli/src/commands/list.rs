//! `extmgr list`

use std::sync::Arc;

use colored::Colorize;
use ext_manager::Extension;

use super::{status_label, version_label};
use crate::context::Context;
use crate::error::Result;

/// Print active extensions, or every scanned extension with `all`.
///
/// Repository info is read lazily for each listed extension.
pub fn run_list(ctx: &Context, all: bool, json: bool) -> Result<()> {
    let active: Vec<Arc<Extension>> = ctx.active();
    let extensions: Vec<Arc<Extension>> = if all {
        ctx.registry.all().to_vec()
    } else {
        active.clone()
    };
    ctx.info.read_all(&extensions);

    if json {
        let snapshots: Vec<_> = extensions.iter().map(|ext| ext.snapshot()).collect();
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
        return Ok(());
    }

    if extensions.is_empty() {
        println!("{}", "No extensions found.".dimmed());
        return Ok(());
    }

    println!("{}", if all { "All Extensions" } else { "Active Extensions" }.bold());
    println!();
    for ext in &extensions {
        let kind = if ext.is_builtin() { "builtin" } else { "user" };
        let inactive = !active.iter().any(|a| Arc::ptr_eq(a, ext));
        println!(
            "  {} {} {} {}{}",
            format!("{:<24}", ext.name()).green(),
            format!("{kind:<8}").dimmed(),
            format!("{:<10}", version_label(ext)),
            status_label(ext),
            if inactive { " (inactive)".dimmed().to_string() } else { String::new() },
        );
    }
    println!();
    println!("{} {} extensions", "Total:".dimmed(), extensions.len());

    Ok(())
}
