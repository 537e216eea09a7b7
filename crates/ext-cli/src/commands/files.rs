//! `extmgr files <name>`

use colored::Colorize;

use crate::context::Context;
use crate::error::Result;

/// Print one matching file path per line.
pub fn run_files(ctx: &Context, name: &str, subdir: &str, extension: &str) -> Result<()> {
    let ext = ctx.find(name)?;
    let files = ext.list_files(subdir, extension)?;

    if files.is_empty() {
        eprintln!(
            "{}",
            format!("No {extension} files in {}/{subdir}", ext.name()).dimmed()
        );
        return Ok(());
    }

    for file in files {
        println!("{}", file.path.display());
    }
    Ok(())
}
