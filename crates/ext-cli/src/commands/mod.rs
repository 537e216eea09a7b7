//! Command implementations for ext-cli

pub mod check;
pub mod completions;
pub mod files;
pub mod info;
pub mod list;
pub mod update;

pub use check::run_check;
pub use completions::run_completions;
pub use files::run_files;
pub use info::run_info;
pub use list::run_list;
pub use update::{run_check_updates, run_update};

use colored::{ColoredString, Colorize};
use ext_manager::{Extension, UpdateStatus};

/// Status text coloured by how actionable it is.
fn status_label(extension: &Extension) -> ColoredString {
    let Some(status) = extension.status() else {
        return "-".dimmed();
    };
    let text = status.as_str();
    match status {
        UpdateStatus::NewCommits | UpdateStatus::BehindHead => text.yellow().bold(),
        UpdateStatus::Latest => text.green(),
        UpdateStatus::RemoteError => text.red(),
        UpdateStatus::Unknown => text.dimmed(),
    }
}

/// Abbreviated hash, or a dash before repository info is known.
fn version_label(extension: &Extension) -> String {
    let version = extension.version();
    if version.is_empty() { "-".to_string() } else { version }
}
