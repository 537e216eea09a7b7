//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use ext_manager::{DEFAULT_SYNC_REF, HardOverride};

/// Extension Manager - inspect, check and update installed extensions
#[derive(Parser, Debug)]
#[command(name = "extmgr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Working root holding extensions.toml and the extension directories
    #[arg(long, global = true, env = "EXTMGR_ROOT")]
    pub root: Option<PathBuf>,

    /// Do not activate any extension
    #[arg(long, global = true)]
    pub disable_all_extensions: bool,

    /// Activate builtin extensions only
    #[arg(long, global = true)]
    pub disable_extra_extensions: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn hard_override(&self) -> HardOverride {
        HardOverride {
            disable_all: self.disable_all_extensions,
            disable_extra: self.disable_extra_extensions,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List active extensions
    List {
        /// Include disabled and inactive extensions
        #[arg(long)]
        all: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Report unmet requirements and duplicate extensions
    Check,

    /// Show everything known about one extension
    Info {
        /// Canonical or directory name
        name: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Ask remotes whether extensions have new commits
    ///
    /// Without a name, checks every active extension that is a git working
    /// copy. Builtin extensions are never checked.
    CheckUpdates {
        /// Check a single extension
        name: Option<String>,
    },

    /// Fetch and hard-reset an extension to a remote ref
    ///
    /// Local changes in the extension's working copy are discarded.
    ///
    /// Examples:
    ///   extmgr update my-ext                 # reset to origin
    ///   extmgr update my-ext --ref v1.2.0    # reset to a tag
    ///   extmgr update my-ext --yes           # skip confirmation
    Update {
        /// Canonical or directory name
        name: String,

        /// Revision to reset to
        #[arg(long = "ref", default_value = DEFAULT_SYNC_REF)]
        reference: String,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List script files shipped by an extension
    Files {
        /// Canonical or directory name
        name: String,

        /// Subdirectory to look in
        #[arg(long, default_value = "scripts")]
        subdir: String,

        /// File extension, including the dot
        #[arg(long = "ext", default_value = ".py")]
        extension: String,
    },

    /// Generate shell completions
    ///
    /// Examples:
    ///   extmgr completions bash > ~/.local/share/bash-completion/completions/extmgr
    ///   extmgr completions zsh > ~/.zfunc/_extmgr
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_no_args() {
        let cli = Cli::parse_from(["extmgr"]);
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
        assert_eq!(cli.hard_override(), HardOverride::default());
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "extmgr",
            "list",
            "--disable-extra-extensions",
            "--root",
            "/work",
            "-v",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.root, Some(PathBuf::from("/work")));
        assert_eq!(
            cli.hard_override(),
            HardOverride {
                disable_all: false,
                disable_extra: true,
            }
        );
    }

    #[test]
    fn parse_list_flags() {
        let cli = Cli::parse_from(["extmgr", "list", "--all", "--json"]);
        assert_eq!(cli.command, Some(Commands::List { all: true, json: true }));
    }

    #[test]
    fn parse_update_defaults() {
        let cli = Cli::parse_from(["extmgr", "update", "my-ext"]);
        assert_eq!(
            cli.command,
            Some(Commands::Update {
                name: "my-ext".into(),
                reference: "origin".into(),
                yes: false,
            })
        );
    }

    #[test]
    fn parse_update_with_ref() {
        let cli = Cli::parse_from(["extmgr", "update", "my-ext", "--ref", "v1.0", "-y"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Update { reference, yes: true, .. }) if reference == "v1.0"
        ));
    }

    #[test]
    fn parse_files_defaults() {
        let cli = Cli::parse_from(["extmgr", "files", "my-ext"]);
        assert_eq!(
            cli.command,
            Some(Commands::Files {
                name: "my-ext".into(),
                subdir: "scripts".into(),
                extension: ".py".into(),
            })
        );
    }

    #[test]
    fn parse_check_updates_optional_name() {
        let cli = Cli::parse_from(["extmgr", "check-updates"]);
        assert_eq!(cli.command, Some(Commands::CheckUpdates { name: None }));
    }

    #[test]
    fn parse_completions_command() {
        let cli = Cli::parse_from(["extmgr", "completions", "bash"]);
        assert!(matches!(cli.command, Some(Commands::Completions { .. })));
    }
}
