//! Checks declared `Requires` against a built registry.
//!
//! Purely diagnostic: nothing is enabled or disabled as a result.

use std::fmt;

use crate::registry::Registry;

/// One unmet requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyIssue {
    /// The required extension is not installed.
    Missing { extension: String, requirement: String },
    /// The requiring extension is disabled.
    ///
    /// `required` is the directory name of the installed requirement.
    Disabled { extension: String, required: String },
}

impl DependencyIssue {
    /// Directory name of the extension that declared the requirement.
    pub fn extension(&self) -> &str {
        match self {
            Self::Missing { extension, .. } | Self::Disabled { extension, .. } => extension,
        }
    }
}

impl fmt::Display for DependencyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing {
                extension,
                requirement,
            } => write!(
                f,
                "extension \"{extension}\" requires \"{requirement}\" which is not installed"
            ),
            Self::Disabled { extension, required } => write!(
                f,
                "extension \"{extension}\" requires \"{required}\" which is disabled"
            ),
        }
    }
}

/// Check every requirement of every extension in `registry`.
///
/// Issues come back in registry order and are also logged.
pub fn validate(registry: &Registry) -> Vec<DependencyIssue> {
    let mut issues = Vec::new();

    for extension in registry.all() {
        for requirement in extension.requires() {
            let issue = match registry.get(requirement) {
                None => DependencyIssue::Missing {
                    extension: extension.name().to_string(),
                    requirement: requirement.clone(),
                },
                // Checks the requiring extension's own flag, not the required one's.
                Some(required) if !extension.enabled() => DependencyIssue::Disabled {
                    extension: extension.name().to_string(),
                    required: required.name().to_string(),
                },
                Some(_) => continue,
            };
            tracing::warn!(extension = %extension.name(), "{issue}");
            issues.push(issue);
        }
    }

    issues
}
