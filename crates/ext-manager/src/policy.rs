//! Global activation overrides.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Runtime option disabling extensions wholesale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisablePolicy {
    #[default]
    None,
    /// Only builtin extensions stay active.
    Extra,
    All,
}

impl fmt::Display for DisablePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Extra => "extra",
            Self::All => "all",
        })
    }
}

/// Startup override, usually from command-line flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HardOverride {
    pub disable_all: bool,
    pub disable_extra: bool,
}

/// Everything that decides which scanned extensions are active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationConfig {
    /// Directory names disabled individually
    pub disabled: BTreeSet<String>,
    pub hard: HardOverride,
    pub soft: DisablePolicy,
}

impl ActivationConfig {
    pub fn is_disabled(&self, dir_name: &str) -> bool {
        self.disabled.contains(dir_name)
    }
}

/// Effective outcome of combining both overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Nothing,
    BuiltinOnly,
    Enabled,
}

impl Activation {
    /// "all" from either source beats "extra" from either source.
    pub fn resolve(hard: HardOverride, soft: DisablePolicy) -> Self {
        if hard.disable_all || soft == DisablePolicy::All {
            Self::Nothing
        } else if hard.disable_extra || soft == DisablePolicy::Extra {
            Self::BuiltinOnly
        } else {
            Self::Enabled
        }
    }
}

/// Log which override is in effect, if any.
pub fn announce(hard: HardOverride, soft: DisablePolicy) {
    if hard.disable_all {
        tracing::warn!("\"--disable-all-extensions\" was used, no extensions will be loaded");
    } else if soft == DisablePolicy::All {
        tracing::warn!("\"Disable all extensions\" option is set to all, no extensions will be loaded");
    } else if hard.disable_extra {
        tracing::warn!("\"--disable-extra-extensions\" was used, only builtin extensions will be loaded");
    } else if soft == DisablePolicy::Extra {
        tracing::warn!("\"Disable all extensions\" option is set to extra, only builtin extensions will be loaded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(false, false, DisablePolicy::None, Activation::Enabled)]
    #[case(true, false, DisablePolicy::None, Activation::Nothing)]
    #[case(false, false, DisablePolicy::All, Activation::Nothing)]
    #[case(true, true, DisablePolicy::Extra, Activation::Nothing)]
    #[case(false, true, DisablePolicy::None, Activation::BuiltinOnly)]
    #[case(false, false, DisablePolicy::Extra, Activation::BuiltinOnly)]
    #[case(false, true, DisablePolicy::All, Activation::Nothing)]
    fn test_resolve(
        #[case] disable_all: bool,
        #[case] disable_extra: bool,
        #[case] soft: DisablePolicy,
        #[case] expected: Activation,
    ) {
        let hard = HardOverride {
            disable_all,
            disable_extra,
        };
        assert_eq!(Activation::resolve(hard, soft), expected);
    }

    #[test]
    fn test_policy_serde_lowercase() {
        assert_eq!(serde_json::to_string(&DisablePolicy::Extra).unwrap(), "\"extra\"");
        let parsed: DisablePolicy = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(parsed, DisablePolicy::All);
    }
}
