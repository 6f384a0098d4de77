#![forbid(unsafe_code)]

//! Controller configuration.
//!
//! [`StackConfig`] is plain data with a `Default`. With the `policy-config`
//! feature it can also be loaded from TOML or JSON:
//!
//! ```toml
//! close-policy = "clamp"
//! ```
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Malformed document | Syntax error | [`ConfigError::Parse`] |
//! | Unknown policy name | Typo in `close-policy` | [`ConfigError::Parse`] |
//! | Missing keys | Partial document | Defaults fill the gaps |

/// How `close_n(amount)` treats the requested amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum ClosePolicy {
    /// A one-entry stack empties on any close, whatever the amount
    /// (including 0). Deeper stacks truncate by `amount`, clamped at zero.
    #[default]
    CollapseSingle,
    /// Always truncate by `amount`, clamped at zero. `close_n(0)` is a
    /// no-op at every depth.
    Clamp,
}

impl ClosePolicy {
    /// Length left after closing `amount` entries from a stack of `len`.
    #[must_use]
    pub fn retained_len(self, len: usize, amount: usize) -> usize {
        match self {
            Self::CollapseSingle if len == 1 => 0,
            Self::CollapseSingle | Self::Clamp => len.saturating_sub(amount),
        }
    }
}

/// Configuration for a [`StackController`](crate::StackController).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "kebab-case", deny_unknown_fields)
)]
pub struct StackConfig {
    pub close_policy: ClosePolicy,
}

impl StackConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn close_policy(mut self, policy: ClosePolicy) -> Self {
        self.close_policy = policy;
        self
    }
}

#[cfg(feature = "policy-config")]
impl StackConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|e| ConfigError::Parse {
            format: "toml",
            message: e.to_string(),
        })
    }

    /// Parse a JSON document.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(input).map_err(|e| ConfigError::Parse {
            format: "json",
            message: e.to_string(),
        })
    }
}

/// Errors from configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A config document could not be parsed.
    Parse {
        format: &'static str,
        message: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse { format, message } => write!(f, "invalid {format} config: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_collapses_single() {
        assert_eq!(StackConfig::default().close_policy, ClosePolicy::CollapseSingle);
    }

    #[test]
    fn collapse_single_retained_len() {
        let p = ClosePolicy::CollapseSingle;
        assert_eq!(p.retained_len(1, 0), 0);
        assert_eq!(p.retained_len(1, 5), 0);
        assert_eq!(p.retained_len(4, 1), 3);
        assert_eq!(p.retained_len(4, 0), 4);
        assert_eq!(p.retained_len(4, 9), 0);
        assert_eq!(p.retained_len(0, 3), 0);
    }

    #[test]
    fn clamp_retained_len() {
        let p = ClosePolicy::Clamp;
        assert_eq!(p.retained_len(1, 0), 1);
        assert_eq!(p.retained_len(1, 1), 0);
        assert_eq!(p.retained_len(3, usize::MAX), 0);
    }

    #[test]
    fn builder_sets_policy() {
        let config = StackConfig::new().close_policy(ClosePolicy::Clamp);
        assert_eq!(config.close_policy, ClosePolicy::Clamp);
    }

    #[test]
    fn error_display() {
        let err = ConfigError::Parse {
            format: "toml",
            message: "expected `=`".into(),
        };
        assert_eq!(err.to_string(), "invalid toml config: expected `=`");
    }

    #[cfg(feature = "policy-config")]
    mod loading {
        use super::super::*;

        #[test]
        fn toml_clamp() {
            let config = StackConfig::from_toml_str("close-policy = \"clamp\"\n").unwrap();
            assert_eq!(config.close_policy, ClosePolicy::Clamp);
        }

        #[test]
        fn toml_empty_uses_defaults() {
            let config = StackConfig::from_toml_str("").unwrap();
            assert_eq!(config, StackConfig::default());
        }

        #[test]
        fn json_collapse_single() {
            let config =
                StackConfig::from_json_str(r#"{"close-policy":"collapse-single"}"#).unwrap();
            assert_eq!(config.close_policy, ClosePolicy::CollapseSingle);
        }

        #[test]
        fn unknown_policy_is_parse_error() {
            let err = StackConfig::from_toml_str("close-policy = \"sometimes\"\n").unwrap_err();
            assert!(matches!(err, ConfigError::Parse { format: "toml", .. }));
        }
    }
}
