//! Per-record options and their inheritance.
//!
//! The same [`Options`] shape hangs off the proxy record and off every
//! backend. Each field is presence-aware: `None` means "inherit from the
//! proxy", while `Some(false)` or `Some(vec![])` are explicit values that
//! are never overwritten. [`Options::inherit`] performs the cascade.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// Fail startup when this backend cannot be brought up, rather than skipping it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panic_if_invalid: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_enabled: Option<bool>,

    /// Bearer tokens accepted for this backend. An empty list turns token
    /// checks off for the backend; `None` means the proxy's tokens apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_tokens: Option<Vec<String>>,

    /// Never inherited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_filter: Option<ToolFilter>,
}

impl Options {
    /// Fill every unset inheritable field from `parent`.
    ///
    /// Returns a new value; neither input is modified. `tool_filter` is
    /// always taken from `self`.
    #[must_use]
    pub fn inherit(&self, parent: &Self) -> Self {
        Self {
            panic_if_invalid: self.panic_if_invalid.or(parent.panic_if_invalid),
            log_enabled: self.log_enabled.or(parent.log_enabled),
            auth_tokens: self
                .auth_tokens
                .clone()
                .or_else(|| parent.auth_tokens.clone()),
            tool_filter: self.tool_filter.clone(),
        }
    }

    #[must_use]
    pub fn panics_if_invalid(&self) -> bool {
        self.panic_if_invalid.unwrap_or(false)
    }

    #[must_use]
    pub fn logs_enabled(&self) -> bool {
        self.log_enabled.unwrap_or(false)
    }

    #[must_use]
    pub fn requires_auth(&self) -> bool {
        self.auth_tokens.as_ref().is_some_and(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolFilterMode {
    Allow,
    Block,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ToolFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<ToolFilterMode>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub list: Vec<String>,
}

impl ToolFilter {
    /// Whether a tool named `tool` is exposed through the proxy.
    #[must_use]
    pub fn permits(&self, tool: &str) -> bool {
        let listed = self.list.iter().any(|t| t == tool);
        match self.mode {
            Some(ToolFilterMode::Allow) => listed,
            Some(ToolFilterMode::Block) => !listed,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(list: &[&str]) -> Option<Vec<String>> {
        Some(list.iter().map(|s| (*s).to_string()).collect())
    }

    #[test]
    fn unset_fields_take_parent_values() {
        let parent = Options {
            panic_if_invalid: Some(true),
            auth_tokens: tokens(&["A"]),
            ..Options::default()
        };
        let resolved = Options::default().inherit(&parent);
        assert_eq!(
            resolved,
            Options {
                panic_if_invalid: Some(true),
                log_enabled: None,
                auth_tokens: tokens(&["A"]),
                tool_filter: None,
            }
        );
    }

    #[test]
    fn explicit_false_is_not_overridden() {
        let parent = Options {
            panic_if_invalid: Some(true),
            log_enabled: Some(true),
            ..Options::default()
        };
        let child = Options {
            panic_if_invalid: Some(false),
            log_enabled: Some(false),
            ..Options::default()
        };
        let resolved = child.inherit(&parent);
        assert_eq!(resolved.panic_if_invalid, Some(false));
        assert_eq!(resolved.log_enabled, Some(false));
    }

    #[test]
    fn explicit_empty_tokens_are_kept() {
        let parent = Options {
            auth_tokens: tokens(&["A"]),
            ..Options::default()
        };
        let child = Options {
            auth_tokens: Some(vec![]),
            ..Options::default()
        };
        assert_eq!(child.inherit(&parent).auth_tokens, Some(vec![]));
    }

    #[test]
    fn unset_parent_propagates_absence() {
        let resolved = Options::default().inherit(&Options::default());
        assert_eq!(resolved, Options::default());
    }

    #[test]
    fn tool_filter_is_never_inherited() {
        let parent = Options {
            tool_filter: Some(ToolFilter {
                mode: Some(ToolFilterMode::Block),
                list: vec!["delete".into()],
            }),
            ..Options::default()
        };
        assert_eq!(Options::default().inherit(&parent).tool_filter, None);
    }

    #[test]
    fn deserializes_presence() {
        let opts: Options = serde_json::from_str(r#"{"authTokens": [], "logEnabled": false}"#).unwrap();
        assert_eq!(opts.auth_tokens, Some(vec![]));
        assert_eq!(opts.log_enabled, Some(false));
        assert_eq!(opts.panic_if_invalid, None);

        let opts: Options = serde_json::from_str(r#"{"authTokens": null}"#).unwrap();
        assert_eq!(opts.auth_tokens, None);
    }

    #[test]
    fn allow_filter_permits_only_listed() {
        let filter = ToolFilter {
            mode: Some(ToolFilterMode::Allow),
            list: vec!["search".into()],
        };
        assert!(filter.permits("search"));
        assert!(!filter.permits("delete"));
    }

    #[test]
    fn block_filter_rejects_listed() {
        let filter = ToolFilter {
            mode: Some(ToolFilterMode::Block),
            list: vec!["delete".into()],
        };
        assert!(filter.permits("search"));
        assert!(!filter.permits("delete"));
    }
}
