//! Masking configuration

use serde::{Deserialize, Serialize};

use crate::A11yError;

/// Default marker for `hide_others`
pub const DEFAULT_HIDDEN_MARKER: &str = "data-aria-hidden";
/// Default marker for `inert_others`
pub const DEFAULT_INERT_MARKER: &str = "data-inert-ed";
/// Default marker for `suppress_others`
pub const DEFAULT_SUPPRESSED_MARKER: &str = "data-suppressed";

/// Configuration for [`AriaHiddenManager`](crate::AriaHiddenManager)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HideOthersConfig {
    /// Marker used by `hide_others` when the caller passes none
    pub hidden_marker: String,

    /// Marker used by `inert_others` when the caller passes none
    pub inert_marker: String,

    /// Marker used by `suppress_others` when the caller passes none
    pub suppressed_marker: String,

    /// Keep `aria-live` regions and `script` elements visible in `hide_others`
    pub preserve_live_regions: bool,
}

impl Default for HideOthersConfig {
    fn default() -> Self {
        Self {
            hidden_marker: DEFAULT_HIDDEN_MARKER.to_string(),
            inert_marker: DEFAULT_INERT_MARKER.to_string(),
            suppressed_marker: DEFAULT_SUPPRESSED_MARKER.to_string(),
            preserve_live_regions: false,
        }
    }
}

impl HideOthersConfig {
    /// Check every marker is usable as an attribute name
    pub fn validate(&self) -> Result<(), A11yError> {
        for (field, name) in [
            ("hidden_marker", &self.hidden_marker),
            ("inert_marker", &self.inert_marker),
            ("suppressed_marker", &self.suppressed_marker),
        ] {
            if !is_valid_attribute_name(name) {
                return Err(A11yError::InvalidAttributeName {
                    field,
                    name: name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// HTML attribute name rules: non-empty, no whitespace, quotes, `>`, `/` or `=`
pub fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_ascii_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '>' | '/' | '='))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = HideOthersConfig::default();
        assert_eq!(config.hidden_marker, "data-aria-hidden");
        assert!(!config.preserve_live_regions);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_marker() {
        let config = HideOthersConfig {
            inert_marker: "data inert".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(A11yError::InvalidAttributeName {
                field: "inert_marker",
                name: "data inert".to_string(),
            })
        );

        let config = HideOthersConfig {
            hidden_marker: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_attribute_names() {
        assert!(is_valid_attribute_name("data-aria-hidden"));
        assert!(is_valid_attribute_name("data-modal:owner"));
        assert!(!is_valid_attribute_name("a=b"));
        assert!(!is_valid_attribute_name("a/b"));
        assert!(!is_valid_attribute_name("\"x\""));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: HideOthersConfig =
            serde_json::from_str(r#"{ "hidden_marker": "data-modal", "preserve_live_regions": true }"#)
                .unwrap();
        assert_eq!(config.hidden_marker, "data-modal");
        assert_eq!(config.inert_marker, DEFAULT_INERT_MARKER);
        assert!(config.preserve_live_regions);
    }
}
