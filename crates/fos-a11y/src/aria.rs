//! ARIA attribute names and value parsing used when masking subtrees.

/// Hides a subtree from assistive technology
pub const HIDDEN: &str = "aria-hidden";

/// Removes a subtree from focus, hit testing and the accessibility tree
pub const INERT: &str = "inert";

/// Marks a live region; such elements keep announcing while others are hidden
pub const LIVE: &str = "aria-live";

/// Value written to control and marker attributes
pub const TRUE: &str = "true";

/// Whether a control attribute value counts as "hidden".
///
/// Any present value other than the literal `"false"` hides, including the
/// empty string (`<div inert>`).
pub fn is_hidden_value(value: Option<&str>) -> bool {
    matches!(value, Some(v) if v != "false")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_values() {
        assert!(is_hidden_value(Some("true")));
        assert!(is_hidden_value(Some("")));
        assert!(is_hidden_value(Some("TRUE")));
        assert!(!is_hidden_value(Some("false")));
        assert!(!is_hidden_value(None));
    }
}
