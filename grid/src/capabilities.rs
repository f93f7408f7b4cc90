//! Viewer capability flags gating the edit column.

use serde::{Deserialize, Serialize};

/// What the current viewer is allowed to see.
///
/// Sourced once per page load. Missing fields deserialize as `false`, so a
/// malformed capability payload always hides the edit column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerCapabilities {
    pub is_logged_in: bool,
    pub is_admin: bool,
}

impl ViewerCapabilities {
    pub const ANONYMOUS: Self = Self {
        is_logged_in: false,
        is_admin: false,
    };

    pub const fn new(is_logged_in: bool, is_admin: bool) -> Self {
        Self {
            is_logged_in,
            is_admin,
        }
    }

    /// Builds capabilities from string-encoded page attributes.
    ///
    /// Only the exact string `"true"` enables a flag. Absent attributes and
    /// any other value (including `"TRUE"` or `"1"`) count as `false`.
    pub fn from_flags(logged_in: Option<&str>, is_admin: Option<&str>) -> Self {
        Self {
            is_logged_in: logged_in == Some("true"),
            is_admin: is_admin == Some("true"),
        }
    }

    /// Logged in with the admin flag set.
    pub fn is_logged_in_admin(&self) -> bool {
        self.is_logged_in && self.is_admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_flags_requires_exact_true() {
        assert_eq!(
            ViewerCapabilities::from_flags(Some("true"), Some("true")),
            ViewerCapabilities::new(true, true)
        );
        assert_eq!(
            ViewerCapabilities::from_flags(Some("TRUE"), Some("1")),
            ViewerCapabilities::ANONYMOUS
        );
        assert_eq!(
            ViewerCapabilities::from_flags(Some("true"), Some("false")),
            ViewerCapabilities::new(true, false)
        );
    }

    #[test]
    fn from_flags_missing_attributes_fail_closed() {
        assert_eq!(
            ViewerCapabilities::from_flags(None, None),
            ViewerCapabilities::ANONYMOUS
        );
        assert_eq!(
            ViewerCapabilities::from_flags(None, Some("true")),
            ViewerCapabilities::new(false, true)
        );
    }

    #[test]
    fn deserialize_missing_fields_default_to_false() {
        let caps: ViewerCapabilities = serde_json::from_str("{}").unwrap();
        assert_eq!(caps, ViewerCapabilities::ANONYMOUS);

        let caps: ViewerCapabilities = serde_json::from_str(r#"{"is_logged_in":true}"#).unwrap();
        assert!(caps.is_logged_in);
        assert!(!caps.is_admin);
        assert!(!caps.is_logged_in_admin());
    }
}
