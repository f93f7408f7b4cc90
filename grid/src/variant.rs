//! Named table layouts.
//!
//! The stat pages went through several layouts that differ in who sees the
//! edit column, where it sits, whether deck rows are highlighted and whether
//! the grid collapses responsively. Each one is kept as a fixed variant so a
//! deployment picks one explicitly.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::capabilities::ViewerCapabilities;
use crate::error::GridError;

/// Who gets the edit column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPredicate {
    LoggedIn,
    LoggedInAdmin,
}

impl EditPredicate {
    pub fn allows(&self, capabilities: ViewerCapabilities) -> bool {
        match self {
            Self::LoggedIn => capabilities.is_logged_in,
            Self::LoggedInAdmin => capabilities.is_logged_in_admin(),
        }
    }
}

/// Where the edit column goes relative to the base columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPlacement {
    Append,
    Prepend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutVariant {
    /// Any logged-in viewer may edit; deck rows highlighted.
    #[serde(rename = "login-only+styled")]
    LoginOnlyStyled,
    /// Only logged-in admins may edit; deck rows highlighted.
    #[default]
    #[serde(rename = "admin-only+styled")]
    AdminOnlyStyled,
    /// Only logged-in admins may edit; edit column leads, responsive grid
    /// with resizable columns and no row highlighting.
    #[serde(rename = "admin-only+responsive")]
    AdminOnlyResponsive,
}

impl LayoutVariant {
    pub const ALL: [Self; 3] = [
        Self::LoginOnlyStyled,
        Self::AdminOnlyStyled,
        Self::AdminOnlyResponsive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoginOnlyStyled => "login-only+styled",
            Self::AdminOnlyStyled => "admin-only+styled",
            Self::AdminOnlyResponsive => "admin-only+responsive",
        }
    }

    pub fn edit_predicate(&self) -> EditPredicate {
        match self {
            Self::LoginOnlyStyled => EditPredicate::LoggedIn,
            Self::AdminOnlyStyled | Self::AdminOnlyResponsive => EditPredicate::LoggedInAdmin,
        }
    }

    pub fn edit_placement(&self) -> EditPlacement {
        match self {
            Self::LoginOnlyStyled | Self::AdminOnlyStyled => EditPlacement::Append,
            Self::AdminOnlyResponsive => EditPlacement::Prepend,
        }
    }

    /// Whether deck rows get win-rate highlighting.
    pub fn highlights_rows(&self) -> bool {
        !matches!(self, Self::AdminOnlyResponsive)
    }

    /// Responsive collapse and resizable columns.
    pub fn is_responsive(&self) -> bool {
        matches!(self, Self::AdminOnlyResponsive)
    }

    pub fn shows_edit_column(&self, capabilities: ViewerCapabilities) -> bool {
        self.edit_predicate().allows(capabilities)
    }
}

impl Display for LayoutVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutVariant {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str() == s)
            .ok_or_else(|| GridError::UnknownLayoutVariant(s.to_string()))
    }
}
