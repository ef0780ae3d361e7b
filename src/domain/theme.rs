//! Display theme preference.
//!
//! The preference is persisted by its upper-case name (`SYSTEM`, `LIGHT`,
//! `DARK`). Decoding never fails at the call sites that matter: unknown or
//! malformed stored values fall back to [`ThemePreference::System`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User-selected display theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThemePreference {
    /// Follow the platform light/dark setting.
    #[default]
    System,
    /// Always light.
    Light,
    /// Always dark.
    Dark,
}

/// Concrete color scheme a screen should render with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ThemePreference {
    /// Every preference, in the order the settings screen lists them.
    pub const ALL: [Self; 3] = [Self::System, Self::Light, Self::Dark];

    /// Stored name of the preference.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::System => "SYSTEM",
            Self::Light => "LIGHT",
            Self::Dark => "DARK",
        }
    }

    /// Decodes a stored value, falling back to `System` for anything unknown.
    ///
    /// # Examples
    ///
    /// ```
    /// use slavgorod_bus::ThemePreference;
    ///
    /// assert_eq!(ThemePreference::from_stored(Some("DARK")), ThemePreference::Dark);
    /// assert_eq!(ThemePreference::from_stored(Some("purple")), ThemePreference::System);
    /// assert_eq!(ThemePreference::from_stored(None), ThemePreference::System);
    /// ```
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    /// Resolves the preference against the platform dark-mode flag.
    #[must_use]
    pub const fn resolve(self, system_is_dark: bool) -> ColorScheme {
        match self {
            Self::System if system_is_dark => ColorScheme::Dark,
            Self::System | Self::Light => ColorScheme::Light,
            Self::Dark => ColorScheme::Dark,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string is not one of the stored theme names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme preference: {0}")]
pub struct UnknownTheme(pub String);

impl FromStr for ThemePreference {
    type Err = UnknownTheme;

    /// Parses an exact stored name. Matching is case-sensitive, as stored
    /// values are always written by [`ThemePreference::name`].
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.name() == s)
            .ok_or_else(|| UnknownTheme(s.to_string()))
    }
}
