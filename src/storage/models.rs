//! On-disk document format for the JSON preference store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current version of the preference document format.
pub const PREFERENCES_VERSION: u32 = 1;

/// Top-level structure serialized to the preference file.
///
/// ```json
/// {
///   "version": 1,
///   "values": {
///     "app_theme": "DARK"
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceDocument {
    /// Version of the document format for future migrations.
    pub version: u32,

    /// Stored preference values. A `BTreeMap` keeps the file diff-stable.
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl Default for PreferenceDocument {
    fn default() -> Self {
        Self {
            version: PREFERENCES_VERSION,
            values: BTreeMap::new(),
        }
    }
}
