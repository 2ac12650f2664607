use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::defaults::default_config;

/// Which script contents qualify a selection for lookup.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct LanguageFlags {
    pub english: bool,
    pub chinese: bool,
}

impl Default for LanguageFlags {
    fn default() -> Self {
        default_config().language
    }
}

/// Snapshot of the extension configuration this core consumes.
///
/// Always fully populated: anything missing or malformed upstream is replaced
/// by the factory value. The core only reads it; updates arrive as wholesale
/// replacements through the config center.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Master on/off switch for the whole pipeline.
    pub active: bool,
    /// Enable the triple-modifier gesture trigger.
    pub triple_ctrl: bool,
    pub language: LanguageFlags,
}

impl Default for AppConfig {
    fn default() -> Self {
        default_config()
    }
}

impl AppConfig {
    /// Interpret a raw persisted value, substituting the factory config when
    /// the value is absent or does not parse. Fields a partial snapshot
    /// leaves out fall back to their factory values.
    pub fn from_value(value: Option<&Value>) -> Self {
        value
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }
}
