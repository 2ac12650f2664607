use crate::model::{AppConfig, LanguageFlags};

/// Factory configuration used whenever the persisted store has nothing usable.
pub fn default_config() -> AppConfig {
    AppConfig {
        active: true,
        triple_ctrl: true,
        language: LanguageFlags {
            english: true,
            chinese: true,
        },
    }
}
