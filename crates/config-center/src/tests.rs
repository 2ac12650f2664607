use serde_json::json;

use crate::api::{ConfigCenter, InMemoryConfigCenter};
use crate::defaults::default_config;
use crate::model::AppConfig;

#[test]
fn factory_config_is_fully_on() {
    let config = default_config();
    assert!(config.active);
    assert!(config.triple_ctrl);
    assert!(config.language.english);
    assert!(config.language.chinese);
}

#[test]
fn missing_or_malformed_value_falls_back_to_factory() {
    assert_eq!(AppConfig::from_value(None), default_config());
    assert_eq!(
        AppConfig::from_value(Some(&json!("not a config"))),
        default_config()
    );
}

#[test]
fn partial_value_fills_in_factory_fields() {
    let config = AppConfig::from_value(Some(&json!({ "active": false })));
    assert!(!config.active);
    assert!(config.triple_ctrl);
    assert!(config.language.english);
}

#[test]
fn camel_case_store_fields_are_understood() {
    let config = AppConfig::from_value(Some(&json!({
        "active": true,
        "tripleCtrl": false,
        "language": { "english": false, "chinese": true }
    })));
    assert!(!config.triple_ctrl);
    assert!(!config.language.english);
    assert!(config.language.chinese);
}

#[tokio::test]
async fn subscriber_sees_current_then_updates() {
    let center = InMemoryConfigCenter::with_defaults();
    let mut rx = center.subscribe();

    // Current value is observable without waiting.
    assert!(rx.borrow().active);

    let mut updated = default_config();
    updated.active = false;
    center.replace(updated);

    rx.changed().await.unwrap();
    assert!(!rx.borrow().active);
    assert!(!center.snapshot().active);
}
