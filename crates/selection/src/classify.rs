use tracing::debug;

use wordlens_config_center::{AppConfig, LanguageFlags};
use wordlens_core_types::SelectionInfo;

use crate::host::HostPage;
use crate::lang::{contains_cjk, contains_latin};
use crate::payload::{empty_payload, qualifying_payload};
use crate::{OVERLAY_FRAME_NAME, RESERVED_CLASS_PREFIX};

/// First filter on a mouse release. A release that fails the gate is dropped
/// entirely: no message, qualifying or not.
pub fn release_passes_gate(
    config: &AppConfig,
    frame_name: Option<&str>,
    target_class: Option<&str>,
) -> bool {
    if !config.active {
        return false;
    }
    if frame_name == Some(OVERLAY_FRAME_NAME) {
        return false;
    }
    if target_class.is_some_and(|class| class.starts_with(RESERVED_CLASS_PREFIX)) {
        return false;
    }
    true
}

/// Whether selected text merits a real lookup under the enabled languages.
/// Pure in `text` and `lang`; re-evaluation always agrees with itself.
pub fn qualifies(text: &str, lang: &LanguageFlags) -> bool {
    if text.is_empty() {
        return false;
    }
    (lang.english && contains_latin(text) && !contains_cjk(text))
        || (lang.chinese && contains_cjk(text))
}

/// Run one surviving mouse release through the classifier and builder.
///
/// Returns `None` when the gate drops the release. Otherwise the release
/// always yields exactly one payload; a non-qualifying one carries empty
/// `text`/`context` so downstream consumers can clear stale UI.
///
/// The selection is read only after yielding once to the scheduler: clicking
/// on selected text clears the highlight asynchronously, and reading in the
/// same tick would still observe the old selection.
pub async fn process_release(
    host: &dyn HostPage,
    config: &AppConfig,
    target_class: Option<&str>,
) -> Option<SelectionInfo> {
    if !release_passes_gate(config, host.frame_name().as_deref(), target_class) {
        debug!("mouse release dropped by gate");
        return None;
    }

    tokio::task::yield_now().await;

    let text = host.selection_text().unwrap_or_default();
    if host.has_selection() && qualifies(&text, &config.language) {
        Some(qualifying_payload(host, text))
    } else {
        Some(empty_payload(host))
    }
}
