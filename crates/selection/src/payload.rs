use tracing::debug;

use wordlens_core_types::SelectionInfo;

use crate::host::HostPage;

/// Payload for a qualifying release: the raw text, its surrounding sentence,
/// and the page metadata. A failed sentence read degrades to empty context.
pub fn qualifying_payload(host: &dyn HostPage, text: String) -> SelectionInfo {
    let context = match host.selection_sentence() {
        Ok(sentence) => sentence,
        Err(err) => {
            debug!(%err, "sentence read failed; sending bare selection");
            String::new()
        }
    };
    SelectionInfo::selected(text, context, &host.page_meta())
}

/// Payload for a non-qualifying (but not dropped) release: empty text and
/// context, same page fields, so the consumer still hears about the release.
pub fn empty_payload(host: &dyn HostPage) -> SelectionInfo {
    SelectionInfo::of_page(&host.page_meta())
}
