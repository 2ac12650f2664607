use thiserror::Error;

use wordlens_core_types::PageMeta;

/// Failure reading live page state. Callers degrade to "no selection" or an
/// empty reply; nothing here is fatal.
#[derive(Clone, Debug, Error)]
pub enum HostError {
    #[error("selection read failed: {0}")]
    SelectionUnavailable(String),
}

/// Capability object standing in for the frame's `window`/`document`.
///
/// One instance per frame. Injecting it keeps every component testable with
/// simulated frames; nothing in the core touches globals.
pub trait HostPage: Send + Sync {
    /// Name the embedder gave this frame, if any.
    fn frame_name(&self) -> Option<String>;

    fn page_meta(&self) -> PageMeta;

    /// Whether a live selection currently exists.
    fn has_selection(&self) -> bool;

    /// The raw selected text; empty when nothing is selected.
    fn selection_text(&self) -> Result<String, HostError>;

    /// The full sentence containing the selection.
    fn selection_sentence(&self) -> Result<String, HostError>;
}
