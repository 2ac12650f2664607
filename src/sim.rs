//! Simulated frame hosts for the demo binary and the integration tests.
//!
//! A [`SimHost`] plays the role of one window's `window`/`document` pair:
//! scripted selection state, page metadata, and an optional frame name, with
//! a switch to make reads fail for exercising the degraded paths.

use std::sync::Arc;

use parking_lot::Mutex;

use wordlens_core_types::PageMeta;
use wordlens_selection::{sentence_around, HostError, HostPage};

#[derive(Default)]
struct SimSelection {
    text: String,
    sentence: String,
    fail_reads: bool,
}

pub struct SimHost {
    frame_name: Option<String>,
    meta: PageMeta,
    state: Mutex<SimSelection>,
}

impl SimHost {
    pub fn new(meta: PageMeta) -> Arc<Self> {
        Arc::new(Self {
            frame_name: None,
            meta,
            state: Mutex::new(SimSelection::default()),
        })
    }

    /// Host for a frame the embedder gave a name, e.g. the extension's own
    /// overlay frame.
    pub fn named(frame_name: impl Into<String>, meta: PageMeta) -> Arc<Self> {
        Arc::new(Self {
            frame_name: Some(frame_name.into()),
            meta,
            state: Mutex::new(SimSelection::default()),
        })
    }

    pub fn set_selection(&self, text: impl Into<String>, sentence: impl Into<String>) {
        let mut state = self.state.lock();
        state.text = text.into();
        state.sentence = sentence.into();
    }

    /// Select the first occurrence of `needle` inside `document_text`,
    /// deriving the sentence context the way a page host would.
    pub fn select_in_document(&self, document_text: &str, needle: &str) {
        match document_text.find(needle) {
            Some(start) => {
                let sentence = sentence_around(document_text, start, start + needle.len());
                self.set_selection(needle, sentence);
            }
            None => self.clear_selection(),
        }
    }

    pub fn clear_selection(&self) {
        let mut state = self.state.lock();
        state.text.clear();
        state.sentence.clear();
    }

    /// Make subsequent selection reads fail, as a torn-down document would.
    pub fn fail_reads(&self, fail: bool) {
        self.state.lock().fail_reads = fail;
    }
}

impl HostPage for SimHost {
    fn frame_name(&self) -> Option<String> {
        self.frame_name.clone()
    }

    fn page_meta(&self) -> PageMeta {
        self.meta.clone()
    }

    fn has_selection(&self) -> bool {
        let state = self.state.lock();
        !state.fail_reads && !state.text.is_empty()
    }

    fn selection_text(&self) -> Result<String, HostError> {
        let state = self.state.lock();
        if state.fail_reads {
            return Err(HostError::SelectionUnavailable("document gone".into()));
        }
        Ok(state.text.clone())
    }

    fn selection_sentence(&self) -> Result<String, HostError> {
        let state = self.state.lock();
        if state.fail_reads {
            return Err(HostError::SelectionUnavailable("document gone".into()));
        }
        Ok(state.sentence.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_selection_derives_sentence() {
        let host = SimHost::new(PageMeta::default());
        host.select_in_document("One thing. The chosen word here. Last.", "word");
        assert_eq!(host.selection_text().unwrap(), "word");
        assert_eq!(host.selection_sentence().unwrap(), "The chosen word here.");
        assert!(host.has_selection());
    }

    #[test]
    fn failing_reads_surface_as_errors() {
        let host = SimHost::new(PageMeta::default());
        host.set_selection("word", "a word.");
        host.fail_reads(true);
        assert!(!host.has_selection());
        assert!(host.selection_text().is_err());
    }
}
