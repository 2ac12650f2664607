use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use wordlens_core_types::{Msg, SelectionInfo};
use wordlens_event_bus::Responder;

use crate::host::{HostError, HostPage};

/// Answers pull-style "what is currently selected" requests, independent of
/// the push pipeline. The reply is the current [`SelectionInfo`], or `""`
/// when the read fails; the requester always gets something back.
pub struct SnapshotResponder {
    host: Arc<dyn HostPage>,
}

impl SnapshotResponder {
    pub fn new(host: Arc<dyn HostPage>) -> Arc<Self> {
        Arc::new(Self { host })
    }

    fn read(&self) -> Result<SelectionInfo, HostError> {
        let text = self.host.selection_text()?;
        if text.is_empty() {
            return Ok(SelectionInfo::of_page(&self.host.page_meta()));
        }
        let context = self.host.selection_sentence()?;
        Ok(SelectionInfo::selected(
            text,
            context,
            &self.host.page_meta(),
        ))
    }

    fn reply(&self) -> Value {
        match self.read() {
            Ok(info) => serde_json::to_value(info)
                .unwrap_or_else(|_| Value::String(String::new())),
            Err(err) => {
                warn!(%err, "snapshot read failed; replying with empty string");
                Value::String(String::new())
            }
        }
    }
}

impl Responder<Msg> for SnapshotResponder {
    fn respond(&self, request: &Msg) -> Option<Value> {
        if !matches!(request, Msg::PreloadSelection) {
            debug!(?request, "snapshot responder ignoring non-preload request");
            return None;
        }
        Some(self.reply())
    }
}
