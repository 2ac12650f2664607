use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use uuid::Uuid;

/// Shared error type for the lookup-core crates.
#[derive(Debug, Error, Clone)]
pub enum LensError {
    #[error("{message}")]
    Message { message: String },
}

impl LensError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

/// Identifier a parent window assigns to a child frame when the frame is
/// registered. Stands in for window-object identity across the frame boundary.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct FrameId(pub Uuid);

impl FrameId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FrameId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FrameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Metadata of the page a selection was made on.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    pub title: String,
    pub url: String,
    pub favicon: String,
}

/// Normalized record of what the user selected.
///
/// `trans` and `note` are always empty at creation; later consumers fill them
/// in. `text` and `context` are empty together when no qualifying selection
/// exists, which is how downstream readers tell "nothing usable" apart from a
/// real lookup.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SelectionInfo {
    pub text: String,
    pub context: String,
    pub title: String,
    pub url: String,
    pub favicon: String,
    pub trans: String,
    pub note: String,
}

impl SelectionInfo {
    /// Empty-text record carrying only the page metadata.
    pub fn of_page(page: &PageMeta) -> Self {
        Self {
            title: page.title.clone(),
            url: page.url.clone(),
            favicon: page.favicon.clone(),
            ..Self::default()
        }
    }

    /// Record for a real selection: raw text plus its surrounding sentence.
    pub fn selected(text: impl Into<String>, context: impl Into<String>, page: &PageMeta) -> Self {
        Self {
            text: text.into(),
            context: context.into(),
            ..Self::of_page(page)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Payloads carried on the local message bus of one window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Msg {
    /// A mouse release was processed; `selection_info.text` may be empty.
    #[serde(rename_all = "camelCase")]
    Selection {
        selection_info: SelectionInfo,
        mouse_x: f64,
        mouse_y: f64,
        ctrl_key: bool,
        db_click: bool,
    },
    /// The modifier key was hit three or more times in quick succession.
    TripleModifier,
    /// Pull-style request for the current selection; answered synchronously.
    PreloadSelection,
}

/// Zero-payload marker emitted once per qualifying modifier-key burst.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GestureEvent;

/// Discriminator tag on the cross-window wire form.
pub const RELAY_TAG: &str = "FRAME_RELAY_SELECTION";

/// Wire message a nested frame posts to its parent. Structurally the same
/// payload as `Msg::Selection` but tagged distinctly because it crosses the
/// window boundary rather than the internal bus.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayEnvelope {
    pub selection_info: SelectionInfo,
    pub mouse_x: f64,
    pub mouse_y: f64,
    pub ctrl_key: bool,
}

impl RelayEnvelope {
    /// Serialize into the tagged wire form posted across the window boundary.
    pub fn to_wire(&self) -> Value {
        json!({
            "tag": RELAY_TAG,
            "selectionInfo": self.selection_info,
            "mouseX": self.mouse_x,
            "mouseY": self.mouse_y,
            "ctrlKey": self.ctrl_key,
        })
    }

    /// Accept an inbound cross-window value only when the discriminator tag
    /// matches; anything else is not ours and yields `None`.
    pub fn from_wire(value: &Value) -> Option<Self> {
        if value.get("tag").and_then(Value::as_str) != Some(RELAY_TAG) {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}
