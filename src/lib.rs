//! Wordlens lookup core
//!
//! Watches page input for lookup gestures, classifies text selections, and
//! relays selection events from nested frames up to the outermost window's
//! message bus. One [`pipeline::FramePipeline`] runs per window; frames talk
//! to each other only through copied relay envelopes.

pub mod events;
pub mod pipeline;
pub mod sim;

// Re-export commonly used types for embedders
pub use events::{KeyKind, PageEvent};
pub use pipeline::{ChannelParentPort, FramePipeline, PipelineHandle};
pub use wordlens_config_center::{AppConfig, ConfigCenter, InMemoryConfigCenter, LanguageFlags};
pub use wordlens_core_types::{
    FrameId, GestureEvent, Msg, PageMeta, RelayEnvelope, SelectionInfo, RELAY_TAG,
};
pub use wordlens_event_bus::{EventBus, InMemoryBus};
pub use wordlens_frame_relay::{FixedRect, FrameRect, FrameRelay, RectSource};
pub use wordlens_selection::{HostPage, OVERLAY_FRAME_NAME, RESERVED_CLASS_PREFIX};
