pub mod classify;
pub mod host;
pub mod lang;
pub mod payload;
pub mod sentence;
pub mod snapshot;

pub use classify::{process_release, qualifies, release_passes_gate};
pub use host::{HostError, HostPage};
pub use lang::{contains_cjk, contains_latin};
pub use payload::{empty_payload, qualifying_payload};
pub use sentence::sentence_around;
pub use snapshot::SnapshotResponder;

/// Class-name prefix of UI elements this extension injects into pages.
pub const RESERVED_CLASS_PREFIX: &str = "wordlens-";

/// Window name the extension gives its own floating overlay frame.
pub const OVERLAY_FRAME_NAME: &str = "wordlens-frame";
