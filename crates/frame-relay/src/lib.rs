pub mod registry;
pub mod relay;

pub use registry::{FixedRect, FrameRect, FrameRegistry, RectSource};
pub use relay::{FrameRelay, ParentPort};
