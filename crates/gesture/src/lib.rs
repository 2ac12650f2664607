pub mod burst;
pub mod detector;

pub use burst::{BurstAccumulator, BURST_THRESHOLD, INACTIVITY_WINDOW};
pub use detector::GestureDetector;
