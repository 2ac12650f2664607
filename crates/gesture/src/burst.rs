use std::time::Duration;

use tokio::time::Instant;

use wordlens_core_types::GestureEvent;

/// Presses needed inside one buffer for the gesture to fire.
pub const BURST_THRESHOLD: u32 = 3;

/// Quiet gap that closes the current buffer.
pub const INACTIVITY_WINDOW: Duration = Duration::from_millis(500);

/// Timer-driven accumulator behind the triple-modifier gesture.
///
/// Modifier presses are pulses. A buffer collects pulses until the inactivity
/// window elapses with no new pulse; closing a buffer fires a gesture iff it
/// holds at least `threshold` pulses, and the next buffer starts empty.
/// Releases never touch the buffer; only inactivity closes it.
#[derive(Debug)]
pub struct BurstAccumulator {
    window: Duration,
    threshold: u32,
    pulses: u32,
    deadline: Option<Instant>,
}

impl BurstAccumulator {
    pub fn new(window: Duration, threshold: u32) -> Self {
        Self {
            window,
            threshold: threshold.max(1),
            pulses: 0,
            deadline: None,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(INACTIVITY_WINDOW, BURST_THRESHOLD)
    }

    /// Record a pulse at `now`.
    ///
    /// If the previous buffer had already gone quiet before this pulse, it is
    /// closed first, and a gesture it fired is returned; the new pulse then
    /// opens a fresh buffer.
    pub fn pulse(&mut self, now: Instant) -> Option<GestureEvent> {
        let fired = self.settle(now);
        self.pulses += 1;
        self.deadline = Some(now + self.window);
        fired
    }

    /// Close the buffer if the inactivity window has elapsed at `now`.
    pub fn settle(&mut self, now: Instant) -> Option<GestureEvent> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                let fired = self.pulses >= self.threshold;
                self.pulses = 0;
                self.deadline = None;
                fired.then_some(GestureEvent)
            }
            _ => None,
        }
    }

    /// When the current buffer will close unless another pulse arrives.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn pulse_count(&self) -> u32 {
        self.pulses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn three_rapid_pulses_fire_on_settle() {
        let start = Instant::now();
        let mut acc = BurstAccumulator::with_defaults();

        assert_eq!(acc.pulse(start), None);
        assert_eq!(acc.pulse(start + ms(100)), None);
        assert_eq!(acc.pulse(start + ms(200)), None);
        assert_eq!(acc.pulse_count(), 3);

        // Still inside the window: nothing closes yet.
        assert_eq!(acc.settle(start + ms(400)), None);
        assert_eq!(acc.settle(start + ms(700)), Some(GestureEvent));
        assert_eq!(acc.pulse_count(), 0);

        // Buffer is closed; settling again is a no-op.
        assert_eq!(acc.settle(start + ms(800)), None);
    }

    #[test]
    fn slow_pulses_never_fire() {
        let start = Instant::now();
        let mut acc = BurstAccumulator::with_defaults();

        assert_eq!(acc.pulse(start), None);
        assert_eq!(acc.pulse(start + ms(600)), None);
        assert_eq!(acc.pulse(start + ms(1200)), None);
        assert_eq!(acc.settle(start + ms(1700)), None);
    }

    #[test]
    fn gap_resets_the_buffer_before_later_presses() {
        let start = Instant::now();
        let mut acc = BurstAccumulator::with_defaults();

        acc.pulse(start);
        acc.pulse(start + ms(100));
        // A full window of silence closes the two-pulse buffer without firing;
        // the late press lands in a fresh buffer.
        assert_eq!(acc.pulse(start + ms(700)), None);
        assert_eq!(acc.pulse_count(), 1);
    }

    #[test]
    fn exactly_window_gap_counts_as_reset() {
        let start = Instant::now();
        let mut acc = BurstAccumulator::with_defaults();

        acc.pulse(start);
        acc.pulse(start + ms(500));
        acc.pulse(start + ms(1000));
        assert_eq!(acc.settle(start + ms(1500)), None);
    }

    #[test]
    fn long_run_of_close_pulses_fires_once() {
        let start = Instant::now();
        let mut acc = BurstAccumulator::with_defaults();

        for i in 0..5 {
            assert_eq!(acc.pulse(start + ms(i * 400)), None);
        }
        assert_eq!(acc.settle(start + ms(4 * 400 + 500)), Some(GestureEvent));
    }

    #[test]
    fn expired_buffer_fires_through_a_late_pulse() {
        let start = Instant::now();
        let mut acc = BurstAccumulator::with_defaults();

        acc.pulse(start);
        acc.pulse(start + ms(100));
        acc.pulse(start + ms(200));
        // No settle ran before the next press; the stale buffer still counts.
        assert_eq!(acc.pulse(start + ms(900)), Some(GestureEvent));
        assert_eq!(acc.pulse_count(), 1);
    }
}
