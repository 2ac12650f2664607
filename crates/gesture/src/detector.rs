use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use wordlens_config_center::AppConfig;
use wordlens_core_types::GestureEvent;

use crate::burst::BurstAccumulator;

/// Drives a [`BurstAccumulator`] from a live pulse stream.
///
/// Each item on `pulses` is one modifier-key press. The press only counts
/// while `triple_ctrl` is enabled at the moment it is evaluated; presses
/// arriving while the gesture is disabled leave the buffer untouched.
pub struct GestureDetector;

impl GestureDetector {
    pub fn spawn(
        mut pulses: mpsc::Receiver<()>,
        config: watch::Receiver<Arc<AppConfig>>,
        gestures: mpsc::Sender<GestureEvent>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut acc = BurstAccumulator::with_defaults();
            loop {
                let received = match acc.deadline() {
                    Some(deadline) => {
                        tokio::select! {
                            maybe_pulse = pulses.recv() => maybe_pulse,
                            _ = sleep_until(deadline) => {
                                if let Some(event) = acc.settle(Instant::now()) {
                                    info!("triple-modifier gesture recognized");
                                    if gestures.send(event).await.is_err() {
                                        return;
                                    }
                                }
                                continue;
                            }
                        }
                    }
                    None => pulses.recv().await,
                };

                match received {
                    Some(()) => {
                        if !config.borrow().triple_ctrl {
                            debug!("modifier press ignored: gesture disabled");
                            continue;
                        }
                        // A stale buffer the timer never closed can still fire
                        // here before the new buffer opens.
                        if let Some(event) = acc.pulse(Instant::now()) {
                            info!("triple-modifier gesture recognized");
                            if gestures.send(event).await.is_err() {
                                return;
                            }
                        }
                    }
                    None => return,
                }
            }
        })
    }
}
