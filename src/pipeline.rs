//! Per-window assembly of the detection-and-relay pipeline.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use wordlens_config_center::ConfigCenter;
use wordlens_core_types::{FrameId, Msg};
use wordlens_event_bus::{EventBus, InMemoryBus};
use wordlens_frame_relay::{FrameRelay, ParentPort};
use wordlens_gesture::GestureDetector;
use wordlens_selection::{process_release, HostPage, SnapshotResponder};

use crate::events::PageEvent;

/// Parent port that copies the serialized envelope into the parent
/// pipeline's inbound child-message channel, the way the browser copies a
/// `postMessage` payload across the window boundary.
pub struct ChannelParentPort {
    source: FrameId,
    parent_inbox: mpsc::UnboundedSender<(FrameId, Value)>,
}

impl ChannelParentPort {
    /// `source` is the id the parent assigned this frame at registration.
    pub fn new(source: FrameId, parent_inbox: mpsc::UnboundedSender<(FrameId, Value)>) -> Arc<Self> {
        Arc::new(Self {
            source,
            parent_inbox,
        })
    }
}

impl ParentPort for ChannelParentPort {
    fn post(&self, message: Value) {
        // Fire-and-forget: a parent that is already gone loses the message.
        if self.parent_inbox.send((self.source, message)).is_err() {
            debug!(source = %self.source, "parent window gone; relay message lost");
        }
    }
}

/// Handles into one window's running pipeline.
pub struct PipelineHandle {
    /// DOM-level input for this window.
    pub events: mpsc::Sender<PageEvent>,
    /// Inbound cross-window messages from this window's children.
    pub child_inbox: mpsc::UnboundedSender<(FrameId, Value)>,
    /// This window's relay; children are registered through its registry.
    pub relay: Arc<FrameRelay>,
    /// This window's local bus.
    pub bus: Arc<InMemoryBus<Msg>>,
    tasks: Vec<JoinHandle<()>>,
}

impl PipelineHandle {
    pub fn shutdown(&self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

/// One window's pipeline: event adapters in, bus messages out.
///
/// Owns its subscriptions and timers; nothing is shared with other windows
/// beyond the copied relay envelopes.
pub struct FramePipeline;

impl FramePipeline {
    pub fn spawn(
        host: Arc<dyn HostPage>,
        config: Arc<dyn ConfigCenter>,
        bus: Arc<InMemoryBus<Msg>>,
        relay: FrameRelay,
    ) -> PipelineHandle {
        let relay = Arc::new(relay);

        bus.set_responder(SnapshotResponder::new(host.clone()));

        let (event_tx, mut event_rx) = mpsc::channel::<PageEvent>(64);
        let (child_tx, mut child_rx) = mpsc::unbounded_channel::<(FrameId, Value)>();
        let (pulse_tx, pulse_rx) = mpsc::channel::<()>(16);
        let (gesture_tx, mut gesture_rx) = mpsc::channel(16);

        let detector = GestureDetector::spawn(pulse_rx, config.subscribe(), gesture_tx);

        let loop_host = host;
        let loop_bus = bus.clone();
        let loop_relay = relay.clone();
        let config_rx = config.subscribe();

        let main_task = tokio::spawn(async move {
            // Latest modifier engagement; feeds `ctrl_key` on selection events.
            let mut modifier_engaged = false;

            loop {
                tokio::select! {
                    maybe_event = event_rx.recv() => {
                        let Some(event) = maybe_event else { break };
                        match event {
                            PageEvent::KeyDown { key } if key.is_modifier() => {
                                modifier_engaged = true;
                                if pulse_tx.try_send(()).is_err() {
                                    debug!("gesture detector busy; pulse dropped");
                                }
                            }
                            PageEvent::KeyDown { .. } | PageEvent::KeyUp | PageEvent::Blur => {
                                modifier_engaged = false;
                            }
                            PageEvent::MouseRelease { x, y, target_class, db_click } => {
                                let config = config_rx.borrow().clone();
                                let payload = process_release(
                                    loop_host.as_ref(),
                                    config.as_ref(),
                                    target_class.as_deref(),
                                )
                                .await;
                                if let Some(info) = payload {
                                    loop_relay
                                        .deliver_local(info, x, y, modifier_engaged, db_click)
                                        .await;
                                }
                            }
                        }
                    }
                    maybe_child = child_rx.recv() => {
                        let Some((source, data)) = maybe_child else { break };
                        loop_relay.on_child_message(source, &data).await;
                    }
                    maybe_gesture = gesture_rx.recv() => {
                        let Some(_event) = maybe_gesture else { break };
                        info!("publishing triple-modifier event");
                        if let Err(err) = loop_bus.publish(Msg::TripleModifier).await {
                            debug!(%err, "triple-modifier had no bus subscribers");
                        }
                    }
                }
            }
        });

        PipelineHandle {
            events: event_tx,
            child_inbox: child_tx,
            relay,
            bus,
            tasks: vec![main_task, detector],
        }
    }
}
