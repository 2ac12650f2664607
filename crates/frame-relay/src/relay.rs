use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use wordlens_core_types::{FrameId, Msg, RelayEnvelope, SelectionInfo};
use wordlens_event_bus::EventBus;

use crate::registry::FrameRegistry;

/// Fire-and-forget transport toward the enclosing window.
///
/// No acknowledgment: a message posted to a destroyed or navigated-away
/// parent is simply lost and never retried.
pub trait ParentPort: Send + Sync {
    fn post(&self, message: Value);
}

/// Per-window relay deciding "am I top, or do I forward further".
///
/// A `Top` window terminates the chain by handing the event to its local
/// bus; a `Nested` one re-bases inbound child coordinates by the child
/// iframe's offset and posts the result one hop up. Every hop is derived
/// from the message contents plus this window's own registry; no state is
/// shared across windows.
pub struct FrameRelay {
    registry: FrameRegistry,
    parent: Option<Arc<dyn ParentPort>>,
    bus: Arc<dyn EventBus<Msg>>,
}

impl FrameRelay {
    /// Relay for an outermost window (it is its own parent).
    pub fn top(bus: Arc<dyn EventBus<Msg>>) -> Self {
        Self {
            registry: FrameRegistry::new(),
            parent: None,
            bus,
        }
    }

    /// Relay for an embedded window that forwards to `parent`.
    pub fn nested(bus: Arc<dyn EventBus<Msg>>, parent: Arc<dyn ParentPort>) -> Self {
        Self {
            registry: FrameRegistry::new(),
            parent: Some(parent),
            bus,
        }
    }

    pub fn is_top(&self) -> bool {
        self.parent.is_none()
    }

    /// Registry of this window's own child frames.
    pub fn registry(&self) -> &FrameRegistry {
        &self.registry
    }

    /// Route a payload built in this window. The coordinates are already in
    /// this window's space, so no offset is applied before forwarding.
    pub async fn deliver_local(
        &self,
        selection_info: SelectionInfo,
        mouse_x: f64,
        mouse_y: f64,
        ctrl_key: bool,
        db_click: bool,
    ) {
        match &self.parent {
            None => {
                self.publish(selection_info, mouse_x, mouse_y, ctrl_key, db_click)
                    .await;
            }
            Some(parent) => {
                let envelope = RelayEnvelope {
                    selection_info,
                    mouse_x,
                    mouse_y,
                    ctrl_key,
                };
                debug!(mouse_x, mouse_y, "forwarding local selection to parent");
                parent.post(envelope.to_wire());
            }
        }
    }

    /// Handle an inbound cross-window message claiming to come from the
    /// registered child `source`. Anything without our discriminator tag is
    /// ignored; a source with no live iframe drops the message.
    pub async fn on_child_message(&self, source: FrameId, data: &Value) {
        let Some(envelope) = RelayEnvelope::from_wire(data) else {
            debug!(%source, "ignoring unrecognized cross-window message");
            return;
        };

        let Some(rect) = self.registry.rect_of(&source) else {
            debug!(%source, "relay source has no live iframe; dropping");
            return;
        };

        let mouse_x = envelope.mouse_x + rect.left;
        let mouse_y = envelope.mouse_y + rect.top;

        match &self.parent {
            None => {
                self.publish(
                    envelope.selection_info,
                    mouse_x,
                    mouse_y,
                    envelope.ctrl_key,
                    false,
                )
                .await;
            }
            Some(parent) => {
                let forwarded = RelayEnvelope {
                    selection_info: envelope.selection_info,
                    mouse_x,
                    mouse_y,
                    ctrl_key: envelope.ctrl_key,
                };
                debug!(%source, mouse_x, mouse_y, "relaying child selection one hop up");
                parent.post(forwarded.to_wire());
            }
        }
    }

    async fn publish(
        &self,
        selection_info: SelectionInfo,
        mouse_x: f64,
        mouse_y: f64,
        ctrl_key: bool,
        db_click: bool,
    ) {
        info!(
            mouse_x,
            mouse_y,
            text = %selection_info.text,
            "delivering selection to local bus"
        );
        let msg = Msg::Selection {
            selection_info,
            mouse_x,
            mouse_y,
            ctrl_key,
            db_click,
        };
        if let Err(err) = self.bus.publish(msg).await {
            debug!(%err, "selection had no bus subscribers");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{FixedRect, FrameRect};
    use parking_lot::Mutex;
    use wordlens_core_types::PageMeta;
    use wordlens_event_bus::InMemoryBus;

    struct CapturePort {
        posted: Mutex<Vec<Value>>,
    }

    impl CapturePort {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                posted: Mutex::new(Vec::new()),
            })
        }

        fn take(&self) -> Vec<Value> {
            std::mem::take(&mut self.posted.lock())
        }
    }

    impl ParentPort for CapturePort {
        fn post(&self, message: Value) {
            self.posted.lock().push(message);
        }
    }

    fn info() -> SelectionInfo {
        SelectionInfo::selected(
            "hello",
            "hello world.",
            &PageMeta {
                title: "T".into(),
                url: "u".into(),
                favicon: String::new(),
            },
        )
    }

    #[tokio::test]
    async fn top_delivers_local_payload_to_bus() {
        let bus = InMemoryBus::<Msg>::new(8);
        let mut rx = bus.subscribe();
        let relay = FrameRelay::top(bus);

        relay.deliver_local(info(), 10.0, 10.0, true, false).await;

        match rx.recv().await.unwrap() {
            Msg::Selection {
                mouse_x,
                mouse_y,
                ctrl_key,
                ..
            } => {
                assert_eq!(mouse_x, 10.0);
                assert_eq!(mouse_y, 10.0);
                assert!(ctrl_key);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn nested_forwards_local_payload_unshifted() {
        let bus = InMemoryBus::<Msg>::new(8);
        let port = CapturePort::new();
        let relay = FrameRelay::nested(bus, port.clone());

        relay.deliver_local(info(), 10.0, 20.0, false, false).await;

        let posted = port.take();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0]["tag"], "FRAME_RELAY_SELECTION");
        assert_eq!(posted[0]["mouseX"], 10.0);
        assert_eq!(posted[0]["mouseY"], 20.0);
    }

    #[tokio::test]
    async fn top_rebases_child_coordinates_by_iframe_offset() {
        let bus = InMemoryBus::<Msg>::new(8);
        let mut rx = bus.subscribe();
        let relay = FrameRelay::top(bus);
        let child = relay.registry().register(Arc::new(FixedRect(FrameRect {
            left: 50.0,
            top: 20.0,
        })));

        let envelope = RelayEnvelope {
            selection_info: info(),
            mouse_x: 10.0,
            mouse_y: 10.0,
            ctrl_key: false,
        };
        relay.on_child_message(child, &envelope.to_wire()).await;

        match rx.recv().await.unwrap() {
            Msg::Selection {
                mouse_x,
                mouse_y,
                db_click,
                ..
            } => {
                assert_eq!(mouse_x, 60.0);
                assert_eq!(mouse_y, 30.0);
                assert!(!db_click);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn middle_hop_adds_its_own_offset_and_forwards() {
        let bus = InMemoryBus::<Msg>::new(8);
        let port = CapturePort::new();
        let relay = FrameRelay::nested(bus, port.clone());
        let child = relay.registry().register(Arc::new(FixedRect(FrameRect {
            left: 5.0,
            top: 5.0,
        })));

        let envelope = RelayEnvelope {
            selection_info: info(),
            mouse_x: 10.0,
            mouse_y: 10.0,
            ctrl_key: true,
        };
        relay.on_child_message(child, &envelope.to_wire()).await;

        let posted = port.take();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0]["mouseX"], 15.0);
        assert_eq!(posted[0]["mouseY"], 15.0);
        assert_eq!(posted[0]["ctrlKey"], true);
    }

    #[tokio::test]
    async fn unknown_source_is_dropped_silently() {
        let bus = InMemoryBus::<Msg>::new(8);
        let mut rx = bus.subscribe();
        let relay = FrameRelay::top(bus);

        let envelope = RelayEnvelope {
            selection_info: info(),
            mouse_x: 1.0,
            mouse_y: 1.0,
            ctrl_key: false,
        };
        relay
            .on_child_message(FrameId::new(), &envelope.to_wire())
            .await;

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn untagged_messages_are_ignored() {
        let bus = InMemoryBus::<Msg>::new(8);
        let mut rx = bus.subscribe();
        let relay = FrameRelay::top(bus);
        let child = relay.registry().register(Arc::new(FixedRect(FrameRect {
            left: 0.0,
            top: 0.0,
        })));

        relay
            .on_child_message(child, &serde_json::json!({ "tag": "SOMETHING_ELSE" }))
            .await;
        relay
            .on_child_message(child, &serde_json::json!(42))
            .await;

        assert!(rx.try_recv().is_err());
    }
}
