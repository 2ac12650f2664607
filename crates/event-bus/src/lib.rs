use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use tokio::sync::{broadcast, mpsc};
use tracing::debug;

use wordlens_core_types::LensError;

/// Trait implemented by payload types that can be carried on the bus.
pub trait Event: Clone + Send + Sync + std::fmt::Debug + 'static {}

impl<T> Event for T where T: Clone + Send + Sync + std::fmt::Debug + 'static {}

/// Answers pull-style requests arriving on the bus. The reply is produced
/// synchronously; a request the responder does not recognize yields `None`.
pub trait Responder<E>: Send + Sync
where
    E: Event,
{
    fn respond(&self, request: &E) -> Option<Value>;
}

#[async_trait]
pub trait EventBus<E>: Send + Sync
where
    E: Event,
{
    /// Fire-and-forget publish; delivery to slow or absent subscribers is
    /// not guaranteed.
    async fn publish(&self, event: E) -> Result<(), LensError>;
    fn subscribe(&self) -> broadcast::Receiver<E>;
}

/// In-memory bus backing one window's pipeline; also the test substrate.
pub struct InMemoryBus<E>
where
    E: Event,
{
    sender: broadcast::Sender<E>,
    responder: RwLock<Option<Arc<dyn Responder<E>>>>,
}

impl<E> InMemoryBus<E>
where
    E: Event,
{
    pub fn new(capacity: usize) -> Arc<Self> {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Arc::new(Self {
            sender,
            responder: RwLock::new(None),
        })
    }

    /// Install the synchronous answerer for pull-style requests. The latest
    /// registration wins; one responder per bus is the expected shape.
    pub fn set_responder(&self, responder: Arc<dyn Responder<E>>) {
        *self.responder.write() = Some(responder);
    }

    /// Deliver a request to the registered responder and return its reply.
    /// `None` when no responder is installed or the request is not one it
    /// answers.
    pub fn request(&self, request: &E) -> Option<Value> {
        let guard = self.responder.read();
        match guard.as_ref() {
            Some(responder) => responder.respond(request),
            None => {
                debug!(?request, "bus request with no responder installed");
                None
            }
        }
    }
}

#[async_trait]
impl<E> EventBus<E> for InMemoryBus<E>
where
    E: Event,
{
    async fn publish(&self, event: E) -> Result<(), LensError> {
        self.sender
            .send(event)
            .map(|_| ())
            .map_err(|err| LensError::new(err.to_string()))
    }

    fn subscribe(&self) -> broadcast::Receiver<E> {
        self.sender.subscribe()
    }
}

/// Helper to materialise an mpsc receiver from the bus subscription
/// so callers can await events without handling broadcast semantics directly.
pub fn to_mpsc<E>(bus: Arc<InMemoryBus<E>>, capacity: usize) -> mpsc::Receiver<E>
where
    E: Event,
{
    let mut rx = bus.subscribe();
    let (tx, out_rx) = mpsc::channel(capacity.max(1));
    tokio::spawn(async move {
        while let Ok(ev) = rx.recv().await {
            if tx.send(ev).await.is_err() {
                break;
            }
        }
    });
    out_rx
}
