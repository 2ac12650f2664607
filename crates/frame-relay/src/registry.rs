use std::sync::Arc;

use dashmap::DashMap;

use wordlens_core_types::FrameId;

/// Offset of a child iframe in its parent's coordinate space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameRect {
    pub left: f64,
    pub top: f64,
}

/// Live accessor for a child iframe's bounding rectangle.
///
/// `None` means the element is no longer attached; a relay message claiming
/// to come from such a child is dropped.
pub trait RectSource: Send + Sync {
    fn bounding_rect(&self) -> Option<FrameRect>;
}

/// Rect that never moves; enough for simulated frames and tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedRect(pub FrameRect);

impl RectSource for FixedRect {
    fn bounding_rect(&self) -> Option<FrameRect> {
        Some(self.0)
    }
}

/// Per-window map from child-frame identifier to rect accessor.
///
/// Ids are handed out when the embedding window registers the child, so
/// inbound messages are matched by identifier instead of by comparing window
/// object identity across the frame boundary.
#[derive(Default)]
pub struct FrameRegistry {
    children: DashMap<FrameId, Arc<dyn RectSource>>,
}

impl FrameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, rect: Arc<dyn RectSource>) -> FrameId {
        let id = FrameId::new();
        self.children.insert(id, rect);
        id
    }

    pub fn unregister(&self, id: &FrameId) {
        self.children.remove(id);
    }

    /// Current rect of a registered child; `None` for unknown or detached
    /// children alike.
    pub fn rect_of(&self, id: &FrameId) -> Option<FrameRect> {
        self.children
            .get(id)
            .and_then(|entry| entry.value().bounding_rect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DetachedRect;

    impl RectSource for DetachedRect {
        fn bounding_rect(&self) -> Option<FrameRect> {
            None
        }
    }

    #[test]
    fn registered_child_reports_its_rect() {
        let registry = FrameRegistry::new();
        let id = registry.register(Arc::new(FixedRect(FrameRect {
            left: 50.0,
            top: 20.0,
        })));
        assert_eq!(
            registry.rect_of(&id),
            Some(FrameRect {
                left: 50.0,
                top: 20.0
            })
        );
    }

    #[test]
    fn unknown_and_detached_children_have_no_rect() {
        let registry = FrameRegistry::new();
        assert_eq!(registry.rect_of(&FrameId::new()), None);

        let id = registry.register(Arc::new(DetachedRect));
        assert_eq!(registry.rect_of(&id), None);

        let id = registry.register(Arc::new(FixedRect(FrameRect {
            left: 1.0,
            top: 2.0,
        })));
        registry.unregister(&id);
        assert_eq!(registry.rect_of(&id), None);
    }
}
