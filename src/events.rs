//! Raw page input as the embedder delivers it to one frame's pipeline.

/// Key identity, reduced to what the gesture cares about.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyKind {
    Control,
    Meta,
    Other,
}

impl KeyKind {
    /// Control and Meta (command on mac) both count as the lookup modifier.
    pub fn is_modifier(self) -> bool {
        matches!(self, Self::Control | Self::Meta)
    }
}

/// One DOM-level input event, already stripped to the fields this core reads.
#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
    KeyDown {
        key: KeyKind,
    },
    KeyUp,
    /// The window lost focus; treated as a release.
    Blur,
    MouseRelease {
        /// Pointer position in this window's own coordinate space.
        x: f64,
        y: f64,
        /// `class` attribute of the element under the pointer, if any.
        target_class: Option<String>,
        db_click: bool,
    },
}
