//! Document-root appearance marker.

/// Process-wide "dark"/"light" marker toggled by the legacy dark-mode path.
///
/// Consumers that style themselves from the root element's class (rather
/// than from [`LayoutState`](super::LayoutState)) subscribe to this
/// separately; the store never applies it itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootMarker {
    Dark,
    Light,
}

impl RootMarker {
    pub fn from_dark_flag(is_dark: bool) -> Self {
        if is_dark {
            RootMarker::Dark
        } else {
            RootMarker::Light
        }
    }

    /// Class name applied to the root element.
    pub fn as_class(self) -> &'static str {
        match self {
            RootMarker::Dark => "dark",
            RootMarker::Light => "light",
        }
    }
}
