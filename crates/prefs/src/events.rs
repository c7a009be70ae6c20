//! Change notifications for preference mutations.
//!
//! Every mutation through the store publishes exactly one event before the
//! write-through to storage. UI consumers subscribe to repaint; the store
//! itself is the single subscriber that persists.

use crate::platform::OsKind;

/// Emitted by the preference store after a field changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefEvent {
    Minimap(bool),
    WordWrap,
    LineNumbers,
    VimMode(bool),
    StatusBar(bool),
    WordCount(bool),
    LineHighlight,
    ShowTabs(bool),
    /// Zen mode entered (true) or exited (false)
    ZenMode(bool),
    OccurrencesHighlight(bool),
    /// A font family or size changed
    Fonts,
    /// OS identity resolved; unset font slots now hold OS defaults
    PlatformResolved(OsKind),
}

/// Callback invoked with each published event.
pub type Listener = Box<dyn FnMut(&PrefEvent)>;
