// User preferences: display toggles, zen mode, fonts, persistence

pub mod events;
pub mod platform;
pub mod storage;
pub mod store;

pub use events::PrefEvent;
pub use platform::{FontDefaults, HostPlatform, OsKind, PlatformQuery};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{LineHighlight, LineNumbers, PrefStore, Preferences, WordWrap, ZenSnapshot};
