// Host platform identity and per-OS font defaults

use serde::{Deserialize, Serialize};

/// Operating system the app is running on, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsKind {
    MacOs,
    Windows,
    Linux,
    /// Query failed or returned something unrecognized
    #[default]
    Unknown,
}

/// Answers the OS-identity question. Trait so tests can fake the host.
pub trait PlatformQuery {
    /// Report the host OS. Errors are mapped to `OsKind::Unknown` by the
    /// caller; implementations never panic.
    fn os_kind(&self) -> Result<OsKind, String>;
}

/// Production query backed by the compile-time host triple.
pub struct HostPlatform;

impl PlatformQuery for HostPlatform {
    fn os_kind(&self) -> Result<OsKind, String> {
        Ok(match std::env::consts::OS {
            "macos" => OsKind::MacOs,
            "windows" => OsKind::Windows,
            "linux" => OsKind::Linux,
            _ => OsKind::Unknown,
        })
    }
}

/// Default font families for one OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontDefaults {
    pub editor: &'static str,
    pub preview: &'static str,
    pub code: &'static str,
}

const MACOS_FONTS: FontDefaults = FontDefaults {
    editor: "SF Pro Text",
    preview: "SF Pro Text",
    code: "Menlo",
};

// The Unknown table intentionally matches Windows; keep them one constant
// so they cannot drift apart.
const WINDOWS_FONTS: FontDefaults = FontDefaults {
    editor: "Segoe UI",
    preview: "Segoe UI",
    code: "Consolas",
};

const LINUX_FONTS: FontDefaults = FontDefaults {
    editor: "Ubuntu",
    preview: "Ubuntu",
    code: "DejaVu Sans Mono",
};

impl OsKind {
    /// Default font families for this OS.
    pub fn font_defaults(&self) -> FontDefaults {
        match self {
            OsKind::MacOs => MACOS_FONTS,
            OsKind::Windows | OsKind::Unknown => WINDOWS_FONTS,
            OsKind::Linux => LINUX_FONTS,
        }
    }
}
