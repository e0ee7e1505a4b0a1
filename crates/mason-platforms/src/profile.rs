//! The platform profile model.
//!
//! For any recognized platform exactly one profile applies, producing a
//! complete settings tuple. The profile is read-only input to plan
//! resolution; nothing mutates it after selection.

use serde::{Deserialize, Serialize};

use mason_core::Settings;

/// A named platform and the settings it selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformProfile {
    /// Platform name (e.g. "macos", "ios").
    pub name: String,
    /// Short human-readable description.
    #[serde(default)]
    pub description: String,
    /// The settings tuple this platform selects.
    #[serde(default)]
    pub settings: Settings,
}

impl PlatformProfile {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            settings: Settings::new(),
        }
    }

    /// Desktop macOS profile.
    pub fn macos() -> Self {
        let mut profile = Self::new("macos", "Desktop macOS (SDK macosx10.10)");
        profile.settings.set("MACOS_SDK", "macosx10.10");
        profile.settings.set("THREADING", "Posix");
        profile.settings.set("SOUND", "OpenAL");
        profile.settings.set("RENDERER", "OpenGL");
        profile
    }

    /// iOS device profile.
    pub fn ios() -> Self {
        let mut profile = Self::new("ios", "iOS device (SDK iphoneos8.0)");
        profile.settings.set("IOS_SDK", "iphoneos8.0");
        profile.settings.set("THREADING", "Posix");
        profile.settings.set("SOUND", "OpenAL");
        profile.settings.set("RENDERER", "OpenGL");
        profile
    }

    /// Look up a built-in profile by name. Unrecognized names resolve to
    /// nothing; no default profile is invented.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "macos" => Some(Self::macos()),
            "ios" => Some(Self::ios()),
            _ => None,
        }
    }

    /// Names and descriptions of all built-in profiles.
    pub fn builtin_names() -> Vec<(&'static str, &'static str)> {
        vec![
            ("macos", "Desktop macOS (SDK macosx10.10)"),
            ("ios", "iOS device (SDK iphoneos8.0)"),
        ]
    }
}
