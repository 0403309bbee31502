use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BLEND_SECONDS, DEFAULT_HOTKEY_RELOAD, DEFAULT_HOTKEY_SAVE, DEFAULT_HOTKEY_TOGGLE_UI,
};

/// Session-wide settings persisted next to the presets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Follow the live weather and clock instead of the editor selection.
    pub auto_apply: bool,
    /// Cross-fade duration in seconds. Zero or negative jumps immediately.
    pub blend_seconds: f32,
    /// Virtual-key codes for the editor actions.
    pub hotkey_save: u32,
    pub hotkey_reload: u32,
    pub hotkey_toggle_ui: u32,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            auto_apply: true,
            blend_seconds: DEFAULT_BLEND_SECONDS,
            hotkey_save: DEFAULT_HOTKEY_SAVE,
            hotkey_reload: DEFAULT_HOTKEY_RELOAD,
            hotkey_toggle_ui: DEFAULT_HOTKEY_TOGGLE_UI,
        }
    }
}

/// Parse a persisted boolean. Accepts `1`, `true`, `yes` (case-insensitive).
pub fn parse_flag(raw: &str) -> bool {
    let raw = raw.trim();
    raw == "1" || raw.eq_ignore_ascii_case("true") || raw.eq_ignore_ascii_case("yes")
}

/// Parse a persisted hotkey: decimal or `0x`-prefixed hex.
/// Anything else (e.g. a symbolic `VK_F10`) yields `None`.
pub fn parse_hotkey(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()
    } else {
        raw.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GlobalConfig::default();
        assert!(config.auto_apply);
        assert_eq!(config.blend_seconds, 1.0);
        assert_eq!(config.hotkey_save, 0x79);
        assert_eq!(config.hotkey_reload, 0x7A);
        assert_eq!(config.hotkey_toggle_ui, 0x78);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("Yes"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("off"));
    }

    #[test]
    fn test_parse_hotkey() {
        assert_eq!(parse_hotkey("121"), Some(121));
        assert_eq!(parse_hotkey("0x7A"), Some(0x7A));
        assert_eq!(parse_hotkey("VK_F10"), None);
    }
}
