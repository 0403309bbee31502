use stratus_core::config::GlobalConfig;
use stratus_core::preset::{CloudPreset, GlobalParams, LayerParams};
use stratus_core::types::{TimeBucket, Weather};

use crate::ini::IniSection;

/// Section holding [`GlobalConfig`].
pub const GLOBAL_SECTION: &str = "Global";

/// Prefixes of the two layer records in files and uniform names.
pub const BOTTOM_LAYER_PREFIX: &str = "Bottom";
pub const TOP_LAYER_PREFIX: &str = "Top";

/// Persisted names of the moon color components.
pub const MOON_COLOR_KEYS: [&str; 3] = ["MoonColorR", "MoonColorG", "MoonColorB"];

/// Canonical preset id, e.g. `CLEAR_12:00`.
pub fn preset_key(weather: Weather, bucket: TimeBucket) -> String {
    format!("{}_{}", weather.name(), bucket)
}

/// Parse a section name back into its (weather, bucket) pair.
/// Accepts the canonical `CLEAR_12:00` and the legacy `CLEAR:12:00` forms.
pub fn parse_preset_key(key: &str) -> Option<(Weather, TimeBucket)> {
    let split = key.find(|c: char| c == '_' || c == ':')?;
    let weather = Weather::from_name(&key[..split])?;
    let bucket = key[split + 1..].parse().ok()?;
    Some((weather, bucket))
}

/// Field key for one layer field, e.g. `BottomScale` or `TopCover`.
pub fn layer_field_key(prefix: &str, field: &str) -> String {
    format!("{prefix}{field}")
}

fn write_layer(section: &mut IniSection, prefix: &str, layer: &LayerParams) {
    for (field, value) in layer.fields() {
        section.set_float(layer_field_key(prefix, field), value);
    }
}

fn read_layer(section: &IniSection, prefix: &str) -> LayerParams {
    let mut layer = LayerParams::default();
    for (slot, field) in layer.as_array_mut().iter_mut().zip(LayerParams::FIELD_NAMES) {
        *slot = section.get_float(&layer_field_key(prefix, field), *slot);
    }
    layer
}

/// Write every field of a preset as `key=value` entries.
pub fn write_preset(section: &mut IniSection, preset: &CloudPreset) {
    write_layer(section, BOTTOM_LAYER_PREFIX, &preset.bottom_layer);
    write_layer(section, TOP_LAYER_PREFIX, &preset.top_layer);
    for (name, value) in preset.global.scalars() {
        section.set_float(name, value);
    }
    for (key, value) in MOON_COLOR_KEYS.iter().zip(preset.global.moon_color) {
        section.set_float(*key, value);
    }
}

/// Read a preset. Absent or unparseable fields keep their defaults.
pub fn read_preset(section: &IniSection) -> CloudPreset {
    let mut global = GlobalParams::default();
    for (slot, name) in global.as_array_mut().iter_mut().zip(GlobalParams::SCALAR_NAMES) {
        *slot = section.get_float(name, *slot);
    }
    for (slot, key) in global.moon_color.iter_mut().zip(MOON_COLOR_KEYS) {
        *slot = section.get_float(key, *slot);
    }

    CloudPreset {
        bottom_layer: read_layer(section, BOTTOM_LAYER_PREFIX),
        top_layer: read_layer(section, TOP_LAYER_PREFIX),
        global,
    }
}

pub fn write_config(section: &mut IniSection, config: &GlobalConfig) {
    section.set_bool("AutoApply", config.auto_apply);
    section.set_float("BlendTimeSeconds", config.blend_seconds);
    section.set_hotkey("HotkeySave", config.hotkey_save);
    section.set_hotkey("HotkeyReload", config.hotkey_reload);
    section.set_hotkey("HotkeyToggleUI", config.hotkey_toggle_ui);
}

pub fn read_config(section: &IniSection) -> GlobalConfig {
    let defaults = GlobalConfig::default();
    GlobalConfig {
        auto_apply: section.get_bool("AutoApply", defaults.auto_apply),
        blend_seconds: section
            .get_float("BlendTimeSeconds", defaults.blend_seconds)
            .max(0.0),
        hotkey_save: section.get_hotkey("HotkeySave", defaults.hotkey_save),
        hotkey_reload: section.get_hotkey("HotkeyReload", defaults.hotkey_reload),
        hotkey_toggle_ui: section.get_hotkey("HotkeyToggleUI", defaults.hotkey_toggle_ui),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_key_format() {
        assert_eq!(preset_key(Weather::Clear, TimeBucket::new(12, 0)), "CLEAR_12:00");
        assert_eq!(preset_key(Weather::SnowLight, TimeBucket::new(5, 0)), "SNOWLIGHT_05:00");
    }

    #[test]
    fn test_preset_key_index_clamped() {
        let midnight = TimeBucket::new(0, 0);
        assert_eq!(preset_key(Weather::from_index(99), midnight), "NEUTRAL_00:00");
        assert_eq!(preset_key(Weather::from_index(-3), midnight), "CLEAR_00:00");
    }

    #[test]
    fn test_parse_preset_key_both_forms() {
        let expected = Some((Weather::ExtraSunny, TimeBucket::new(21, 0)));
        assert_eq!(parse_preset_key("EXTRASUNNY_21:00"), expected);
        assert_eq!(parse_preset_key("EXTRASUNNY:21:00"), expected);
        assert_eq!(parse_preset_key("Global"), None);
        assert_eq!(parse_preset_key("SUNNY_12:00"), None);
        assert_eq!(parse_preset_key("CLEAR_25:00"), None);
    }

    #[test]
    fn test_preset_field_keys() {
        let mut section = IniSection::default();
        write_preset(&mut section, &CloudPreset::default());
        assert_eq!(section.len(), 2 * 22 + 12 + 3);
        assert_eq!(section.get("BottomScale"), Some("1"));
        assert_eq!(section.get("TopTop"), Some("1000"));
        assert_eq!(section.get("cloudThreshold"), Some("0.5"));
        assert_eq!(section.get("MoonColorG"), Some("1"));
    }

    #[test]
    fn test_read_preset_partial_section() {
        let mut section = IniSection::default();
        section.set("TopCover", "0.3");
        section.set("MoonColorB", "0.8");
        let preset = read_preset(&section);
        assert_eq!(preset.top_layer.cover, 0.3);
        assert_eq!(preset.global.moon_color, [1.0, 1.0, 0.8]);
        assert_eq!(preset.bottom_layer, LayerParams::default());
    }

    #[test]
    fn test_config_roundtrip_through_section() {
        let config = GlobalConfig {
            auto_apply: false,
            blend_seconds: 2.5,
            hotkey_save: 0x70,
            ..Default::default()
        };
        let mut section = IniSection::default();
        write_config(&mut section, &config);
        assert_eq!(read_config(&section), config);
    }

    #[test]
    fn test_config_rejects_unusable_blend_time() {
        let mut section = IniSection::default();
        section.set("BlendTimeSeconds", "nan");
        assert_eq!(read_config(&section).blend_seconds, GlobalConfig::default().blend_seconds);
        section.set("BlendTimeSeconds", "-3");
        assert_eq!(read_config(&section).blend_seconds, 0.0);
    }
}
