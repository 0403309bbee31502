//! Uniform naming for cloud presets.
//!
//! Layer fields are weather-tagged (`<Tag>Bottom<Field>`, `<Tag>Top<Field>`),
//! so each weather owns its own layer uniforms. Global fields have one shared
//! bare name each.

use stratus_core::preset::{CloudPreset, GlobalParams, LayerParams};
use stratus_core::types::Weather;
use stratus_core::uniform::UniformStage;
use stratus_persist::format::{layer_field_key, BOTTOM_LAYER_PREFIX, TOP_LAYER_PREFIX};

/// Uniform name of one layer field, e.g. `ClearBottomScale`.
pub fn layer_uniform_name(weather: Weather, layer_prefix: &str, field: &str) -> String {
    format!("{}{}", weather.uniform_tag(), layer_field_key(layer_prefix, field))
}

fn stage_layer(stage: &mut UniformStage, weather: Weather, prefix: &str, layer: &LayerParams) {
    for (field, value) in layer.fields() {
        stage.stage(layer_uniform_name(weather, prefix, field), value);
    }
}

/// Stage both layer records under `weather`'s tag.
pub fn stage_layers(stage: &mut UniformStage, weather: Weather, preset: &CloudPreset) {
    stage_layer(stage, weather, BOTTOM_LAYER_PREFIX, &preset.bottom_layer);
    stage_layer(stage, weather, TOP_LAYER_PREFIX, &preset.top_layer);
}

/// Stage the shared global fields.
pub fn stage_globals(stage: &mut UniformStage, global: &GlobalParams) {
    for (name, value) in global.scalars() {
        stage.stage(name, value);
    }
    stage.stage(GlobalParams::MOON_COLOR_NAME, global.moon_color_vec());
}

/// Stage a full preset: tagged layers plus globals.
pub fn stage_preset(stage: &mut UniformStage, weather: Weather, preset: &CloudPreset) {
    stage_layers(stage, weather, preset);
    stage_globals(stage, &preset.global);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::collections::HashMap;
    use stratus_core::uniform::UniformValue;

    fn commit(stage: &mut UniformStage) -> HashMap<String, UniformValue> {
        let mut sink = HashMap::new();
        stage.commit(&mut sink);
        sink
    }

    #[test]
    fn test_layer_names() {
        assert_eq!(layer_uniform_name(Weather::Clear, "Bottom", "Scale"), "ClearBottomScale");
        assert_eq!(layer_uniform_name(Weather::Xmas, "Top", "Cover"), "SnowTopCover");
        assert_eq!(layer_uniform_name(Weather::Neutral, "Top", "Top"), "ClearTopTop");
    }

    #[test]
    fn test_stage_preset_writes_every_field() {
        let mut preset = CloudPreset::default();
        preset.top_layer.cover = 0.25;
        preset.global.moon_color = [0.5, 0.6, 0.7];

        let mut stage = UniformStage::new();
        stage_preset(&mut stage, Weather::Rain, &preset);
        let sink = commit(&mut stage);

        assert_eq!(sink.len(), 2 * 22 + 12 + 1);
        assert_eq!(sink["RainTopCover"], UniformValue::Float(0.25));
        assert_eq!(sink["RainBottomBottom"], UniformValue::Float(100.0));
        assert_eq!(sink["cloudForwardScatter"], UniformValue::Float(0.6));
        assert_eq!(sink["MoonColor"], UniformValue::Float3(Vec3::new(0.5, 0.6, 0.7)));
    }

    #[test]
    fn test_stage_layers_skips_globals() {
        let mut stage = UniformStage::new();
        stage_layers(&mut stage, Weather::Foggy, &CloudPreset::default());
        let sink = commit(&mut stage);
        assert_eq!(sink.len(), 44);
        assert!(sink.keys().all(|k| k.starts_with("Foggy")));
    }
}
