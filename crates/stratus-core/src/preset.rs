use glam::Vec3;

use crate::constants::{GLOBAL_FIELD_COUNT, LAYER_FIELD_COUNT};
use crate::math::Lerp;

/// Parameters of one volumetric cloud layer.
///
/// Field order is part of the contract: it is the positional order used by
/// imported data tables and the order of [`LayerParams::FIELD_NAMES`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LayerParams {
    /// Base noise scale.
    pub scale: f32,
    /// Detail noise scale.
    pub detail_scale: f32,
    /// Horizontal stretch of the base shape.
    pub stretch: f32,
    pub base_curl: f32,
    pub detail_curl: f32,
    pub base_curl_scale: f32,
    pub detail_curl_scale: f32,
    pub smoothness: f32,
    pub softness: f32,
    /// Layer floor altitude in meters.
    pub bottom: f32,
    /// Layer ceiling altitude in meters.
    pub top: f32,
    /// Coverage (0.0 = clear sky).
    pub cover: f32,
    pub extinction: f32,
    pub ambient_amount: f32,
    pub absorption: f32,
    pub luminance: f32,
    pub sun_light_power: f32,
    pub moon_light_power: f32,
    pub sky_light_power: f32,
    /// Vertical density profile: bottom, middle and top of the layer.
    pub bottom_density: f32,
    pub middle_density: f32,
    pub top_density: f32,
}

impl Default for LayerParams {
    fn default() -> Self {
        Self {
            scale: 1.0,
            detail_scale: 1.0,
            stretch: 1.0,
            base_curl: 1.0,
            detail_curl: 1.0,
            base_curl_scale: 1.0,
            detail_curl_scale: 1.0,
            smoothness: 1.0,
            softness: 1.0,
            bottom: 100.0,
            top: 1000.0,
            cover: 1.0,
            extinction: 1.0,
            ambient_amount: 1.0,
            absorption: 1.0,
            luminance: 1.0,
            sun_light_power: 1.0,
            moon_light_power: 1.0,
            sky_light_power: 1.0,
            bottom_density: 1.0,
            middle_density: 1.0,
            top_density: 1.0,
        }
    }
}

impl LayerParams {
    /// Field names in declaration order, as used in uniform and file keys.
    pub const FIELD_NAMES: [&'static str; LAYER_FIELD_COUNT] = [
        "Scale",
        "DetailScale",
        "Stretch",
        "BaseCurl",
        "DetailCurl",
        "BaseCurlScale",
        "DetailCurlScale",
        "Smoothness",
        "Softness",
        "Bottom",
        "Top",
        "Cover",
        "Extinction",
        "AmbientAmount",
        "Absorption",
        "Luminance",
        "SunLightPower",
        "MoonLightPower",
        "SkyLightPower",
        "BottomDensity",
        "MiddleDensity",
        "TopDensity",
    ];

    /// Build a layer from values in positional field order.
    pub fn from_array(values: [f32; LAYER_FIELD_COUNT]) -> Self {
        bytemuck::cast(values)
    }

    pub fn as_array(&self) -> &[f32; LAYER_FIELD_COUNT] {
        bytemuck::cast_ref(self)
    }

    pub fn as_array_mut(&mut self) -> &mut [f32; LAYER_FIELD_COUNT] {
        bytemuck::cast_mut(self)
    }

    /// Iterate `(field name, value)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        Self::FIELD_NAMES
            .iter()
            .copied()
            .zip(self.as_array().iter().copied())
    }
}

impl Lerp for LayerParams {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self::from_array(self.as_array().lerp(other.as_array(), t))
    }
}

/// Scene-wide cloud appearance parameters.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalParams {
    pub threshold: f32,
    pub jitter: f32,
    pub denoise: f32,
    pub depth_edge_far: f32,
    pub depth_edge_threshold: f32,
    pub forward_scatter: f32,
    pub light_step_factor: f32,
    pub contrast: f32,
    pub luminance_multiplier: f32,
    /// Extra moonlight contribution (0.0 = none).
    pub moonlight_boost: f32,
    /// Vertical fade toward the horizon (0.0 = disabled).
    pub y_fade: f32,
    pub height_offset: f32,
    /// Linear RGB moon tint.
    pub moon_color: [f32; 3],
}

impl Default for GlobalParams {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            jitter: 0.1,
            denoise: 0.1,
            depth_edge_far: 1.0,
            depth_edge_threshold: 0.1,
            forward_scatter: 0.6,
            light_step_factor: 1.0,
            contrast: 1.0,
            luminance_multiplier: 1.0,
            moonlight_boost: 0.0,
            y_fade: 0.0,
            height_offset: 1.0,
            moon_color: [1.0, 1.0, 1.0],
        }
    }
}

impl GlobalParams {
    /// Uniform and file names of the scalar fields, in declaration order.
    pub const SCALAR_NAMES: [&'static str; GLOBAL_FIELD_COUNT - 3] = [
        "cloudThreshold",
        "cloudJitter",
        "cloudDenoise",
        "cloudDepthEdgeFar",
        "cloudDepthEdgeThreshold",
        "cloudForwardScatter",
        "cloudLightStepFactor",
        "cloudContrast",
        "cloudLuminanceMultiplier",
        "MoonlightBoost",
        "cloudYFade",
        "cloudHeightOffset",
    ];

    /// Uniform name of the moon color vector.
    pub const MOON_COLOR_NAME: &'static str = "MoonColor";

    pub fn as_array(&self) -> &[f32; GLOBAL_FIELD_COUNT] {
        bytemuck::cast_ref(self)
    }

    pub fn as_array_mut(&mut self) -> &mut [f32; GLOBAL_FIELD_COUNT] {
        bytemuck::cast_mut(self)
    }

    /// Iterate `(name, value)` for every scalar field (moon color excluded).
    pub fn scalars(&self) -> impl Iterator<Item = (&'static str, f32)> + '_ {
        Self::SCALAR_NAMES
            .iter()
            .copied()
            .zip(self.as_array().iter().copied())
    }

    pub fn moon_color_vec(&self) -> Vec3 {
        Vec3::from_array(self.moon_color)
    }
}

impl Lerp for GlobalParams {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        bytemuck::cast(self.as_array().lerp(other.as_array(), t))
    }
}

/// Full cloud parameter set for one (weather, time bucket) combination.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CloudPreset {
    pub bottom_layer: LayerParams,
    pub top_layer: LayerParams,
    pub global: GlobalParams,
}

impl CloudPreset {
    /// Total number of float fields in a preset.
    pub const FLOAT_COUNT: usize = 2 * LAYER_FIELD_COUNT + GLOBAL_FIELD_COUNT;

    /// Build a preset from imported layer data, keeping default global parameters.
    pub fn from_layers(bottom_layer: LayerParams, top_layer: LayerParams) -> Self {
        Self {
            bottom_layer,
            top_layer,
            global: GlobalParams::default(),
        }
    }
}

impl Lerp for CloudPreset {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            bottom_layer: self.bottom_layer.lerp(&other.bottom_layer, t),
            top_layer: self.top_layer.lerp(&other.top_layer, t),
            global: self.global.lerp(&other.global, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_params_size() {
        assert_eq!(std::mem::size_of::<LayerParams>(), LAYER_FIELD_COUNT * 4);
    }

    #[test]
    fn test_global_params_size() {
        assert_eq!(std::mem::size_of::<GlobalParams>(), GLOBAL_FIELD_COUNT * 4);
    }

    #[test]
    fn test_cloud_preset_size() {
        assert_eq!(std::mem::size_of::<CloudPreset>(), CloudPreset::FLOAT_COUNT * 4);
    }

    #[test]
    fn test_record_views_cover_preset() {
        let preset = CloudPreset::default();
        let total = preset.bottom_layer.as_array().len()
            + preset.top_layer.as_array().len()
            + preset.global.as_array().len();
        assert_eq!(total, CloudPreset::FLOAT_COUNT);
        assert_eq!(&preset.global.as_array()[12..], &preset.global.moon_color[..]);
    }

    #[test]
    fn test_layer_positional_order() {
        let mut values = [0.0f32; LAYER_FIELD_COUNT];
        for (i, v) in values.iter_mut().enumerate() {
            *v = i as f32;
        }
        let layer = LayerParams::from_array(values);
        assert_eq!(layer.scale, 0.0);
        assert_eq!(layer.bottom, 9.0);
        assert_eq!(layer.top, 10.0);
        assert_eq!(layer.cover, 11.0);
        assert_eq!(layer.top_density, 21.0);
    }

    #[test]
    fn test_layer_field_names_align_with_values() {
        let layer = LayerParams {
            cover: 0.42,
            ..Default::default()
        };
        let cover = layer
            .fields()
            .find(|(name, _)| *name == "Cover")
            .expect("Cover field missing");
        assert_eq!(cover.1, 0.42);
    }

    #[test]
    fn test_global_scalar_names_align_with_values() {
        let global = GlobalParams {
            height_offset: 3.5,
            ..Default::default()
        };
        let (name, value) = global.scalars().last().expect("no scalars");
        assert_eq!(name, "cloudHeightOffset");
        assert_eq!(value, 3.5);
        assert_eq!(global.scalars().count(), 12);
    }

    #[test]
    fn test_default_layer_altitudes() {
        let layer = LayerParams::default();
        assert_eq!(layer.bottom, 100.0);
        assert_eq!(layer.top, 1000.0);
        assert!(layer.top > layer.bottom);
    }

    #[test]
    fn test_preset_lerp_fieldwise() {
        let a = CloudPreset::default();
        let mut b = CloudPreset::default();
        b.bottom_layer.cover = 0.0;
        b.top_layer.bottom = 300.0;
        b.global.moon_color = [0.0, 0.5, 1.0];

        let mid = a.lerp(&b, 0.5);
        assert!((mid.bottom_layer.cover - 0.5).abs() < 1e-6);
        assert!((mid.top_layer.bottom - 200.0).abs() < 1e-4);
        assert_eq!(mid.global.moon_color, [0.5, 0.75, 1.0]);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 0.0), a);
    }
}
