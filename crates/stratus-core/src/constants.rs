//! Single source of truth for shared constants.
//! Values mirror the uniforms and data tables consumed by the cloud and sky shaders.

/// Length of the cyclic time-of-day domain in hours.
pub const DAY_HOURS: f32 = 24.0;

/// Value returned by a keyframe curve that has no frames.
pub const DEFAULT_CURVE_VALUE: f32 = 1.0;

/// Number of weather types known to the host game.
pub const NUM_WEATHER_TYPES: usize = 15;

/// Number of timecycle regions known to the host game.
pub const NUM_REGIONS: usize = 2;

/// Hours at which the game's timecycle tables carry a sample.
/// Also the hours of the preset time buckets.
pub const TIME_FRAME_HOURS: [u8; 13] = [0, 5, 6, 7, 9, 12, 16, 17, 18, 19, 20, 21, 22];

/// Number of float fields in one cloud layer record.
pub const LAYER_FIELD_COUNT: usize = 22;

/// Number of float fields in the global cloud record (moon color counts as three).
pub const GLOBAL_FIELD_COUNT: usize = 15;

/// Default cross-fade duration between presets, in seconds.
pub const DEFAULT_BLEND_SECONDS: f32 = 1.0;

/// Default "save presets" hotkey (VK_F10).
pub const DEFAULT_HOTKEY_SAVE: u32 = 0x79;

/// Default "reload presets" hotkey (VK_F11).
pub const DEFAULT_HOTKEY_RELOAD: u32 = 0x7A;

/// Default "toggle editor" hotkey (VK_F9).
pub const DEFAULT_HOTKEY_TOGGLE_UI: u32 = 0x78;
