pub mod config;
pub mod constants;
pub mod error;
pub mod live;
pub mod math;
pub mod preset;
pub mod types;
pub mod uniform;

pub use config::GlobalConfig;
pub use error::CoreError;
pub use live::{EditContext, LiveState, LiveStateProvider, PresetTarget, WeatherState};
pub use math::Lerp;
pub use preset::{CloudPreset, GlobalParams, LayerParams};
pub use types::{Region, RegionalWeather, TimeBucket, Weather};
pub use uniform::{UniformSink, UniformStage, UniformValue};
