use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use stratus_core::types::{Region, RegionalWeather, Weather};
use thiserror::Error;

use crate::color::ColorChannel;
use crate::cycle::WeatherCycle;
use crate::defaults::ChannelSchema;
use crate::keyframe::KeyframeVariable;
use crate::table::TimeCycleTable;
use crate::validator::ValidationError;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to parse cycle definitions RON: {0}")]
    CycleParseError(String),
    #[error("Cycle definitions failed validation ({} errors)", .0.len())]
    Invalid(Vec<ValidationError>),
}

/// One channel curve as written in a definition file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CurveDef {
    /// One sample per standard time frame (see [`KeyframeVariable::from_time_frames`]).
    TimeFrames(Vec<f32>),
    /// Explicit `(hour, value)` keyframes.
    Keys(Vec<(f32, f32)>),
}

impl CurveDef {
    pub fn build(&self) -> Result<KeyframeVariable, ValidationError> {
        match self {
            CurveDef::TimeFrames(samples) => Ok(KeyframeVariable::from_time_frames(samples)),
            CurveDef::Keys(keys) => {
                let (frames, values) = keys.iter().copied().unzip();
                KeyframeVariable::new(frames, values)
            }
        }
    }
}

/// Definition of one (weather, region) cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleDef {
    pub weather: Weather,
    #[serde(default)]
    pub region: Region,
    #[serde(default)]
    pub scalars: HashMap<String, CurveDef>,
    #[serde(default)]
    pub colors: HashMap<String, (CurveDef, CurveDef, CurveDef, CurveDef)>,
}

impl CycleDef {
    pub fn key(&self) -> RegionalWeather {
        RegionalWeather::new(self.weather, self.region)
    }

    /// Build a cycle carrying exactly the schema's channels. Channels the
    /// definition leaves out get an empty curve; extra channels are dropped.
    pub fn build(&self, schema: &ChannelSchema) -> Result<WeatherCycle, Vec<ValidationError>> {
        let cycle_name = self.key().to_string();
        let mut errors = Vec::new();
        let invalid = |channel: &str, e: ValidationError| ValidationError::InvalidChannel {
            cycle: cycle_name.clone(),
            channel: channel.to_string(),
            reason: e.to_string(),
        };

        for name in self.scalars.keys().filter(|n| !schema.has_scalar(n)) {
            log::warn!("Cycle {cycle_name}: ignoring unknown scalar channel '{name}'");
        }
        for name in self.colors.keys().filter(|n| !schema.has_color(n)) {
            log::warn!("Cycle {cycle_name}: ignoring unknown color channel '{name}'");
        }

        let mut cycle = WeatherCycle::new();
        for name in schema.scalars() {
            let variable = match self.scalars.get(name) {
                Some(def) => def.build().unwrap_or_else(|e| {
                    errors.push(invalid(name, e));
                    KeyframeVariable::empty()
                }),
                None => KeyframeVariable::empty(),
            };
            cycle.insert_scalar(name, variable);
        }
        for name in schema.colors() {
            let channel = match self.colors.get(name) {
                Some((r, g, b, a)) => {
                    let mut build = |def: &CurveDef| {
                        def.build().unwrap_or_else(|e| {
                            errors.push(invalid(name, e));
                            KeyframeVariable::empty()
                        })
                    };
                    ColorChannel::new(build(r), build(g), build(b), build(a))
                }
                None => ColorChannel::empty(),
            };
            cycle.insert_color(name, channel);
        }

        if errors.is_empty() {
            Ok(cycle)
        } else {
            Err(errors)
        }
    }
}

/// Parse a RON list of cycle definitions.
pub fn load_cycle_defs_from_str(ron_str: &str) -> Result<Vec<CycleDef>, LoadError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| LoadError::CycleParseError(e.to_string()))
}

/// Parse and concatenate several definition sources. Later sources override
/// earlier definitions of the same (weather, region).
pub fn load_all_cycle_defs(sources: &[&str]) -> Result<Vec<CycleDef>, LoadError> {
    let mut all_defs = Vec::new();
    for source in sources {
        all_defs.extend(load_cycle_defs_from_str(source)?);
    }
    Ok(all_defs)
}

/// Build a cycle for every (weather, region) pair. Pairs without a
/// definition get the schema's neutral cycle.
pub fn build_cycles(
    schema: &ChannelSchema,
    defs: &[CycleDef],
) -> Result<HashMap<RegionalWeather, WeatherCycle>, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut cycles = HashMap::new();

    for def in defs {
        match def.build(schema) {
            Ok(cycle) => {
                if cycles.insert(def.key(), cycle).is_some() {
                    log::warn!("Cycle {} defined more than once, last definition wins", def.key());
                } else {
                    log::info!("Loaded cycle {}", def.key());
                }
            }
            Err(mut e) => errors.append(&mut e),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    for weather in Weather::ALL {
        for region in Region::ALL {
            cycles
                .entry(RegionalWeather::new(weather, region))
                .or_insert_with(|| schema.neutral_cycle());
        }
    }
    Ok(cycles)
}

/// Build a complete table from parsed definitions.
pub fn build_table(schema: ChannelSchema, defs: &[CycleDef]) -> Result<TimeCycleTable, LoadError> {
    let cycles = build_cycles(&schema, defs).map_err(LoadError::Invalid)?;
    let mut table = TimeCycleTable::new(schema);
    table.reload(cycles).map_err(LoadError::Invalid)?;
    Ok(table)
}

/// Parse RON sources and build a table in one step.
pub fn load_table(schema: ChannelSchema, sources: &[&str]) -> Result<TimeCycleTable, LoadError> {
    let defs = load_all_cycle_defs(sources)?;
    build_table(schema, &defs)
}

/// Parse RON sources and replace every entry of an existing table.
/// The table is left untouched on any error.
pub fn reload_table(table: &mut TimeCycleTable, sources: &[&str]) -> Result<(), LoadError> {
    let defs = load_all_cycle_defs(sources)?;
    let cycles = build_cycles(table.schema(), &defs).map_err(LoadError::Invalid)?;
    table.reload(cycles).map_err(LoadError::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use stratus_core::constants::{DEFAULT_CURVE_VALUE, NUM_REGIONS, NUM_WEATHER_TYPES};

    const CLEAR_DEF: &str = r#"[
        (
            weather: CLEAR,
            scalars: {
                "sun_hdr": Keys([(0.0, 0.0), (12.0, 6.0)]),
                "sky_hdr": TimeFrames([1.0, 1.0, 2.0, 2.0, 3.0, 4.0, 3.0, 3.0, 2.0, 2.0, 1.0, 1.0, 1.0]),
            },
            colors: {
                "zenith_color": (Keys([(0.0, 0.1)]), Keys([(0.0, 0.2)]), Keys([(0.0, 0.3)]), Keys([(0.0, 1.0)])),
            },
        ),
        (
            weather: RAIN,
            region: URBAN,
            scalars: {
                "sun_hdr": Keys([(0.0, 1.0)]),
                "not_a_channel": Keys([(0.0, 9.0)]),
            },
        ),
    ]"#;

    #[test]
    fn test_parse_definitions() {
        let defs = load_cycle_defs_from_str(CLEAR_DEF).expect("should parse");
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].key(), RegionalWeather::new(Weather::Clear, Region::Global));
        assert_eq!(defs[1].key(), RegionalWeather::new(Weather::Rain, Region::Urban));
    }

    #[test]
    fn test_malformed_ron_rejected() {
        assert!(matches!(
            load_cycle_defs_from_str("[this is not valid RON {"),
            Err(LoadError::CycleParseError(_))
        ));
    }

    #[test]
    fn test_table_covers_every_pair() {
        let table = load_table(ChannelSchema::sky(), &[CLEAR_DEF]).expect("should build");
        assert_eq!(table.len(), NUM_WEATHER_TYPES * NUM_REGIONS);
    }

    #[test]
    fn test_defined_channels_evaluate() {
        let table = load_table(ChannelSchema::sky(), &[CLEAR_DEF]).expect("should build");
        let clear = RegionalWeather::new(Weather::Clear, Region::Global);
        let frame = table.get_frame(clear, clear, 6.0, 0.0);
        assert_eq!(frame.scalar("sun_hdr"), Some(3.0));
        // 06:00 is the third standard time frame
        assert_eq!(frame.scalar("sky_hdr"), Some(2.0));
        assert_eq!(frame.color("zenith_color"), Some(Vec4::new(0.1, 0.2, 0.3, 1.0)));
        // undefined channel of a defined cycle
        assert_eq!(frame.scalar("sun_mie_phase"), Some(DEFAULT_CURVE_VALUE));
    }

    #[test]
    fn test_extra_channel_ignored() {
        let table = load_table(ChannelSchema::sky(), &[CLEAR_DEF]).expect("should build");
        let rain = table.cycle(RegionalWeather::new(Weather::Rain, Region::Urban));
        assert!(rain.scalar("not_a_channel").is_none());
        assert_eq!(rain.scalar_names().count(), 10);
    }

    #[test]
    fn test_invalid_curve_reported() {
        let src = r#"[(weather: SNOW, scalars: { "sun_hdr": Keys([(12.0, 1.0), (6.0, 2.0)]) })]"#;
        let err = load_table(ChannelSchema::sky(), &[src]).unwrap_err();
        match err {
            LoadError::Invalid(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(matches!(
                    &errors[0],
                    ValidationError::InvalidChannel { channel, .. } if channel == "sun_hdr"
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_reload_keeps_table_on_error() {
        let mut table = load_table(ChannelSchema::sky(), &[CLEAR_DEF]).expect("should build");
        let clear = RegionalWeather::new(Weather::Clear, Region::Global);
        assert!(reload_table(&mut table, &["[oops"]).is_err());
        assert_eq!(table.get_frame(clear, clear, 12.0, 0.0).scalar("sun_hdr"), Some(6.0));

        let replacement = r#"[(weather: CLEAR, scalars: { "sun_hdr": Keys([(0.0, 0.5)]) })]"#;
        reload_table(&mut table, &[replacement]).expect("should reload");
        assert_eq!(table.get_frame(clear, clear, 12.0, 0.0).scalar("sun_hdr"), Some(0.5));
    }

    #[test]
    fn test_later_source_overrides() {
        let override_src = r#"[(weather: CLEAR, scalars: { "sun_hdr": Keys([(0.0, 7.0)]) })]"#;
        let table =
            load_table(ChannelSchema::sky(), &[CLEAR_DEF, override_src]).expect("should build");
        let clear = RegionalWeather::new(Weather::Clear, Region::Global);
        assert_eq!(table.get_frame(clear, clear, 3.0, 0.0).scalar("sun_hdr"), Some(7.0));
    }
}
