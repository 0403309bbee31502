//! Channel schemas and the neutral fallback cycle.

use crate::color::ColorChannel;
use crate::cycle::WeatherCycle;
use crate::keyframe::KeyframeVariable;

/// Scalar channels of the sky model.
pub const SKY_SCALARS: [&str; 10] = [
    "azimuth_transition_position",
    "zenith_transition_east_blend",
    "zenith_transition_west_blend",
    "zenith_transition_position",
    "zenith_blend_start",
    "sun_mie_phase",
    "sun_mie_scatter",
    "sun_hdr",
    "sun_mie_intensity",
    "sky_hdr",
];

/// RGBA channels of the sky model.
pub const SKY_COLORS: [&str; 7] = [
    "azimuth_east_color",
    "azimuth_transition_color",
    "azimuth_west_color",
    "zenith_transition_color",
    "zenith_color",
    "sun_color",
    "moon_color",
];

/// The fixed key set shared by every cycle in a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSchema {
    scalars: Vec<String>,
    colors: Vec<String>,
}

impl ChannelSchema {
    pub fn new<S, C>(scalars: S, colors: C) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            scalars: scalars.into_iter().map(Into::into).collect(),
            colors: colors.into_iter().map(Into::into).collect(),
        }
    }

    /// The standard sky schema.
    pub fn sky() -> Self {
        Self::new(SKY_SCALARS, SKY_COLORS)
    }

    pub fn scalars(&self) -> impl Iterator<Item = &str> {
        self.scalars.iter().map(String::as_str)
    }

    pub fn colors(&self) -> impl Iterator<Item = &str> {
        self.colors.iter().map(String::as_str)
    }

    pub fn has_scalar(&self, name: &str) -> bool {
        self.scalars.iter().any(|s| s == name)
    }

    pub fn has_color(&self, name: &str) -> bool {
        self.colors.iter().any(|c| c == name)
    }

    /// A cycle with an empty curve on every channel; evaluates to the
    /// default curve value everywhere. Substituted for missing table entries.
    pub fn neutral_cycle(&self) -> WeatherCycle {
        let mut cycle = WeatherCycle::new();
        for name in &self.scalars {
            cycle.insert_scalar(name.clone(), KeyframeVariable::empty());
        }
        for name in &self.colors {
            cycle.insert_color(name.clone(), ColorChannel::empty());
        }
        cycle
    }
}

impl Default for ChannelSchema {
    fn default() -> Self {
        Self::sky()
    }
}
