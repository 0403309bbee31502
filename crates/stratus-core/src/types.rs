use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{NUM_REGIONS, NUM_WEATHER_TYPES, TIME_FRAME_HOURS};
use crate::error::CoreError;

/// Weather types in the host game's declared order. The discriminant is the
/// game's weather index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Weather {
    #[default]
    Clear = 0,
    ExtraSunny = 1,
    Clouds = 2,
    Overcast = 3,
    Rain = 4,
    Clearing = 5,
    Thunder = 6,
    Smog = 7,
    Foggy = 8,
    Xmas = 9,
    Snow = 10,
    SnowLight = 11,
    Blizzard = 12,
    Halloween = 13,
    Neutral = 14,
}

impl Weather {
    /// Every weather in declared order.
    pub const ALL: [Weather; NUM_WEATHER_TYPES] = [
        Weather::Clear,
        Weather::ExtraSunny,
        Weather::Clouds,
        Weather::Overcast,
        Weather::Rain,
        Weather::Clearing,
        Weather::Thunder,
        Weather::Smog,
        Weather::Foggy,
        Weather::Xmas,
        Weather::Snow,
        Weather::SnowLight,
        Weather::Blizzard,
        Weather::Halloween,
        Weather::Neutral,
    ];

    /// Look up a weather by raw index. Out-of-range indices clamp to the
    /// nearest valid weather instead of failing.
    pub fn from_index(index: i64) -> Weather {
        let clamped = index.clamp(0, NUM_WEATHER_TYPES as i64 - 1);
        Self::ALL[clamped as usize]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical upper-case name used in preset keys and data files.
    pub fn name(self) -> &'static str {
        match self {
            Weather::Clear => "CLEAR",
            Weather::ExtraSunny => "EXTRASUNNY",
            Weather::Clouds => "CLOUDS",
            Weather::Overcast => "OVERCAST",
            Weather::Rain => "RAIN",
            Weather::Clearing => "CLEARING",
            Weather::Thunder => "THUNDER",
            Weather::Smog => "SMOG",
            Weather::Foggy => "FOGGY",
            Weather::Xmas => "XMAS",
            Weather::Snow => "SNOW",
            Weather::SnowLight => "SNOWLIGHT",
            Weather::Blizzard => "BLIZZARD",
            Weather::Halloween => "HALLOWEEN",
            Weather::Neutral => "NEUTRAL",
        }
    }

    /// Tag prefixed to per-weather cloud layer uniforms (e.g. `ClearBottomScale`).
    ///
    /// The shaders have no dedicated XMAS or NEUTRAL layer set: XMAS shares
    /// the Snow uniforms and NEUTRAL shares the Clear uniforms.
    pub fn uniform_tag(self) -> &'static str {
        match self {
            Weather::Clear => "Clear",
            Weather::ExtraSunny => "ExtraSunny",
            Weather::Clouds => "Clouds",
            Weather::Overcast => "Overcast",
            Weather::Rain => "Rain",
            Weather::Clearing => "Clearing",
            Weather::Thunder => "Thunder",
            Weather::Smog => "Smog",
            Weather::Foggy => "Foggy",
            Weather::Xmas | Weather::Snow => "Snow",
            Weather::SnowLight => "SnowLight",
            Weather::Blizzard => "Blizzard",
            Weather::Halloween => "Halloween",
            Weather::Neutral => "Clear",
        }
    }

    /// Exact, case-insensitive name lookup.
    pub fn from_name(name: &str) -> Option<Weather> {
        Self::ALL
            .into_iter()
            .find(|w| w.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weather {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weather::from_name(s).ok_or_else(|| CoreError::UnknownWeather(s.to_string()))
    }
}

/// Timecycle region. The game keeps a separate cycle per region for every weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum Region {
    #[default]
    Global = 0,
    Urban = 1,
}

impl Region {
    pub const ALL: [Region; NUM_REGIONS] = [Region::Global, Region::Urban];

    /// Look up a region by raw index, clamping out-of-range values.
    pub fn from_index(index: i64) -> Region {
        let clamped = index.clamp(0, NUM_REGIONS as i64 - 1);
        Self::ALL[clamped as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            Region::Global => "GLOBAL",
            Region::Urban => "URBAN",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownRegion(s.to_string()))
    }
}

/// Composite key of the timecycle table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct RegionalWeather {
    pub weather: Weather,
    pub region: Region,
}

impl RegionalWeather {
    pub fn new(weather: Weather, region: Region) -> Self {
        Self { weather, region }
    }
}

impl fmt::Display for RegionalWeather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.weather, self.region)
    }
}

/// Coarse time-of-day slot used to key stored presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeBucket {
    pub hour: u8,
    pub minute: u8,
}

impl Default for TimeBucket {
    fn default() -> Self {
        Self::NOON
    }
}

impl TimeBucket {
    pub const NOON: TimeBucket = TimeBucket { hour: 12, minute: 0 };

    /// Every preset bucket in declared order. Spacing is denser around dawn and dusk.
    pub const ALL: [TimeBucket; 13] = {
        let mut out = [TimeBucket { hour: 0, minute: 0 }; 13];
        let mut i = 0;
        while i < TIME_FRAME_HOURS.len() {
            out[i] = TimeBucket {
                hour: TIME_FRAME_HOURS[i],
                minute: 0,
            };
            i += 1;
        }
        out
    };

    /// Create a bucket, clamping hour to 0..=23 and minute to 0..=59.
    pub fn new(hour: i32, minute: i32) -> Self {
        Self {
            hour: hour.clamp(0, 23) as u8,
            minute: minute.clamp(0, 59) as u8,
        }
    }

    pub fn minutes_of_day(self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    /// Snap a clock reading to the closest declared bucket.
    ///
    /// Distance is the absolute difference in minutes of day (no wrap at
    /// midnight). Ties resolve to the earliest bucket in declared order.
    pub fn nearest(hour: i32, minute: i32) -> TimeBucket {
        let target = TimeBucket::new(hour, minute).minutes_of_day() as i64;
        let mut best = Self::ALL[0];
        let mut best_distance = i64::MAX;
        for bucket in Self::ALL {
            let distance = (bucket.minutes_of_day() as i64 - target).abs();
            if distance < best_distance {
                best_distance = distance;
                best = bucket;
            }
        }
        best
    }

    /// Position of this bucket in [`TimeBucket::ALL`], if it is a declared bucket.
    pub fn declared_index(self) -> Option<usize> {
        Self::ALL.iter().position(|b| *b == self)
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for TimeBucket {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidTimeBucket(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        let hour: i32 = h.trim().parse().map_err(|_| invalid())?;
        let minute: i32 = m.trim().parse().map_err(|_| invalid())?;
        if !(0..24).contains(&hour) || !(0..60).contains(&minute) {
            return Err(invalid());
        }
        Ok(TimeBucket::new(hour, minute))
    }
}
