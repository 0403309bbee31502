use crate::constants::DAY_HOURS;
use crate::types::{Region, RegionalWeather, TimeBucket, Weather};

/// World state sampled from the host once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LiveState {
    /// 0..=23
    pub hour: u8,
    /// 0..=59
    pub minute: u8,
    pub weather: Weather,
    pub region: Region,
    /// False when the host has no authoritative data (menus, loading screens).
    pub available: bool,
}

impl LiveState {
    pub fn new(hour: i32, minute: i32, weather: Weather, region: Region) -> Self {
        Self {
            hour: hour.clamp(0, 23) as u8,
            minute: minute.clamp(0, 59) as u8,
            weather,
            region,
            available: true,
        }
    }

    /// State reported when the host cannot be read.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Clock reading in the keyframe domain `[0, 24)`.
    pub fn hours(&self) -> f32 {
        self.hour as f32 + self.minute as f32 / 60.0
    }

    pub fn bucket(&self) -> TimeBucket {
        TimeBucket::nearest(self.hour as i32, self.minute as i32)
    }

    pub fn regional_weather(&self) -> RegionalWeather {
        RegionalWeather::new(self.weather, self.region)
    }
}

/// A (weather, time bucket) pair naming one stored preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PresetTarget {
    pub weather: Weather,
    pub bucket: TimeBucket,
}

impl PresetTarget {
    pub fn new(weather: Weather, bucket: TimeBucket) -> Self {
        Self { weather, bucket }
    }

    /// Target implied by a live clock reading.
    pub fn from_live(live: &LiveState) -> Self {
        Self::new(live.weather, live.bucket())
    }
}

/// The editor's manual selection. Starts at CLEAR / 12:00.
pub type EditContext = PresetTarget;

/// Weather transition in progress, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeatherState {
    pub from: Weather,
    pub to: Weather,
    pub region: Region,
    /// 0.0 = fully `from`, 1.0 = fully `to`.
    pub progress: f32,
}

impl WeatherState {
    pub fn steady(weather: Weather, region: Region) -> Self {
        Self {
            from: weather,
            to: weather,
            region,
            progress: 0.0,
        }
    }

    pub fn from_key(&self) -> RegionalWeather {
        RegionalWeather::new(self.from, self.region)
    }

    pub fn to_key(&self) -> RegionalWeather {
        RegionalWeather::new(self.to, self.region)
    }
}

/// Capability implemented once per supported host game.
pub trait LiveStateProvider {
    fn poll(&mut self) -> LiveState;

    /// Current weather transition. Hosts without transition data report a
    /// steady state built from [`LiveStateProvider::poll`].
    fn weather_state(&mut self) -> WeatherState {
        let live = self.poll();
        WeatherState::steady(live.weather, live.region)
    }
}

/// Convert a fraction of a day (0..1, wrapping) into `(hour, minute)`.
pub fn clock_from_day_fraction(fraction: f32) -> (u8, u8) {
    let hours = (fraction.rem_euclid(1.0) * DAY_HOURS).clamp(0.0, DAY_HOURS);
    let total_minutes = (hours * 60.0).floor() as u32 % (24 * 60);
    ((total_minutes / 60) as u8, (total_minutes % 60) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(LiveState);

    impl LiveStateProvider for Fixed {
        fn poll(&mut self) -> LiveState {
            self.0
        }
    }

    #[test]
    fn test_hours() {
        let live = LiveState::new(6, 30, Weather::Clear, Region::Global);
        assert!((live.hours() - 6.5).abs() < 1e-6);
    }

    #[test]
    fn test_new_clamps_clock() {
        let live = LiveState::new(30, -4, Weather::Rain, Region::Urban);
        assert_eq!((live.hour, live.minute), (23, 0));
        assert!(live.available);
    }

    #[test]
    fn test_unavailable_default() {
        assert!(!LiveState::unavailable().available);
    }

    #[test]
    fn test_target_from_live_snaps_bucket() {
        let live = LiveState::new(8, 10, Weather::Foggy, Region::Global);
        let target = PresetTarget::from_live(&live);
        assert_eq!(target.weather, Weather::Foggy);
        assert_eq!(target.bucket, TimeBucket::new(9, 0));
    }

    #[test]
    fn test_default_weather_state_is_steady() {
        let mut provider = Fixed(LiveState::new(12, 0, Weather::Smog, Region::Urban));
        let state = provider.weather_state();
        assert_eq!(state.from, Weather::Smog);
        assert_eq!(state.to, Weather::Smog);
        assert_eq!(state.region, Region::Urban);
        assert_eq!(state.progress, 0.0);
    }

    #[test]
    fn test_clock_from_day_fraction() {
        assert_eq!(clock_from_day_fraction(0.0), (0, 0));
        assert_eq!(clock_from_day_fraction(0.5), (12, 0));
        assert_eq!(clock_from_day_fraction(0.75), (18, 0));
        assert_eq!(clock_from_day_fraction(1.25), (6, 0));
    }
}
