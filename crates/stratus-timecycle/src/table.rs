use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use stratus_core::live::WeatherState;
use stratus_core::types::RegionalWeather;
use stratus_core::uniform::{UniformSink, UniformStage};

use crate::cycle::{Frame, WeatherCycle};
use crate::defaults::ChannelSchema;
use crate::validator::{validate_key_set, ValidationError};

/// Registry of weather cycles keyed by (weather, region).
///
/// Every stored cycle carries exactly the table's schema key set, so any two
/// entries can be transitioned between. Unknown keys resolve to a neutral
/// cycle and are logged once per key.
#[derive(Debug)]
pub struct TimeCycleTable {
    schema: ChannelSchema,
    cycles: HashMap<RegionalWeather, WeatherCycle>,
    neutral: WeatherCycle,
    reported_misses: RefCell<HashSet<RegionalWeather>>,
}

impl TimeCycleTable {
    pub fn new(schema: ChannelSchema) -> Self {
        let neutral = schema.neutral_cycle();
        Self {
            schema,
            cycles: HashMap::new(),
            neutral,
            reported_misses: RefCell::new(HashSet::new()),
        }
    }

    pub fn schema(&self) -> &ChannelSchema {
        &self.schema
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    pub fn contains(&self, key: RegionalWeather) -> bool {
        self.cycles.contains_key(&key)
    }

    /// Add or replace one cycle after checking its key set.
    pub fn insert(
        &mut self,
        key: RegionalWeather,
        cycle: WeatherCycle,
    ) -> Result<(), Vec<ValidationError>> {
        validate_key_set(&key.to_string(), &cycle, &self.schema)?;
        self.cycles.insert(key, cycle);
        self.reported_misses.borrow_mut().remove(&key);
        Ok(())
    }

    /// Replace every entry at once. Nothing changes unless all cycles validate.
    pub fn reload(
        &mut self,
        cycles: HashMap<RegionalWeather, WeatherCycle>,
    ) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        for (key, cycle) in &cycles {
            if let Err(mut e) = validate_key_set(&key.to_string(), cycle, &self.schema) {
                errors.append(&mut e);
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        self.cycles = cycles;
        self.reported_misses.borrow_mut().clear();
        log::info!("Timecycle table reloaded with {} cycles", self.cycles.len());
        Ok(())
    }

    /// Cycle for `key`, or the neutral cycle when the key is unknown.
    pub fn cycle(&self, key: RegionalWeather) -> &WeatherCycle {
        match self.cycles.get(&key) {
            Some(cycle) => cycle,
            None => {
                if self.reported_misses.borrow_mut().insert(key) {
                    log::warn!("No timecycle entry for {key}, using neutral cycle");
                }
                &self.neutral
            }
        }
    }

    /// Evaluate the frame at hour `t`, blending from `from` toward `to` by
    /// `progress` when the keys differ.
    pub fn get_frame(
        &self,
        from: RegionalWeather,
        to: RegionalWeather,
        t: f32,
        progress: f32,
    ) -> Frame {
        let source = self.cycle(from);
        if from == to {
            return source.snapshot(t);
        }
        source.transition_snapshot(self.cycle(to), t, progress)
    }

    /// Frame for a host-reported weather transition.
    pub fn frame_for(&self, state: &WeatherState, t: f32) -> Frame {
        self.get_frame(state.from_key(), state.to_key(), t, state.progress)
    }

    /// Evaluate [`TimeCycleTable::frame_for`] and push every channel to
    /// `sink` as `<prefix>_<channel>`. Returns the pushed frame.
    pub fn push_frame(
        &self,
        state: &WeatherState,
        t: f32,
        prefix: &str,
        sink: &mut dyn UniformSink,
    ) -> Frame {
        let frame = self.frame_for(state, t);
        let mut stage = UniformStage::new();
        frame.stage(prefix, &mut stage);
        stage.commit(sink);
        frame
    }
}

impl Default for TimeCycleTable {
    fn default() -> Self {
        Self::new(ChannelSchema::sky())
    }
}
