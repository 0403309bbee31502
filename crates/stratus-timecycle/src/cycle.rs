use std::collections::{BTreeMap, HashMap};

use glam::Vec4;
use stratus_core::uniform::UniformStage;

use crate::color::ColorChannel;
use crate::keyframe::KeyframeVariable;

/// Full-day behavior of every channel for one (weather, region) pair.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeatherCycle {
    scalars: HashMap<String, KeyframeVariable>,
    colors: HashMap<String, ColorChannel>,
}

/// Every channel of a cycle evaluated at one instant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub scalars: BTreeMap<String, f32>,
    pub colors: BTreeMap<String, Vec4>,
}

impl Frame {
    pub fn scalar(&self, name: &str) -> Option<f32> {
        self.scalars.get(name).copied()
    }

    pub fn color(&self, name: &str) -> Option<Vec4> {
        self.colors.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.scalars.len() + self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.colors.is_empty()
    }

    /// Stage every channel as `<prefix>_<channel>`.
    pub fn stage(&self, prefix: &str, stage: &mut UniformStage) {
        for (name, value) in &self.scalars {
            stage.stage(format!("{prefix}_{name}"), *value);
        }
        for (name, value) in &self.colors {
            stage.stage(format!("{prefix}_{name}"), *value);
        }
    }
}

impl WeatherCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_scalar(&mut self, name: impl Into<String>, variable: KeyframeVariable) {
        self.scalars.insert(name.into(), variable);
    }

    pub fn insert_color(&mut self, name: impl Into<String>, channel: ColorChannel) {
        self.colors.insert(name.into(), channel);
    }

    pub fn remove_scalar(&mut self, name: &str) -> Option<KeyframeVariable> {
        self.scalars.remove(name)
    }

    pub fn scalar(&self, name: &str) -> Option<&KeyframeVariable> {
        self.scalars.get(name)
    }

    pub fn color(&self, name: &str) -> Option<&ColorChannel> {
        self.colors.get(name)
    }

    pub fn scalar_names(&self) -> impl Iterator<Item = &str> {
        self.scalars.keys().map(String::as_str)
    }

    pub fn color_names(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(String::as_str)
    }

    /// Evaluate every channel at hour `t`.
    pub fn snapshot(&self, t: f32) -> Frame {
        Frame {
            scalars: self
                .scalars
                .iter()
                .map(|(name, var)| (name.clone(), var.evaluate(t)))
                .collect(),
            colors: self
                .colors
                .iter()
                .map(|(name, color)| (name.clone(), color.evaluate(t)))
                .collect(),
        }
    }

    /// Evaluate every channel as a pointwise blend toward `other`.
    ///
    /// Tables guarantee both cycles share one key set. A channel missing from
    /// `other` keeps this cycle's value rather than failing.
    pub fn transition_snapshot(&self, other: &WeatherCycle, t: f32, progress: f32) -> Frame {
        let scalars = self
            .scalars
            .iter()
            .map(|(name, var)| {
                let value = match other.scalars.get(name) {
                    Some(target) => var.evaluate_transition(target, t, progress),
                    None => var.evaluate(t),
                };
                (name.clone(), value)
            })
            .collect();
        let colors = self
            .colors
            .iter()
            .map(|(name, color)| {
                let value = match other.colors.get(name) {
                    Some(target) => color.evaluate_transition(target, t, progress),
                    None => color.evaluate(t),
                };
                (name.clone(), value)
            })
            .collect();
        Frame { scalars, colors }
    }
}
