//! Named shader inputs and the sink they are written to.
//!
//! The core never talks to a GPU. It produces [`UniformValue`]s keyed by name
//! and hands them to whatever [`UniformSink`] the host provides.

use std::collections::HashMap;

use glam::{Mat4, Vec2, Vec3, Vec4};

/// A single uniform value of one of the shapes the shaders accept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Float2(Vec2),
    Float3(Vec3),
    Float4(Vec4),
    Float4x4(Mat4),
}

impl UniformValue {
    /// Number of scalar components carried by this value.
    pub fn component_count(&self) -> usize {
        match self {
            UniformValue::Bool(_) | UniformValue::Int(_) | UniformValue::Float(_) => 1,
            UniformValue::Float2(_) => 2,
            UniformValue::Float3(_) => 3,
            UniformValue::Float4(_) => 4,
            UniformValue::Float4x4(_) => 16,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            UniformValue::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        UniformValue::Float(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        UniformValue::Float3(v)
    }
}

impl From<Vec4> for UniformValue {
    fn from(v: Vec4) -> Self {
        UniformValue::Float4(v)
    }
}

/// Destination for named uniform writes.
///
/// Implementations must tolerate being called every tick with unchanged values.
pub trait UniformSink {
    fn set_uniform(&mut self, name: &str, value: UniformValue);
}

/// Recording sink: keeps the last value written under each name.
impl UniformSink for HashMap<String, UniformValue> {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.insert(name.to_string(), value);
    }
}

/// Per-tick staging buffer.
///
/// Values are collected during the tick and forwarded to a sink in one
/// [`UniformStage::commit`]. Matrices are split into four row vectors since
/// the effect runtime only binds vector uniforms.
#[derive(Debug, Default)]
pub struct UniformStage {
    values: Vec<(String, UniformValue)>,
}

impl UniformStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&mut self, name: impl Into<String>, value: impl Into<UniformValue>) {
        self.values.push((name.into(), value.into()));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Write every staged value to `sink` in staging order and clear the stage.
    pub fn commit(&mut self, sink: &mut dyn UniformSink) {
        for (name, value) in self.values.drain(..) {
            match value {
                UniformValue::Float4x4(m) => {
                    for i in 0..4 {
                        sink.set_uniform(
                            &format!("{name}__r{}", i + 1),
                            UniformValue::Float4(m.row(i)),
                        );
                    }
                }
                other => sink.set_uniform(&name, other),
            }
        }
    }
}
