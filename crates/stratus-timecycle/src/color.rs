use glam::Vec4;

use crate::keyframe::KeyframeVariable;

/// Four independent keyframe curves evaluated together as an RGBA value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColorChannel {
    channels: [KeyframeVariable; 4],
}

impl ColorChannel {
    pub fn new(
        r: KeyframeVariable,
        g: KeyframeVariable,
        b: KeyframeVariable,
        a: KeyframeVariable,
    ) -> Self {
        Self {
            channels: [r, g, b, a],
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn constant(color: Vec4) -> Self {
        Self::new(
            KeyframeVariable::constant(color.x),
            KeyframeVariable::constant(color.y),
            KeyframeVariable::constant(color.z),
            KeyframeVariable::constant(color.w),
        )
    }

    pub fn channel(&self, index: usize) -> Option<&KeyframeVariable> {
        self.channels.get(index)
    }

    pub fn evaluate(&self, t: f32) -> Vec4 {
        Vec4::from_array(std::array::from_fn(|i| self.channels[i].evaluate(t)))
    }

    pub fn evaluate_transition(&self, other: &ColorChannel, t: f32, progress: f32) -> Vec4 {
        Vec4::from_array(std::array::from_fn(|i| {
            self.channels[i].evaluate_transition(&other.channels[i], t, progress)
        }))
    }
}
