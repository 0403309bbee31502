use stratus_core::constants::{DAY_HOURS, DEFAULT_CURVE_VALUE, TIME_FRAME_HOURS};
use stratus_core::math::lerp_f32;

use crate::validator::{validate_curve, ValidationError};

/// One scalar channel over the cyclic 24-hour day, defined by sparse
/// `(hour, value)` keyframes and interpolated linearly between them.
///
/// The curve wraps: the segment after the last keyframe runs to the first
/// keyframe of the next day, so evaluation is continuous across midnight.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyframeVariable {
    frames: Vec<f32>,
    values: Vec<f32>,
}

impl KeyframeVariable {
    /// Build a curve from parallel frame/value lists.
    ///
    /// Frames must lie in `[0, 24)` and be non-decreasing; both lists must
    /// have the same length.
    pub fn new(frames: Vec<f32>, values: Vec<f32>) -> Result<Self, ValidationError> {
        validate_curve(&frames, &values)?;
        Ok(Self { frames, values })
    }

    /// Curve with no data. Evaluates to [`DEFAULT_CURVE_VALUE`] everywhere.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Flat curve: a single keyframe at midnight.
    pub fn constant(value: f32) -> Self {
        Self {
            frames: vec![0.0],
            values: vec![value],
        }
    }

    /// Expand one sample per standard time frame into 24 hourly keyframes.
    ///
    /// Sample `i` belongs to hour `TIME_FRAME_HOURS[i]`; hours between two
    /// standard frames hold the previous sample. Missing trailing samples
    /// fall back to [`DEFAULT_CURVE_VALUE`].
    pub fn from_time_frames(samples: &[f32]) -> Self {
        if samples.is_empty() {
            return Self::empty();
        }

        let mut frames = Vec::with_capacity(24);
        let mut values = Vec::with_capacity(24);
        let mut current = DEFAULT_CURVE_VALUE;
        for hour in 0..24u8 {
            if let Some(i) = TIME_FRAME_HOURS.iter().position(|&h| h == hour) {
                current = samples.get(i).copied().unwrap_or(DEFAULT_CURVE_VALUE);
            }
            frames.push(hour as f32);
            values.push(current);
        }
        Self { frames, values }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[f32] {
        &self.frames
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Value at hour `t`. `t` is wrapped into `[0, 24)` first.
    pub fn evaluate(&self, t: f32) -> f32 {
        let Some(last) = self.frames.len().checked_sub(1) else {
            return DEFAULT_CURVE_VALUE;
        };

        let mut t = t.rem_euclid(DAY_HOURS);
        let (start_frame, start_value, end_frame, end_value) =
            match self.frames.iter().rposition(|&f| f <= t) {
                Some(i) if i < last => (
                    self.frames[i],
                    self.values[i],
                    self.frames[i + 1],
                    self.values[i + 1],
                ),
                // At or after the last frame: run into tomorrow's first frame.
                Some(_) => (
                    self.frames[last],
                    self.values[last],
                    self.frames[0] + DAY_HOURS,
                    self.values[0],
                ),
                // Before the first frame: continue yesterday's last segment.
                None => {
                    t += DAY_HOURS;
                    (
                        self.frames[last],
                        self.values[last],
                        self.frames[0] + DAY_HOURS,
                        self.values[0],
                    )
                }
            };

        if end_frame == start_frame {
            return start_value;
        }
        start_value + (end_value - start_value) * (t - start_frame) / (end_frame - start_frame)
    }

    /// Pointwise blend of this curve and `other` at hour `t`.
    ///
    /// `progress` is clamped to `[0, 1]`; 0 yields this curve's value and 1
    /// yields `other`'s value exactly.
    pub fn evaluate_transition(&self, other: &KeyframeVariable, t: f32, progress: f32) -> f32 {
        let from = self.evaluate(t);
        let to = other.evaluate(t);
        if from == to {
            return from;
        }
        lerp_f32(from, to, progress.clamp(0.0, 1.0))
    }
}
