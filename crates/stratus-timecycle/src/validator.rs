use std::collections::HashSet;

use stratus_core::constants::DAY_HOURS;
use thiserror::Error;

use crate::cycle::WeatherCycle;
use crate::defaults::ChannelSchema;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Curve has {frames} frames but {values} values")]
    LengthMismatch { frames: usize, values: usize },
    #[error("Frame {index} at {frame}h is outside [0, 24)")]
    FrameOutOfRange { index: usize, frame: f32 },
    #[error("Frame {index} at {frame}h is earlier than the frame before it")]
    FramesNotSorted { index: usize, frame: f32 },
    #[error("Cycle '{cycle}' is missing channel '{channel}'")]
    MissingChannel { cycle: String, channel: String },
    #[error("Cycle '{cycle}' has channel '{channel}' that is not in the table schema")]
    UnexpectedChannel { cycle: String, channel: String },
    #[error("Cycle '{cycle}' channel '{channel}': {reason}")]
    InvalidChannel {
        cycle: String,
        channel: String,
        reason: String,
    },
}

/// Validate one keyframe curve: equal lengths, frames in `[0, 24)`,
/// non-decreasing order.
pub fn validate_curve(frames: &[f32], values: &[f32]) -> Result<(), ValidationError> {
    if frames.len() != values.len() {
        return Err(ValidationError::LengthMismatch {
            frames: frames.len(),
            values: values.len(),
        });
    }

    for (index, &frame) in frames.iter().enumerate() {
        // NaN fails this check too
        if !(0.0..DAY_HOURS).contains(&frame) {
            return Err(ValidationError::FrameOutOfRange { index, frame });
        }
        if index > 0 && frame < frames[index - 1] {
            return Err(ValidationError::FramesNotSorted { index, frame });
        }
    }

    Ok(())
}

/// Check that a cycle carries exactly the schema's key set.
/// Transitions between two cycles are only defined when this holds for both.
pub fn validate_key_set(
    cycle_name: &str,
    cycle: &WeatherCycle,
    schema: &ChannelSchema,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let scalar_names: HashSet<&str> = cycle.scalar_names().collect();
    let color_names: HashSet<&str> = cycle.color_names().collect();

    for name in schema.scalars() {
        if !scalar_names.contains(name) {
            errors.push(ValidationError::MissingChannel {
                cycle: cycle_name.to_string(),
                channel: name.to_string(),
            });
        }
    }
    for name in schema.colors() {
        if !color_names.contains(name) {
            errors.push(ValidationError::MissingChannel {
                cycle: cycle_name.to_string(),
                channel: name.to_string(),
            });
        }
    }

    for name in scalar_names {
        if !schema.has_scalar(name) {
            errors.push(ValidationError::UnexpectedChannel {
                cycle: cycle_name.to_string(),
                channel: name.to_string(),
            });
        }
    }
    for name in color_names {
        if !schema.has_color(name) {
            errors.push(ValidationError::UnexpectedChannel {
                cycle: cycle_name.to_string(),
                channel: name.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
