use glam::{Vec3, Vec4};

/// Linear interpolation between two values of the same shape.
///
/// Implementations use the `a * (1 - t) + b * t` form so that `t == 0`
/// returns `self` and `t == 1` returns `other` bit-for-bit.
pub trait Lerp {
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

/// Scalar lerp shared by every [`Lerp`] impl.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

impl Lerp for f32 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        lerp_f32(*self, *other, t)
    }
}

impl<const N: usize> Lerp for [f32; N] {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        let mut out = *self;
        for (o, b) in out.iter_mut().zip(other) {
            *o = lerp_f32(*o, *b, t);
        }
        out
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        *self * (1.0 - t) + *other * t
    }
}

impl Lerp for Vec4 {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        *self * (1.0 - t) + *other * t
    }
}

/// Compute a cross-fade factor from elapsed time.
///
/// A non-positive or non-finite duration means "jump immediately" and always
/// yields 1.0. Negative elapsed time (clock skew) yields 0.0.
pub fn blend_factor(elapsed_seconds: f64, duration_seconds: f32) -> f32 {
    if !(duration_seconds > 0.0 && duration_seconds.is_finite()) {
        return 1.0;
    }
    (elapsed_seconds / duration_seconds as f64).clamp(0.0, 1.0) as f32
}
