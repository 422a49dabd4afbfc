use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Real, Transform};
use crate::surface::ValidationError;
use core::fmt;

/// A widening of the bound of a motion-blurred surface accounting for its motion
/// between time samples.
///
/// The padded bound must contain the input bound.
pub trait SweepPadding: Send + Sync + fmt::Debug {
    /// Pads `bound`, the union of the per-sample bounds of a motion surface.
    fn pad(&self, bound: &Aabb) -> Aabb;
}

/// A sweep padding leaving bounds unchanged.
///
/// This is exact for surfaces whose vertices move linearly between samples.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NoSweep;

impl SweepPadding for NoSweep {
    fn pad(&self, bound: &Aabb) -> Aabb {
        *bound
    }
}

/// A time-dependent transform.
///
/// This is a function, assumed to be continuous, that, given a time `t`, returns a
/// 4x4 transform.
pub trait TransformMotion {
    /// Get the transform at the time `t`.
    fn transform_at_time(&self, t: Real) -> Transform<Real>;
}

impl TransformMotion for Transform<Real> {
    fn transform_at_time(&self, _: Real) -> Transform<Real> {
        *self
    }
}

/// A piecewise-linear interpolation between keyframed transforms.
///
/// Before the first key and after the last one, the transform is held constant.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframedTransform {
    keys: Vec<(Real, Transform<Real>)>,
}

impl KeyframedTransform {
    /// Creates a keyframed transform from `(time, transform)` pairs with strictly
    /// increasing times.
    pub fn new(
        keys: impl IntoIterator<Item = (Real, Transform<Real>)>,
    ) -> Result<Self, ValidationError> {
        let keys: Vec<_> = keys.into_iter().collect();

        if keys.is_empty() {
            return Err(ValidationError::EmptyMotion);
        }

        for w in keys.windows(2) {
            if !(w[1].0 > w[0].0) {
                return Err(ValidationError::UnorderedTimes {
                    previous: w[0].0,
                    next: w[1].0,
                });
            }
        }

        Ok(Self { keys })
    }

    /// The `(time, transform)` keys of this motion.
    pub fn keys(&self) -> &[(Real, Transform<Real>)] {
        &self.keys
    }

    /// The times at which the padding samples the motion: every key and every midpoint
    /// between two consecutive keys.
    fn sample_times(&self) -> impl Iterator<Item = Real> + '_ {
        let midpoints = self.keys.windows(2).map(|w| (w[0].0 + w[1].0) * 0.5);
        self.keys.iter().map(|(t, _)| *t).chain(midpoints)
    }
}

impl TransformMotion for KeyframedTransform {
    fn transform_at_time(&self, t: Real) -> Transform<Real> {
        let i = self.keys.partition_point(|(key, _)| *key <= t);

        if i == 0 {
            return self.keys[0].1;
        }
        if i == self.keys.len() {
            return self.keys[i - 1].1;
        }

        let (t0, m0) = &self.keys[i - 1];
        let (t1, m1) = &self.keys[i];
        m0 + (m1 - m0) * ((t - t0) / (t1 - t0))
    }
}

impl SweepPadding for KeyframedTransform {
    /// Merges `bound` carried along the motion relative to its first key.
    fn pad(&self, bound: &Aabb) -> Aabb {
        let first = match self.keys[0].1.try_inverse() {
            Some(inv) => inv,
            None => {
                log::warn!("Singular first keyframe transform, the sweep bound is not padded.");
                return *bound;
            }
        };

        let mut padded = *bound;
        for t in self.sample_times() {
            let relative = self.transform_at_time(t) * first;
            padded.merge(&bound.transform_by(&relative));
        }

        padded
    }
}
