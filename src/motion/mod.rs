//! Motion-blurred surfaces: one logical surface sampled at several shutter times.

pub use self::motion_surface::MotionSurface;
pub use self::sweep::{KeyframedTransform, NoSweep, SweepPadding, TransformMotion};

mod motion_surface;
mod sweep;
