/*!
reyes3d
========

**reyes3d** is the split and bound engine of a REYES-style micropolygon
renderer, written with the rust programming language.

Scene primitives (polygons, polygon-mesh faces, bilinear patches, and
motion-blurred sets of those) are bounded and recursively split into
simpler children until a dice test judges them small enough to be turned
into micropolygon grids by an external dicer.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![deny(unused_qualifications)]

extern crate alloc;

#[cfg(feature = "serde")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod context;
pub mod motion;
pub mod pipeline;
pub mod primvar;
pub mod surface;
pub mod utils;

mod real {
    /// The scalar type used throughout this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used throughout this crate.
    #[cfg(all(feature = "f32", not(feature = "f64")))]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use super::real::*;
    pub use na::{Matrix4, Point3, UnitVector3, Vector3, Vector4};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The distance under which two vertices are considered coincident when classifying
    /// degenerate surfaces.
    pub const DEGENERACY_TOLERANCE: Real = 1.0e-6;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The unit vector type.
    pub use UnitVector3 as UnitVector;

    /// The homogeneous point type.
    pub use Vector4 as HPoint;

    /// The 4x4 transformation matrix type.
    pub use Matrix4 as Transform;

    /// The RGB color type.
    pub type Color<N> = Vector3<N>;
}
