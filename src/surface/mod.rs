//! Surfaces supported by reyes3d, and the split protocol they implement.

pub use self::bilinear_patch::{BilinearPatch, PhantomClip};
pub use self::points_polygon::{PointsPolygon, PolygonPoints};
pub use self::polygon::Polygon;
pub use self::polygon_base::PolygonBase;
pub use self::shared_surface::SharedSurface;
pub use self::split_error::{MotionMismatch, PrimVarOperation, SplitError, ValidationError};
#[doc(inline)]
pub use self::surface::{
    SplitDirection, Surface, SurfaceFlags, SurfaceState, SurfaceType, Topology, TypedSurface,
};

mod bilinear_patch;
mod points_polygon;
mod polygon;
mod polygon_base;
mod shared_surface;
mod split_error;
mod surface;
