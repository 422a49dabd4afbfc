use crate::bounding_volume::Aabb;
use crate::context::{Attributes, RenderContext};
use crate::math::{Real, Transform};
use crate::motion::MotionSurface;
use crate::primvar::{PrimVarKind, StorageClass};
use crate::surface::{BilinearPatch, PointsPolygon, Polygon, SplitError};
use alloc::sync::Arc;
use core::fmt;
use downcast_rs::{impl_downcast, DowncastSync};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
/// Enum representing the type of a surface.
pub enum SurfaceType {
    /// A standalone polygon.
    Polygon,
    /// One face of a polygon mesh sharing its vertex pool.
    PointsPolygon,
    /// A bilinear patch.
    BilinearPatch,
    /// A motion-blurred set of time samples of one surface.
    Motion,
    /// A custom user-defined surface.
    Custom,
}

#[derive(Copy, Clone, Debug)]
/// Enum representing the surface with its actual type.
pub enum TypedSurface<'a> {
    /// A standalone polygon.
    Polygon(&'a Polygon),
    /// One face of a polygon mesh.
    PointsPolygon(&'a PointsPolygon),
    /// A bilinear patch.
    BilinearPatch(&'a BilinearPatch),
    /// A motion-blurred surface.
    Motion(&'a MotionSurface),
    /// A custom user-defined surface.
    Custom(&'a dyn Surface),
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
/// Per-surface flags read by the split pipeline and the dicer.
pub struct SurfaceFlags(u8);

bitflags::bitflags! {
    impl SurfaceFlags: u8 {
        /// The surface was judged small enough to be diced directly.
        const DICEABLE = 1;
        /// The fourth corner of this quad was synthesized from a triangle.
        ///
        /// The dicer must discard the samples lying beyond the quad's phantom clip edge
        /// (see [`BilinearPatch::phantom_clip`]).
        const PHANTOM_FOURTH_VERTEX = 1 << 1;
    }
}

/// The direction along which a four-sided surface is halved.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SplitDirection {
    /// Halve the first parametric direction.
    U,
    /// Halve the second parametric direction.
    V,
}

/// The state every surface carries besides its geometry.
#[derive(Clone, Debug)]
pub struct SurfaceState {
    /// The shared attribute set the surface was created under.
    pub attributes: Arc<Attributes>,
    /// The object to world transform of the surface.
    pub object_to_world: Transform<Real>,
    /// The number of splits this surface inherited that failed to shrink its bound.
    pub eye_splits: u32,
    /// The flags of this surface.
    pub flags: SurfaceFlags,
}

impl SurfaceState {
    /// The state of a freshly created surface with the identity object transform.
    pub fn new(attributes: Arc<Attributes>) -> Self {
        Self {
            attributes,
            object_to_world: Transform::identity(),
            eye_splits: 0,
            flags: SurfaceFlags::empty(),
        }
    }

    /// Sets the object to world transform.
    #[must_use]
    pub fn with_object_to_world(mut self, object_to_world: Transform<Real>) -> Self {
        self.object_to_world = object_to_world;
        self
    }

    /// The state inherited by the children of a split.
    ///
    /// The attributes, transform, eye-split counter and dice-ability flag propagate
    /// unchanged. The phantom flag describes a single quad and is not inherited here.
    pub fn child(&self) -> Self {
        Self {
            attributes: self.attributes.clone(),
            object_to_world: self.object_to_world,
            eye_splits: self.eye_splits,
            flags: self.flags - SurfaceFlags::PHANTOM_FOURTH_VERTEX,
        }
    }
}

/// The comparable shape of a surface's data: the time samples of a motion surface must
/// all share the same topology.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topology {
    /// The type of the surface.
    pub surface_type: SurfaceType,
    /// The number of vertices of the surface.
    pub num_vertices: usize,
    /// The ordered `(name, class, kind)` list of its primitive variables.
    pub primvars: Vec<(String, StorageClass, PrimVarKind)>,
}

/// Trait implemented by every primitive the renderer can bound and split.
pub trait Surface: DowncastSync + fmt::Debug {
    /// Gets the type tag of this surface.
    fn surface_type(&self) -> SurfaceType;

    /// Gets the underlying surface as an enum.
    fn as_typed_surface(&self) -> TypedSurface<'_>;

    /// The non-geometric state of this surface.
    fn state(&self) -> &SurfaceState;

    /// The non-geometric state of this surface.
    fn state_mut(&mut self) -> &mut SurfaceState;

    /// The axis-aligned bound of this surface's vertices in the current space.
    fn bound(&self) -> Aabb;

    /// The topology of this surface.
    fn topology(&self) -> Topology;

    /// Splits this surface into simpler children, halving it along `direction` when the
    /// surface supports directional splits.
    ///
    /// Surfaces without a notion of direction ignore it.
    fn split_along(
        &self,
        ctx: &dyn RenderContext,
        direction: Option<SplitDirection>,
    ) -> Result<Vec<Box<dyn Surface>>, SplitError>;

    /// The direction [`Surface::split`] would halve this surface along, if it is directional.
    fn split_direction(&self) -> Option<SplitDirection> {
        None
    }

    /// Splits this surface into simpler children.
    fn split(&self, ctx: &dyn RenderContext) -> Result<Vec<Box<dyn Surface>>, SplitError> {
        self.split_along(ctx, self.split_direction())
    }

    /// Is this surface collapsed to a point?
    ///
    /// Degenerate surfaces should be discarded rather than split: their split is well
    /// defined but meaningless.
    fn is_degenerate(&self) -> bool {
        false
    }

    /// Does this surface lie entirely beyond its phantom clip edge?
    fn is_fully_clipped(&self) -> bool {
        false
    }

    /// The flags of this surface.
    fn flags(&self) -> SurfaceFlags {
        self.state().flags
    }

    /// The number of splits this surface inherited that failed to shrink its bound.
    fn eye_splits(&self) -> u32 {
        self.state().eye_splits
    }
}

impl_downcast!(sync Surface);

impl dyn Surface {
    /// Converts this abstract surface to the given surface, if it is one.
    pub fn as_surface<T: Surface>(&self) -> Option<&T> {
        self.downcast_ref()
    }

    /// Converts this abstract surface to a polygon, if it is one.
    pub fn as_polygon(&self) -> Option<&Polygon> {
        self.downcast_ref()
    }

    /// Converts this abstract surface to a mesh polygon, if it is one.
    pub fn as_points_polygon(&self) -> Option<&PointsPolygon> {
        self.downcast_ref()
    }

    /// Converts this abstract surface to a bilinear patch, if it is one.
    pub fn as_bilinear_patch(&self) -> Option<&BilinearPatch> {
        self.downcast_ref()
    }

    /// Converts this abstract surface to a motion surface, if it is one.
    pub fn as_motion(&self) -> Option<&MotionSurface> {
        self.downcast_ref()
    }
}
